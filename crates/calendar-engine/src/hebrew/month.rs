//! Hebrew months and their leap-aware ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{HebrewYear, YearLength};
use crate::error::CalendarError;
use crate::interval::CalendarInterval;

/// A named Hebrew month.
///
/// Common years use plain [`Adar`](HebrewMonth::Adar); leap years use
/// [`AdarI`](HebrewMonth::AdarI) and [`AdarII`](HebrewMonth::AdarII) instead.
/// Every operation that takes a year first [corrects](HebrewMonth::corrected)
/// the month for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HebrewMonth {
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    Shevat,
    #[serde(rename = "adar_i")]
    AdarI,
    #[serde(rename = "adar_ii")]
    AdarII,
    Adar,
    Nisan,
    Iyar,
    Sivan,
    Tammuz,
    Av,
    Elul,
}

use HebrewMonth::*;

const COMMON_YEAR: [HebrewMonth; 12] = [
    Tishrei, Cheshvan, Kislev, Tevet, Shevat, Adar, Nisan, Iyar, Sivan, Tammuz, Av, Elul,
];

const LEAP_YEAR: [HebrewMonth; 13] = [
    Tishrei, Cheshvan, Kislev, Tevet, Shevat, AdarI, AdarII, Nisan, Iyar, Sivan, Tammuz, Av, Elul,
];

impl HebrewMonth {
    pub const ALL: [HebrewMonth; 14] = [
        Tishrei, Cheshvan, Kislev, Tevet, Shevat, AdarI, AdarII, Adar, Nisan, Iyar, Sivan, Tammuz,
        Av, Elul,
    ];

    /// The months of `year`, in order from Tishrei.
    pub fn in_year(year: HebrewYear) -> &'static [HebrewMonth] {
        if year.is_leap_year() {
            &LEAP_YEAR
        } else {
            &COMMON_YEAR
        }
    }

    /// Map the month onto one that exists in `year`.
    ///
    /// Adar I and Adar II become Adar in a common year; Adar becomes Adar II
    /// in a leap year.
    pub fn corrected(self, year: HebrewYear) -> Self {
        match (self, year.is_leap_year()) {
            (AdarI | AdarII, false) => Adar,
            (Adar, true) => AdarII,
            (month, _) => month,
        }
    }

    /// 1-based position of the month within `year`.
    pub fn ordinal(self, year: HebrewYear) -> u8 {
        let month = self.corrected(year);
        let position = Self::in_year(year)
            .iter()
            .position(|&m| m == month)
            .unwrap_or_default();
        position as u8 + 1
    }

    /// Length of the month in `year`; Cheshvan and Kislev depend on the year length.
    pub fn number_of_days(self, year: HebrewYear) -> u8 {
        match self.corrected(year) {
            Tishrei | Shevat | AdarI | Nisan | Sivan | Av => 30,
            Tevet | AdarII | Adar | Iyar | Tammuz | Elul => 29,
            Cheshvan => match year.length() {
                YearLength::Whole => 30,
                YearLength::Deficient | YearLength::Normal => 29,
            },
            Kislev => match year.length() {
                YearLength::Deficient => 29,
                YearLength::Normal | YearLength::Whole => 30,
            },
        }
    }

    /// The following month, moving into the next year after Elul.
    pub fn next(self, year: HebrewYear) -> (HebrewMonth, HebrewYear) {
        let months = Self::in_year(year);
        let index = usize::from(self.ordinal(year));
        match months.get(index) {
            Some(&month) => (month, year),
            None => (Tishrei, year.next()),
        }
    }

    /// The preceding month, moving into the previous year before Tishrei.
    pub fn previous(self, year: HebrewYear) -> (HebrewMonth, HebrewYear) {
        let ordinal = usize::from(self.ordinal(year));
        if ordinal == 1 {
            (Elul, year.previous())
        } else {
            (Self::in_year(year)[ordinal - 2], year)
        }
    }

    /// Time from 1 Tishrei to the first of this month in `year`.
    pub fn offset_from_year_start(self, year: HebrewYear) -> CalendarInterval {
        let month = self.corrected(year);
        if month == Tishrei {
            return CalendarInterval::ZERO;
        }
        let (previous, _) = month.previous(year);
        previous.offset_from_year_start(year)
            + CalendarInterval::from_days(f64::from(previous.number_of_days(year)))
    }

    /// Canonical transliterated name, as used in serialized payloads.
    pub fn name(self) -> &'static str {
        match self {
            Tishrei => "tishrei",
            Cheshvan => "cheshvan",
            Kislev => "kislev",
            Tevet => "tevet",
            Shevat => "shevat",
            AdarI => "adar_i",
            AdarII => "adar_ii",
            Adar => "adar",
            Nisan => "nisan",
            Iyar => "iyar",
            Sivan => "sivan",
            Tammuz => "tammuz",
            Av => "av",
            Elul => "elul",
        }
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HebrewMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|month| month.name() == normalized)
            .ok_or_else(|| CalendarError::UnknownMonth(s.to_string()))
    }
}
