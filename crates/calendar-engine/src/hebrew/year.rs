//! Hebrew years, leap-cycle bookkeeping, and the start-of-year rules.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{
    day, hours_and_parts, reference_moon_offset, weekday_from_index, weekday_index, HebrewMonth,
    FRIDAY, LEAP_YEARS_IN_CYCLE, MONDAY, MONTHS_PER_LEAP_CYCLE, REFERENCE_YEAR, SUNDAY, TUESDAY,
    WEDNESDAY, YEARS_PER_LEAP_CYCLE,
};
use crate::error::{CalendarError, Result};
use crate::interval::CalendarInterval;

/// A Hebrew year number (anno mundi). Unranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HebrewYear(i64);

impl HebrewYear {
    pub const fn new(year: i64) -> Self {
        Self(year)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn previous(self) -> Self {
        Self(self.0 - 1)
    }

    /// Leap years are those at positions 0, 3, 6, 8, 11, 14 and 17 of the 19-year cycle.
    pub fn is_leap_year(self) -> bool {
        LEAP_YEARS_IN_CYCLE.contains(&self.0.rem_euclid(YEARS_PER_LEAP_CYCLE))
    }

    /// 13 in a leap year, otherwise 12.
    pub fn number_of_months(self) -> u8 {
        if self.is_leap_year() {
            13
        } else {
            12
        }
    }

    /// The months of this year, in order from Tishrei.
    pub fn months(self) -> &'static [HebrewMonth] {
        HebrewMonth::in_year(self)
    }

    /// Lunar months from Tishrei 5758 to Tishrei of this year.
    pub(crate) fn months_elapsed(self) -> i64 {
        let years_elapsed = self.0 - REFERENCE_YEAR;
        let cycles_elapsed = years_elapsed.div_euclid(YEARS_PER_LEAP_CYCLE);
        let cycle_start = REFERENCE_YEAR + cycles_elapsed * YEARS_PER_LEAP_CYCLE;
        let partial: i64 = (cycle_start..self.0)
            .map(|y| i64::from(HebrewYear(y).number_of_months()))
            .sum();
        cycles_elapsed * MONTHS_PER_LEAP_CYCLE + partial
    }

    /// The molad (mean conjunction) of Tishrei of this year, since the epoch.
    pub fn molad_of_tishrei(self) -> CalendarInterval {
        reference_moon_offset() + CalendarInterval::from_hebrew_moons(self.months_elapsed() as f64)
    }

    /// Start of 1 Tishrei (hour 0), since the epoch.
    ///
    /// Takes the day of the molad of Tishrei and applies the postponements:
    ///
    /// 1. Molad zaken: a molad at or after 18h moves the year to the next day.
    /// 2. Lo ADU Rosh: the year never starts on Sunday, Wednesday or Friday.
    /// 3. GaTaRaD: a common year whose molad falls on Tuesday at or after
    ///    9h 204p starts on Thursday.
    /// 4. BeTUTaKPaT: a year following a leap year, whose molad falls on
    ///    Monday at or after 15h 589p, starts on Tuesday.
    ///
    /// Rules 3 and 4 only apply when rule 1 did not.
    pub fn interval_from_reference_date(self) -> CalendarInterval {
        let day = day();
        let year_moon = self.molad_of_tishrei();

        let mut year_start = year_moon.floor_to(day);
        let moon_into_day = year_moon.rem_euclid(day);

        let old_moon = moon_into_day >= hours_and_parts(18.0, 0.0);
        if old_moon {
            year_start += day;
        }

        let weekday = weekday_index(year_start);
        if matches!(weekday, SUNDAY | WEDNESDAY | FRIDAY) {
            year_start += day;
        }

        if !old_moon {
            if !self.is_leap_year()
                && weekday == TUESDAY
                && moon_into_day >= hours_and_parts(9.0, 204.0)
            {
                year_start += day * 2.0;
            } else if self.previous().is_leap_year()
                && weekday == MONDAY
                && moon_into_day >= hours_and_parts(15.0, 589.0)
            {
                year_start += day;
            }
        }

        year_start
    }

    /// Days from 1 Tishrei of this year to 1 Tishrei of the next.
    pub fn number_of_days(self) -> u16 {
        let length =
            self.next().interval_from_reference_date() - self.interval_from_reference_date();
        length.days() as u16
    }

    /// Whether the year is deficient, normal or whole.
    ///
    /// # Panics
    ///
    /// Never in practice: the postponement rules only produce the six legal
    /// year lengths.
    pub fn length(self) -> YearLength {
        YearLength::from_number_of_days(self.number_of_days())
            .expect("the postponement rules only produce legal year lengths")
    }

    /// Weekday of Rosh Hashanah.
    pub fn new_year_weekday(self) -> Weekday {
        weekday_from_index(weekday_index(self.interval_from_reference_date()))
    }
}

impl From<i64> for HebrewYear {
    fn from(year: i64) -> Self {
        Self(year)
    }
}

impl From<HebrewYear> for i64 {
    fn from(year: HebrewYear) -> Self {
        year.0
    }
}

impl fmt::Display for HebrewYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How Cheshvan and Kislev are sized in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearLength {
    /// 353 or 383 days: Cheshvan and Kislev both have 29 days.
    Deficient,
    /// 354 or 384 days: Cheshvan 29, Kislev 30.
    Normal,
    /// 355 or 385 days: Cheshvan and Kislev both have 30 days.
    Whole,
}

impl YearLength {
    /// Classify a year by its day count.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::IllegalYearLength`] unless `days` is one of
    /// 353, 354, 355, 383, 384 or 385.
    pub fn from_number_of_days(days: u16) -> Result<Self> {
        match days {
            353 | 383 => Ok(YearLength::Deficient),
            354 | 384 => Ok(YearLength::Normal),
            355 | 385 => Ok(YearLength::Whole),
            other => Err(CalendarError::IllegalYearLength(i64::from(other))),
        }
    }

    pub fn number_of_days(self, leap_year: bool) -> u16 {
        let common = match self {
            YearLength::Deficient => 353,
            YearLength::Normal => 354,
            YearLength::Whole => 355,
        };
        if leap_year {
            common + 30
        } else {
            common
        }
    }
}
