//! A month-granular point in the Hebrew calendar.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{reference_moon_offset, HebrewMonth, HebrewYear};
use crate::interval::CalendarInterval;

/// A specific month of a specific year, e.g. Adar II 5784.
///
/// Adding or subtracting `n` walks one month at a time, re-deriving the
/// leap-year layout at every step, so stepping across Adar in a leap year
/// visits both Adar I and Adar II.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMonthAndYear")]
pub struct HebrewMonthAndYear {
    month: HebrewMonth,
    year: HebrewYear,
}

/// Decoded fields before the month is corrected for the year.
#[derive(Deserialize)]
struct RawMonthAndYear {
    month: HebrewMonth,
    year: HebrewYear,
}

impl From<RawMonthAndYear> for HebrewMonthAndYear {
    fn from(raw: RawMonthAndYear) -> Self {
        Self::new(raw.month, raw.year)
    }
}

impl HebrewMonthAndYear {
    /// The month is [corrected](HebrewMonth::corrected) for `year`.
    pub fn new(month: HebrewMonth, year: HebrewYear) -> Self {
        Self {
            month: month.corrected(year),
            year,
        }
    }

    /// Always valid for [`year`](Self::year).
    pub fn month(self) -> HebrewMonth {
        self.month
    }

    pub fn year(self) -> HebrewYear {
        self.year
    }

    /// The following month, crossing into the next year after Elul.
    pub fn next(self) -> Self {
        let (month, year) = self.month.next(self.year);
        Self { month, year }
    }

    /// The preceding month, crossing into the previous year before Tishrei.
    pub fn previous(self) -> Self {
        let (month, year) = self.month.previous(self.year);
        Self { month, year }
    }

    /// 29 or 30.
    pub fn number_of_days(self) -> u8 {
        self.month.number_of_days(self.year)
    }

    /// Start of the first day of the month, since the epoch.
    pub fn start(self) -> CalendarInterval {
        self.year.interval_from_reference_date() + self.month.offset_from_year_start(self.year)
    }

    /// The molad (mean conjunction) announced for this month, since the epoch.
    pub fn molad(self) -> CalendarInterval {
        let months = self.year.months_elapsed() + i64::from(self.month.ordinal(self.year)) - 1;
        reference_moon_offset() + CalendarInterval::from_hebrew_moons(months as f64)
    }

    /// Number of single-month steps from `self` to `other`; negative when
    /// `other` is earlier.
    pub fn months_until(self, other: Self) -> i64 {
        let mut cursor = self;
        let mut steps = 0;
        match self.cmp(&other) {
            Ordering::Less => {
                while cursor < other {
                    cursor = cursor.next();
                    steps += 1;
                }
            }
            Ordering::Greater => {
                while cursor > other {
                    cursor = cursor.previous();
                    steps -= 1;
                }
            }
            Ordering::Equal => {}
        }
        steps
    }
}

impl PartialOrd for HebrewMonthAndYear {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HebrewMonthAndYear {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month.ordinal(self.year)).cmp(&(other.year, other.month.ordinal(other.year)))
    }
}

impl Add<i64> for HebrewMonthAndYear {
    type Output = Self;

    fn add(self, months: i64) -> Self {
        let mut cursor = self;
        if months >= 0 {
            for _ in 0..months {
                cursor = cursor.next();
            }
        } else {
            for _ in 0..months.unsigned_abs() {
                cursor = cursor.previous();
            }
        }
        cursor
    }
}

impl Sub<i64> for HebrewMonthAndYear {
    type Output = Self;

    fn sub(self, months: i64) -> Self {
        self + -months
    }
}

impl AddAssign<i64> for HebrewMonthAndYear {
    fn add_assign(&mut self, months: i64) {
        *self = *self + months;
    }
}

impl SubAssign<i64> for HebrewMonthAndYear {
    fn sub_assign(&mut self, months: i64) {
        *self = *self - months;
    }
}

/// `a - b` is the signed number of months from `b` to `a`.
impl Sub for HebrewMonthAndYear {
    type Output = i64;

    fn sub(self, other: Self) -> i64 {
        other.months_until(self)
    }
}

impl fmt::Display for HebrewMonthAndYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
