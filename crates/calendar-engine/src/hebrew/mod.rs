//! The traditional Hebrew (lunisolar) calendar.
//!
//! Years begin at Tishrei. A year has 12 months, or 13 in the seven leap
//! years of each 19-year cycle (years ≡ 0, 3, 6, 8, 11, 14, 17 mod 19), where
//! Adar is replaced by Adar I and Adar II. Rosh Hashanah falls on the day of
//! the molad of Tishrei unless one of four postponements (dehiyot) moves it
//! one or two days later; the resulting year is 353-355 days long (383-385 in
//! a leap year).
//!
//! The calendar anchors the whole crate: the global epoch is
//! 1 Tishrei 5758, hour 0, part 0. Hour 0 of a Hebrew day is 18:00 of the
//! previous civil day.
//!
//! ## Types
//!
//! | Type | Range |
//! |------|-------|
//! | [`HebrewYear`] | any `i64` |
//! | [`HebrewMonth`] | 14 named months, 12 or 13 used per year |
//! | [`HebrewDay`] | 1..=30 |
//! | [`HebrewHour`] | 0..=23 |
//! | [`HebrewPart`] | 0..=1079 |
//! | [`YearLength`] | deficient / normal / whole |
//! | [`HebrewMonthAndYear`] | month-granular point with ± stepping |
//! | [`HebrewDate`] | full date; a [`DateDefinition`](crate::DateDefinition) |

mod date;
mod fields;
mod month;
mod month_and_year;
mod year;

pub use date::HebrewDate;
pub use fields::{HebrewDay, HebrewHour, HebrewPart};
pub use month::HebrewMonth;
pub use month_and_year::HebrewMonthAndYear;
pub use year::{HebrewYear, YearLength};

use chrono::Weekday;

use crate::interval::CalendarInterval;

/// The year of the global epoch.
pub const REFERENCE_YEAR: i64 = 5758;
pub const YEARS_PER_LEAP_CYCLE: i64 = 19;
pub const MONTHS_PER_LEAP_CYCLE: i64 = 235;
/// Positions within the 19-year cycle (`year mod 19`) that are leap years.
pub const LEAP_YEARS_IN_CYCLE: [i64; 7] = [0, 3, 6, 8, 11, 14, 17];
pub const MAX_DAYS_IN_MONTH: u8 = 30;

/// Weekday index (Sunday = 0) of the epoch day: Thursday.
const REFERENCE_WEEKDAY: i64 = 4;

const SUNDAY: i64 = 0;
const MONDAY: i64 = 1;
const TUESDAY: i64 = 2;
const WEDNESDAY: i64 = 3;
const FRIDAY: i64 = 5;

fn day() -> CalendarInterval {
    CalendarInterval::from_days(1.0)
}

fn hours_and_parts(hours: f64, parts: f64) -> CalendarInterval {
    CalendarInterval::from_hours(hours) + CalendarInterval::from_hebrew_parts(parts)
}

/// Molad of Tishrei 5758, measured from the epoch.
fn reference_moon_offset() -> CalendarInterval {
    hours_and_parts(4.0, 129.0)
}

/// Sunday = 0 index of the Hebrew day containing `instant`.
fn weekday_index(instant: CalendarInterval) -> i64 {
    (instant.count_whole(day()) as i64 + REFERENCE_WEEKDAY).rem_euclid(7)
}

fn weekday_from_index(index: i64) -> Weekday {
    match index.rem_euclid(7) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// The weekday of the Hebrew day containing `instant` (an interval since the epoch).
pub fn weekday_of(instant: CalendarInterval) -> Weekday {
    weekday_from_index(weekday_index(instant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_thursday() {
        assert_eq!(weekday_of(CalendarInterval::ZERO), Weekday::Thu);
        assert_eq!(weekday_of(CalendarInterval::from_hours(23.0)), Weekday::Thu);
        assert_eq!(weekday_of(CalendarInterval::from_days(1.0)), Weekday::Fri);
    }

    #[test]
    fn test_weekday_before_epoch() {
        assert_eq!(weekday_of(CalendarInterval::from_hours(-1.0)), Weekday::Wed);
        assert_eq!(weekday_of(CalendarInterval::from_days(-4.0)), Weekday::Sun);
    }
}
