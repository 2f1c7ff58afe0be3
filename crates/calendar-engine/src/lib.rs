//! # calendar-engine
//!
//! Exact conversion of instants between calendar systems.
//!
//! Every instant is a [`CalendarInterval`] since one shared epoch,
//! 1 Tishrei 5758 (hour 0, part 0), counted in a base unit that divides
//! both the second and the Hebrew part exactly. Calendars plug in through
//! the [`DateDefinition`] trait; a [`CalendarDate`] holds one definition
//! and converts to any other on demand.
//!
//! ## Modules
//!
//! - [`interval`] — exact-ratio durations and the supported time units
//! - [`definition`] — the `DateDefinition` trait every calendar implements
//! - [`registry`] — process-wide identifier → payload decoder map
//! - [`calendar_date`] — `CalendarDate`: comparison, arithmetic, memoized conversion, serde
//! - [`hebrew`] — the traditional Hebrew calendar: field types, forward and inverse algorithms
//! - [`gregorian`] — proleptic Gregorian civil dates
//! - [`relative`] — a fixed offset from another date
//! - [`host`] — bridge to `chrono::DateTime<Utc>`
//! - [`unknown`] — round-trip placeholder for unregistered calendars
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use calendar_engine::{CalendarDate, CalendarInterval, HebrewMonth};
//!
//! let pesach = CalendarDate::gregorian(2025, 4, 13, 0, 0, 0).unwrap();
//! assert_eq!(pesach.hebrew_month().unwrap(), HebrewMonth::Nisan);
//! assert_eq!(pesach.hebrew_day().unwrap().get(), 15);
//!
//! let week_later = &pesach + CalendarInterval::from_weeks(1.0);
//! assert_eq!(week_later.hebrew_day().unwrap().get(), 22);
//! assert_eq!(week_later - pesach, CalendarInterval::from_days(7.0));
//! ```

pub mod calendar_date;
pub mod definition;
pub mod error;
pub mod gregorian;
pub mod hebrew;
pub mod host;
pub mod interval;
pub mod registry;
pub mod relative;
pub mod unknown;

pub use calendar_date::CalendarDate;
pub use definition::DateDefinition;
pub use error::{CalendarError, Result};
pub use gregorian::GregorianDate;
pub use hebrew::{
    HebrewDate, HebrewDay, HebrewHour, HebrewMonth, HebrewMonthAndYear, HebrewPart, HebrewYear,
    YearLength,
};
pub use host::HostDate;
pub use interval::{CalendarInterval, IntervalComponents, Scalar, TimeUnit, UNITS_PER_DAY};
pub use relative::RelativeDate;
pub use unknown::UnknownDate;
