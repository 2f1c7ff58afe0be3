//! The proleptic Gregorian calendar as a [`DateDefinition`].
//!
//! Civil date arithmetic is delegated to `chrono`. Civil time is UTC; the
//! engine has no notion of time zones.
//!
//! The reference instant is 1997-10-02T00:00:00, which is six hours after
//! the global epoch (the Hebrew day 1 Tishrei 5758 starts at 18:00 of the
//! previous civil day).

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::{CalendarError, Result};
use crate::interval::CalendarInterval;
use crate::relative::RelativeDate;

static REFERENCE_DATE: LazyLock<CalendarDate> = LazyLock::new(|| {
    CalendarDate::new(RelativeDate::new(
        CalendarInterval::from_hours(6.0),
        CalendarDate::epoch(),
    ))
});

fn reference_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1997, 10, 2)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("1997-10-02T00:00:00 is a valid datetime")
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        })
    }
}

/// A civil date and time in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GregorianDate(NaiveDateTime);

impl GregorianDate {
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] for a month outside 1-12, an
    /// hour outside 0-23 or a minute or second outside 0-59, and
    /// [`CalendarError::InvalidDatetime`] for a day the month does not have.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self::with_nanosecond(year, month, day, hour, minute, second, 0)
    }

    /// Like [`new`](Self::new), with a sub-second component.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new); `nanosecond` must be below one second.
    pub fn with_nanosecond(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> Result<Self> {
        check_range("Gregorian month", month, 1, 12)?;
        check_range("Gregorian hour", hour, 0, 23)?;
        check_range("Gregorian minute", minute, 0, 59)?;
        check_range("Gregorian second", second, 0, 59)?;
        check_range("Gregorian nanosecond", nanosecond, 0, 999_999_999)?;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CalendarError::InvalidDatetime(format!("{year:04}-{month:02}-{day:02} does not exist"))
        })?;
        date.and_hms_nano_opt(hour, minute, second, nanosecond)
            .map(Self)
            .ok_or_else(|| {
                CalendarError::InvalidDatetime(format!(
                    "{hour:02}:{minute:02}:{second:02}.{nanosecond:09} is not a time of day"
                ))
            })
    }

    /// Wrap a `chrono` datetime, read as UTC.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Proleptic year; 0 is 1 BCE.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, starting at 1.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Sub-second part, below 1_000_000_000.
    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }

    /// Civil weekday, changing at midnight.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDateTime> for GregorianDate {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
    }
}

/// Convert a whole-and-fractional seconds count into a `TimeDelta`.
pub(crate) fn time_delta_from_seconds(seconds: f64) -> Result<TimeDelta> {
    if !seconds.is_finite() {
        return Err(CalendarError::InvalidDatetime(format!(
            "{seconds} seconds is not a finite duration"
        )));
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as i64;
    TimeDelta::try_seconds(whole as i64)
        .and_then(|delta| delta.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or_else(|| {
            CalendarError::InvalidDatetime(format!("{seconds} seconds is out of range"))
        })
}

/// Seconds, with fraction, in a `TimeDelta`.
pub(crate) fn seconds_from_time_delta(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

#[derive(Serialize, Deserialize)]
struct Payload {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    #[serde(default)]
    nanosecond: u32,
}

impl DateDefinition for GregorianDate {
    const IDENTIFIER: &'static str = "gregorian";

    fn reference_date() -> CalendarDate {
        REFERENCE_DATE.clone()
    }

    fn from_interval_since_reference(interval: CalendarInterval) -> Result<Self> {
        let delta = time_delta_from_seconds(interval.seconds())?;
        reference_datetime()
            .checked_add_signed(delta)
            .map(Self)
            .ok_or_else(|| {
                CalendarError::InvalidDatetime(format!(
                    "{interval} from the Gregorian reference is out of range"
                ))
            })
    }

    fn interval_since_reference(&self) -> CalendarInterval {
        CalendarInterval::from_seconds(seconds_from_time_delta(self.0 - reference_datetime()))
    }

    fn encode_payload(&self) -> Result<String> {
        let payload = Payload {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            nanosecond: self.nanosecond(),
        };
        serde_json::to_string(&payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }

    fn decode_payload(payload: &str) -> Result<Self> {
        let p: Payload =
            serde_json::from_str(payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))?;
        Self::with_nanosecond(p.year, p.month, p.day, p.hour, p.minute, p.second, p.nanosecond)
            .map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> GregorianDate {
        GregorianDate::new(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_reference_is_six_hours_after_epoch() {
        assert_eq!(
            GregorianDate::reference_date().interval_since_epoch(),
            CalendarInterval::from_hours(6.0)
        );
        assert_eq!(ymd(1997, 10, 2).interval_since_reference(), CalendarInterval::ZERO);
        assert_eq!(
            ymd(1997, 10, 2).interval_since_epoch(),
            CalendarInterval::from_hours(6.0)
        );
    }

    #[test]
    fn test_known_instants() {
        assert_eq!(
            ymd(2024, 10, 3).interval_since_epoch(),
            CalendarInterval::from_days(9863.0) + CalendarInterval::from_hours(6.0)
        );
        assert_eq!(
            ymd(1997, 10, 1).interval_since_reference(),
            CalendarInterval::from_days(-1.0)
        );
    }

    #[test]
    fn test_from_interval() {
        let date = GregorianDate::from_interval_since_epoch(
            CalendarInterval::from_days(821.0) + CalendarInterval::from_hours(18.0),
        )
        .unwrap();
        assert_eq!(date, GregorianDate::new(2000, 1, 1, 12, 0, 0).unwrap());
        let before = GregorianDate::from_interval_since_epoch(CalendarInterval::ZERO).unwrap();
        assert_eq!(before, GregorianDate::new(1997, 10, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_fractional_seconds() {
        let date =
            GregorianDate::from_interval_since_reference(CalendarInterval::from_seconds(1.5))
                .unwrap();
        assert_eq!((date.second(), date.nanosecond()), (1, 500_000_000));
        let earlier =
            GregorianDate::from_interval_since_reference(CalendarInterval::from_seconds(-0.25))
                .unwrap();
        assert_eq!(earlier, GregorianDate::with_nanosecond(1997, 10, 1, 23, 59, 59, 750_000_000).unwrap());
        assert_eq!(earlier.interval_since_reference(), CalendarInterval::from_seconds(-0.25));
    }

    #[test]
    fn test_leap_year_rules() {
        assert!(GregorianDate::new(2000, 2, 29, 0, 0, 0).is_ok());
        assert!(GregorianDate::new(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(matches!(
            GregorianDate::new(1900, 2, 29, 0, 0, 0),
            Err(CalendarError::InvalidDatetime(_))
        ));
        assert!(GregorianDate::new(2023, 2, 29, 0, 0, 0).is_err());
    }

    #[test]
    fn test_field_ranges() {
        assert_eq!(
            GregorianDate::new(2024, 13, 1, 0, 0, 0),
            Err(CalendarError::OutOfRange {
                field: "Gregorian month",
                value: 13,
                min: 1,
                max: 12,
            })
        );
        assert!(GregorianDate::new(2024, 1, 1, 24, 0, 0).is_err());
        assert!(GregorianDate::new(2024, 1, 1, 0, 60, 0).is_err());
        assert!(GregorianDate::new(2024, 1, 1, 0, 0, 60).is_err());
        assert!(GregorianDate::new(2024, 4, 31, 0, 0, 0).is_err());
    }

    #[test]
    fn test_unrepresentable_interval() {
        assert!(GregorianDate::from_interval_since_reference(CalendarInterval::from_days(1e15)).is_err());
        assert!(
            GregorianDate::from_interval_since_reference(CalendarInterval::from_units(f64::NAN)).is_err()
        );
    }

    #[test]
    fn test_payload_round_trip() {
        let date = GregorianDate::new(2025, 4, 13, 9, 30, 15).unwrap();
        let payload = date.encode_payload().unwrap();
        assert_eq!(
            payload,
            r#"{"year":2025,"month":4,"day":13,"hour":9,"minute":30,"second":15,"nanosecond":0}"#
        );
        assert_eq!(GregorianDate::decode_payload(&payload).unwrap(), date);
        let short = r#"{"year":2025,"month":4,"day":13,"hour":9,"minute":30,"second":15}"#;
        assert_eq!(GregorianDate::decode_payload(short).unwrap(), date);
    }

    #[test]
    fn test_decode_rejects_impossible_date() {
        let payload = r#"{"year":2025,"month":2,"day":30,"hour":0,"minute":0,"second":0}"#;
        assert!(matches!(
            GregorianDate::decode_payload(payload),
            Err(CalendarError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ymd(1997, 10, 2).to_string(), "1997-10-02T00:00:00");
    }
}
