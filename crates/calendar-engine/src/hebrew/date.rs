//! [`HebrewDate`]: the Hebrew calendar as a [`DateDefinition`].
//!
//! The forward direction (fields to instant) is closed-form: year start by
//! molad arithmetic and postponements, plus month offset, plus elapsed days,
//! hours and parts. The postponements make year starts discontinuous, so the
//! inverse is a search: estimate the year from the mean year length, then
//! step towards the unique year whose start is at or before the instant and
//! whose successor's start is after it.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    day, weekday_of, HebrewDay, HebrewHour, HebrewMonth, HebrewMonthAndYear, HebrewPart,
    HebrewYear, MONTHS_PER_LEAP_CYCLE, REFERENCE_YEAR, YEARS_PER_LEAP_CYCLE,
};
use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::{CalendarError, Result};
use crate::interval::CalendarInterval;

/// Years either side of [`REFERENCE_YEAR`] the inverse search accepts.
const MAX_YEAR_OFFSET: i64 = 1_000_000;

/// Bound on year-search steps. The mean-year estimate is at most a year off.
const MAX_SEARCH_STEPS: u32 = 16;

/// Instants closer than this many units to a part boundary are read as
/// lying on it. Covers the nanosecond rounding of civil conversions.
const PART_SNAP_TOLERANCE: f64 = 1e-5;

/// A Hebrew date and time of day, down to the part.
///
/// Construction normalizes the fields: the month is corrected for the year
/// and an overflowing day is carried into the following months. The instant
/// since the epoch is computed once, at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HebrewDate {
    year: HebrewYear,
    month: HebrewMonth,
    day: HebrewDay,
    hour: HebrewHour,
    part: HebrewPart,
    interval: CalendarInterval,
}

impl HebrewDate {
    /// Build from typed fields, correcting the month for the year and
    /// carrying a day past the end of its month.
    pub fn new(
        year: HebrewYear,
        month: HebrewMonth,
        day: HebrewDay,
        hour: HebrewHour,
        part: HebrewPart,
    ) -> Self {
        let (day, month, year) = day.correct(month, year);
        let interval = HebrewMonthAndYear::new(month, year).start()
            + CalendarInterval::from_days(f64::from(day.get() - 1))
            + CalendarInterval::from_hours(f64::from(hour.get()))
            + CalendarInterval::from_hebrew_parts(f64::from(part.get()));
        Self {
            year,
            month,
            day,
            hour,
            part,
            interval,
        }
    }

    /// Build from raw field values.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if `day`, `hour` or `part` is
    /// outside its legal range.
    pub fn from_fields(year: i64, month: HebrewMonth, day: u8, hour: u8, part: u16) -> Result<Self> {
        Ok(Self::new(
            HebrewYear::new(year),
            month,
            HebrewDay::new(day)?,
            HebrewHour::new(hour)?,
            HebrewPart::new(part)?,
        ))
    }

    /// 1 Tishrei 5758, hour 0, part 0: the zero of every instant.
    pub fn epoch() -> Self {
        Self::new(
            HebrewYear::new(REFERENCE_YEAR),
            HebrewMonth::Tishrei,
            HebrewDay::FIRST,
            HebrewHour::FIRST,
            HebrewPart::ZERO,
        )
    }

    /// Year, after correction.
    pub fn year(&self) -> HebrewYear {
        self.year
    }

    /// Month, always valid for [`year`](Self::year).
    pub fn month(&self) -> HebrewMonth {
        self.month
    }

    /// Day of the month, never past its last day.
    pub fn day(&self) -> HebrewDay {
        self.day
    }

    /// Hour 0 begins at 18:00 civil time.
    pub fn hour(&self) -> HebrewHour {
        self.hour
    }

    /// Parts (1/1080 hour) into the hour.
    pub fn part(&self) -> HebrewPart {
        self.part
    }

    pub fn month_and_year(&self) -> HebrewMonthAndYear {
        HebrewMonthAndYear::new(self.month, self.year)
    }

    /// Weekday of the Hebrew day, which begins the civil evening before.
    pub fn weekday(&self) -> chrono::Weekday {
        weekday_of(self.interval)
    }

    /// Decompose an instant since the epoch into Hebrew fields.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::IntervalOutOfRange`] if `instant` is not
    /// finite or lies more than a million years from the reference year.
    pub fn from_instant(instant: CalendarInterval) -> Result<Self> {
        let instant = snap_to_part(instant);
        let year = locate_year(instant)?;
        let mut remainder = instant - year.interval_from_reference_date();

        let mut month = HebrewMonth::Tishrei;
        for &candidate in year.months() {
            month = candidate;
            let length = CalendarInterval::from_days(f64::from(candidate.number_of_days(year)));
            if remainder < length {
                break;
            }
            remainder -= length;
        }

        let one_day = day();
        let one_hour = CalendarInterval::from_hours(1.0);
        let one_part = CalendarInterval::from_hebrew_parts(1.0);

        let days = remainder.count_whole(one_day);
        let remainder = remainder.rem_euclid(one_day);
        let hours = remainder.count_whole(one_hour);
        let parts = remainder.rem_euclid(one_hour).count_whole(one_part);

        Ok(Self::new(
            year,
            month,
            HebrewDay::new(days as u8 + 1)?,
            HebrewHour::new(hours as u8)?,
            HebrewPart::new(parts as u16)?,
        ))
    }
}

/// `instant` moved onto the nearest part boundary when within
/// [`PART_SNAP_TOLERANCE`] of it.
fn snap_to_part(instant: CalendarInterval) -> CalendarInterval {
    let parts = instant.hebrew_parts();
    let nearest = parts.round();
    let snapped = CalendarInterval::from_hebrew_parts(nearest);
    if (snapped - instant).units().abs() < PART_SNAP_TOLERANCE {
        snapped
    } else {
        instant
    }
}

/// The year whose span `[start, next start)` contains `instant`.
fn locate_year(instant: CalendarInterval) -> Result<HebrewYear> {
    if !instant.is_finite() {
        return Err(CalendarError::IntervalOutOfRange(format!(
            "{} is not a finite instant",
            instant.units()
        )));
    }

    let mean_year = CalendarInterval::from_hebrew_moons(MONTHS_PER_LEAP_CYCLE as f64)
        / YEARS_PER_LEAP_CYCLE as f64;
    let years = instant.units() / mean_year.units();
    if years.abs() > MAX_YEAR_OFFSET as f64 {
        return Err(CalendarError::IntervalOutOfRange(format!(
            "{instant} is more than {MAX_YEAR_OFFSET} years from {REFERENCE_YEAR}"
        )));
    }

    let mut year = HebrewYear::new(REFERENCE_YEAR + years.round() as i64);
    for step in 0..MAX_SEARCH_STEPS {
        trace!(step, year = year.get(), "hebrew year search");
        if instant < year.interval_from_reference_date() {
            year = year.previous();
        } else if instant >= year.next().interval_from_reference_date() {
            year = year.next();
        } else {
            return Ok(year);
        }
    }

    Err(CalendarError::IntervalOutOfRange(format!(
        "no Hebrew year found for {instant} within {MAX_SEARCH_STEPS} steps"
    )))
}

#[derive(Serialize, Deserialize)]
struct Payload {
    year: HebrewYear,
    month: HebrewMonth,
    day: HebrewDay,
    hour: HebrewHour,
    part: HebrewPart,
}

impl DateDefinition for HebrewDate {
    const IDENTIFIER: &'static str = "hebrew";

    /// # Panics
    ///
    /// Always. The global epoch is itself a Hebrew date, so the Hebrew
    /// calendar has no other date to be measured from.
    fn reference_date() -> CalendarDate {
        panic!("HebrewDate defines the global epoch and has no reference date")
    }

    fn from_interval_since_reference(interval: CalendarInterval) -> Result<Self> {
        Self::from_instant(interval)
    }

    fn interval_since_reference(&self) -> CalendarInterval {
        self.interval
    }

    fn encode_payload(&self) -> Result<String> {
        let payload = Payload {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            part: self.part,
        };
        serde_json::to_string(&payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }

    fn decode_payload(payload: &str) -> Result<Self> {
        let Payload {
            year,
            month,
            day,
            hour,
            part,
        } = serde_json::from_str(payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))?;
        Ok(Self::new(year, month, day, hour, part))
    }

    fn interval_since_epoch(&self) -> CalendarInterval {
        self.interval
    }

    fn from_interval_since_epoch(interval: CalendarInterval) -> Result<Self> {
        Self::from_instant(interval)
    }
}
