//! Exact-ratio durations measured in a single integral unit.
//!
//! Every duration is stored as a count of base units, with
//! [`UNITS_PER_DAY`] = 129,600 units per day. Each supported [`TimeUnit`]
//! is an exact rational multiple of the base unit, so converting between
//! units introduces no drift beyond the precision of the [`Scalar`] itself:
//!
//! | Unit | Base units |
//! |------|-----------:|
//! | day | 129,600 |
//! | hour | 5,400 |
//! | minute | 90 |
//! | second | 3/2 |
//! | week | 907,200 |
//! | Hebrew part (1/1080 hour) | 5 |
//! | Hebrew moon (29d 12h 793p) | 3,827,165 |
//! | Gregorian leap cycle (146,097 days) | 18,934,171,200 |
//!
//! # Serialized form
//!
//! An interval serializes as `[units, units_per_day]` so the unit base is
//! self-describing. Deserializing data written with a different base rescales
//! it into the native one.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, Result};

// ── Unit constants ──────────────────────────────────────────────────────────

/// Base units in one day.
pub const UNITS_PER_DAY: u64 = 129_600;
pub const HOURS_PER_DAY: u64 = 24;
pub const MINUTES_PER_DAY: u64 = 1_440;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const DAYS_PER_WEEK: u64 = 7;
/// Hebrew parts (chalakim) in one hour.
pub const PARTS_PER_HOUR: u64 = 1_080;
pub const PARTS_PER_DAY: u64 = PARTS_PER_HOUR * HOURS_PER_DAY;
/// Days in the 400-year Gregorian leap cycle.
pub const DAYS_PER_GREGORIAN_CYCLE: u64 = 146_097;

const UNITS_PER_HOUR: u64 = UNITS_PER_DAY / HOURS_PER_DAY;
const UNITS_PER_PART: u64 = UNITS_PER_DAY / PARTS_PER_DAY;
const UNITS_PER_MOON: u64 = 29 * UNITS_PER_DAY + 12 * UNITS_PER_HOUR + 793 * UNITS_PER_PART;

const _: () = assert!(UNITS_PER_DAY % PARTS_PER_DAY == 0);
const _: () = assert!(UNITS_PER_DAY % MINUTES_PER_DAY == 0);
const _: () = assert!(SECONDS_PER_DAY * 3 == UNITS_PER_DAY * 2);

// ── Scalar ──────────────────────────────────────────────────────────────────

/// The numeric type an interval counts its base units in.
///
/// Implemented for `f64` (the default used throughout the crate) and `f32`.
pub trait Scalar:
    Copy
    + Default
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
    fn floor(self) -> Self;
    fn round(self) -> Self;
    fn is_finite(self) -> bool;

    /// Total order: numeric order for ordinary values, IEEE total order as a
    /// fallback when either side is NaN.
    fn compare(&self, other: &Self) -> Ordering;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    fn from_f64(value: f64) -> Self {
        value
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn floor(self) -> Self {
        f64::floor(self)
    }
    fn round(self) -> Self {
        f64::round(self)
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| f64::total_cmp(self, other))
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    fn from_f64(value: f64) -> Self {
        value as f32
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn floor(self) -> Self {
        f32::floor(self)
    }
    fn round(self) -> Self {
        f32::round(self)
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| f32::total_cmp(self, other))
    }
}

// ── TimeUnit ────────────────────────────────────────────────────────────────

/// Every unit an interval can be constructed from or read back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
    Week,
    /// 1/1080 of an hour.
    HebrewPart,
    /// The mean synodic month: 29 days, 12 hours, 793 parts.
    HebrewMoon,
    /// 400 Gregorian years.
    GregorianLeapCycle,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Week,
        TimeUnit::HebrewPart,
        TimeUnit::HebrewMoon,
        TimeUnit::GregorianLeapCycle,
    ];

    /// Base units in one of `self`, as an exact `(numerator, denominator)` ratio.
    pub const fn ratio(self) -> (u64, u64) {
        match self {
            TimeUnit::Day => (UNITS_PER_DAY, 1),
            TimeUnit::Hour => (UNITS_PER_HOUR, 1),
            TimeUnit::Minute => (UNITS_PER_DAY / MINUTES_PER_DAY, 1),
            TimeUnit::Second => (3, 2),
            TimeUnit::Week => (UNITS_PER_DAY * DAYS_PER_WEEK, 1),
            TimeUnit::HebrewPart => (UNITS_PER_PART, 1),
            TimeUnit::HebrewMoon => (UNITS_PER_MOON, 1),
            TimeUnit::GregorianLeapCycle => (UNITS_PER_DAY * DAYS_PER_GREGORIAN_CYCLE, 1),
        }
    }
}

// ── CalendarInterval ────────────────────────────────────────────────────────

/// A signed duration counted in base units (see the [module docs](self)).
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarInterval<S: Scalar = f64> {
    units: S,
}

macro_rules! unit_accessors {
    ($($unit:ident => $from:ident, $get:ident, $set:ident;)*) => {
        $(
            #[doc = concat!("An interval of `value` ", stringify!($get), ".")]
            pub fn $from(value: S) -> Self {
                Self::from_unit(value, TimeUnit::$unit)
            }

            #[doc = concat!("The interval measured in ", stringify!($get), ".")]
            pub fn $get(&self) -> S {
                self.in_unit(TimeUnit::$unit)
            }

            #[doc = concat!("Replace the interval with `value` ", stringify!($get), ".")]
            pub fn $set(&mut self, value: S) {
                self.set_unit(value, TimeUnit::$unit);
            }
        )*
    };
}

impl<S: Scalar> CalendarInterval<S> {
    pub const ZERO: Self = Self { units: S::ZERO };

    /// An interval of `units` base units.
    pub fn from_units(units: S) -> Self {
        Self { units }
    }

    /// The raw count of base units.
    pub fn units(&self) -> S {
        self.units
    }

    pub fn from_unit(value: S, unit: TimeUnit) -> Self {
        let (num, den) = unit.ratio();
        Self {
            units: value * S::from_f64(num as f64) / S::from_f64(den as f64),
        }
    }

    pub fn in_unit(&self, unit: TimeUnit) -> S {
        let (num, den) = unit.ratio();
        self.units * S::from_f64(den as f64) / S::from_f64(num as f64)
    }

    pub fn set_unit(&mut self, value: S, unit: TimeUnit) {
        *self = Self::from_unit(value, unit);
    }

    unit_accessors! {
        Day => from_days, days, set_days;
        Hour => from_hours, hours, set_hours;
        Minute => from_minutes, minutes, set_minutes;
        Second => from_seconds, seconds, set_seconds;
        Week => from_weeks, weeks, set_weeks;
        HebrewPart => from_hebrew_parts, hebrew_parts, set_hebrew_parts;
        HebrewMoon => from_hebrew_moons, hebrew_moons, set_hebrew_moons;
        GregorianLeapCycle => from_gregorian_leap_cycles, gregorian_leap_cycles, set_gregorian_leap_cycles;
    }

    /// How many whole `step`s fit in `self`, rounding toward negative infinity.
    pub fn count_whole(&self, step: Self) -> S {
        (self.units / step.units).floor()
    }

    /// `self` rounded down to a whole multiple of `step`.
    pub fn floor_to(&self, step: Self) -> Self {
        Self {
            units: self.count_whole(step) * step.units,
        }
    }

    /// The non-negative remainder of `self` after removing whole `step`s.
    pub fn rem_euclid(&self, step: Self) -> Self {
        *self - self.floor_to(step)
    }

    /// `self / other` as a plain scalar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DivisionByZero`] if `other` is the zero interval.
    pub fn ratio(&self, other: Self) -> Result<S> {
        if other.is_zero() {
            return Err(CalendarError::DivisionByZero);
        }
        Ok(self.units / other.units)
    }

    pub fn is_zero(&self) -> bool {
        self.units.compare(&S::ZERO) == Ordering::Equal
    }

    pub fn is_negative(&self) -> bool {
        self.units < S::ZERO
    }

    pub fn is_finite(&self) -> bool {
        self.units.is_finite()
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -*self
        } else {
            *self
        }
    }

    /// Split into whole days, hours and Hebrew parts plus any sub-part remainder.
    pub fn components(&self) -> IntervalComponents {
        let units = self.units.to_f64();
        let negative = units < 0.0;
        let abs = units.abs();

        let days = (abs / UNITS_PER_DAY as f64).floor();
        let remainder = abs - days * UNITS_PER_DAY as f64;
        let hours = (remainder / UNITS_PER_HOUR as f64).floor();
        let remainder = remainder - hours * UNITS_PER_HOUR as f64;
        let parts = (remainder / UNITS_PER_PART as f64).floor();
        let remainder = remainder - parts * UNITS_PER_PART as f64;

        IntervalComponents {
            negative,
            days: days as u64,
            hours: hours as u8,
            parts: parts as u16,
            remainder_units: remainder,
        }
    }
}

/// The decomposition returned by [`CalendarInterval::components`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalComponents {
    pub negative: bool,
    pub days: u64,
    /// 0-23.
    pub hours: u8,
    /// 0-1079.
    pub parts: u16,
    /// Base units smaller than one part (0 to <5).
    pub remainder_units: f64,
}

impl fmt::Display for IntervalComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = Vec::new();
        if self.days > 0 {
            pieces.push(format!("{}d", self.days));
        }
        if self.hours > 0 {
            pieces.push(format!("{}h", self.hours));
        }
        if self.parts > 0 || pieces.is_empty() {
            pieces.push(format!("{}p", self.parts));
        }
        if self.remainder_units > 0.0 {
            pieces.push(format!("{}u", self.remainder_units));
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&pieces.join(" "))
    }
}

impl<S: Scalar> fmt::Display for CalendarInterval<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.components(), f)
    }
}

// ── Ordering ────────────────────────────────────────────────────────────────

impl<S: Scalar> PartialEq for CalendarInterval<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Scalar> Eq for CalendarInterval<S> {}

impl<S: Scalar> PartialOrd for CalendarInterval<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Scalar> Ord for CalendarInterval<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.units.compare(&other.units)
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

impl<S: Scalar> Add for CalendarInterval<S> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            units: self.units + rhs.units,
        }
    }
}

impl<S: Scalar> Sub for CalendarInterval<S> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            units: self.units - rhs.units,
        }
    }
}

impl<S: Scalar> Neg for CalendarInterval<S> {
    type Output = Self;
    fn neg(self) -> Self {
        Self { units: -self.units }
    }
}

impl<S: Scalar> Mul<S> for CalendarInterval<S> {
    type Output = Self;
    fn mul(self, rhs: S) -> Self {
        Self {
            units: self.units * rhs,
        }
    }
}

impl<S: Scalar> Div<S> for CalendarInterval<S> {
    type Output = Self;
    fn div(self, rhs: S) -> Self {
        Self {
            units: self.units / rhs,
        }
    }
}

impl<S: Scalar> AddAssign for CalendarInterval<S> {
    fn add_assign(&mut self, rhs: Self) {
        self.units = self.units + rhs.units;
    }
}

impl<S: Scalar> SubAssign for CalendarInterval<S> {
    fn sub_assign(&mut self, rhs: Self) {
        self.units = self.units - rhs.units;
    }
}

impl<S: Scalar> Sum for CalendarInterval<S> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// ── Serde ───────────────────────────────────────────────────────────────────

impl<S: Scalar> Serialize for CalendarInterval<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        (self.units.to_f64(), UNITS_PER_DAY).serialize(serializer)
    }
}

impl<'de, S: Scalar> Deserialize<'de> for CalendarInterval<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (units, units_per_day) = <(f64, u64)>::deserialize(deserializer)?;
        if units_per_day == 0 {
            return Err(D::Error::custom("units_per_day must be positive"));
        }
        let native = if units_per_day == UNITS_PER_DAY {
            units
        } else {
            units * UNITS_PER_DAY as f64 / units_per_day as f64
        };
        Ok(Self::from_units(S::from_f64(native)))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_day_is_exact_in_parts_and_seconds() {
        let day = CalendarInterval::from_days(1.0);
        assert_eq!(day.hebrew_parts(), 25_920.0);
        assert_eq!(day.seconds(), 86_400.0);
        assert_eq!(day.units(), 129_600.0);
    }

    #[test]
    fn test_moon_length() {
        let moon = CalendarInterval::<f64>::from_hebrew_moons(1.0);
        let expected = CalendarInterval::from_days(29.0)
            + CalendarInterval::from_hours(12.0)
            + CalendarInterval::from_hebrew_parts(793.0);
        assert_eq!(moon, expected);
        assert_eq!(moon.units(), 3_827_165.0);
    }

    #[test]
    fn test_unit_ratios() {
        assert_eq!(CalendarInterval::<f64>::from_hours(1.0).units(), 5_400.0);
        assert_eq!(CalendarInterval::<f64>::from_minutes(1.0).units(), 90.0);
        assert_eq!(CalendarInterval::<f64>::from_seconds(2.0).units(), 3.0);
        assert_eq!(CalendarInterval::<f64>::from_weeks(1.0).days(), 7.0);
        assert_eq!(CalendarInterval::<f64>::from_hebrew_parts(1080.0).hours(), 1.0);
        assert_eq!(
            CalendarInterval::<f64>::from_gregorian_leap_cycles(1.0).days(),
            146_097.0
        );
    }

    #[test]
    fn test_part_in_seconds() {
        // 18 parts = 1 minute
        let parts = CalendarInterval::<f64>::from_hebrew_parts(18.0);
        assert_eq!(parts.seconds(), 60.0);
    }

    #[test]
    fn test_set_pivots_through_base_unit() {
        let mut interval = CalendarInterval::from_days(3.0);
        interval.set_hours(36.0);
        assert_eq!(interval.days(), 1.5);
        interval.set_seconds(90.0);
        assert_eq!(interval.minutes(), 1.5);
    }

    #[test]
    fn test_arithmetic_is_closed() {
        let a = CalendarInterval::from_days(2.0);
        let b = CalendarInterval::from_hours(12.0);
        assert_eq!((a + b).hours(), 60.0);
        assert_eq!((a - b).hours(), 36.0);
        assert_eq!((b * 4.0).days(), 2.0);
        assert_eq!((a / 4.0).hours(), 12.0);
        assert_eq!((-a).days(), -2.0);
        let total: CalendarInterval = [a, b, b].into_iter().sum();
        assert_eq!(total.days(), 3.0);
    }

    #[test]
    fn test_ordering() {
        let a = CalendarInterval::from_hours(25.0);
        let b = CalendarInterval::from_days(1.0);
        assert!(a > b);
        assert_eq!(a.max(b), a);
        assert_eq!(CalendarInterval::<f64>::from_units(0.0), -CalendarInterval::from_units(0.0));
    }

    #[test]
    fn test_ratio_by_zero_is_error() {
        let a = CalendarInterval::from_days(1.0);
        assert_eq!(a.ratio(CalendarInterval::ZERO), Err(CalendarError::DivisionByZero));
        assert_eq!(a.ratio(CalendarInterval::from_hours(6.0)), Ok(4.0));
    }

    #[test]
    fn test_floor_and_rem_euclid_round_toward_negative_infinity() {
        let day = CalendarInterval::from_days(1.0);
        let negative = CalendarInterval::from_hours(-6.0);
        assert_eq!(negative.floor_to(day), CalendarInterval::from_days(-1.0));
        assert_eq!(negative.rem_euclid(day), CalendarInterval::from_hours(18.0));
        assert_eq!(negative.count_whole(day), -1.0);
    }

    #[test]
    fn test_components_and_display() {
        let interval = CalendarInterval::from_days(1.0)
            + CalendarInterval::from_hours(2.0)
            + CalendarInterval::from_hebrew_parts(3.0);
        let components = interval.components();
        assert_eq!(components.days, 1);
        assert_eq!(components.hours, 2);
        assert_eq!(components.parts, 3);
        assert!(!components.negative);
        assert_eq!(interval.to_string(), "1d 2h 3p");
        assert_eq!((-interval).to_string(), "-1d 2h 3p");
        assert_eq!(CalendarInterval::<f64>::ZERO.to_string(), "0p");
        assert_eq!(CalendarInterval::<f64>::from_seconds(1.0).to_string(), "0p 1.5u");
    }

    #[test]
    fn test_serializes_with_unit_base() {
        let json = serde_json::to_string(&CalendarInterval::from_days(2.0)).unwrap();
        assert_eq!(json, "[259200.0,129600]");
        let back: CalendarInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back.days(), 2.0);
    }

    #[test]
    fn test_deserialize_rescales_foreign_base() {
        // Written by a store counting seconds.
        let interval: CalendarInterval = serde_json::from_str("[86400, 86400]").unwrap();
        assert_eq!(interval.days(), 1.0);
        assert!(serde_json::from_str::<CalendarInterval>("[1, 0]").is_err());
    }

    #[test]
    fn test_f32_scalar() {
        let day = CalendarInterval::<f32>::from_days(1.0);
        assert_eq!(day.hebrew_parts(), 25_920.0);
        assert_eq!(day.seconds(), 86_400.0);
    }
}
