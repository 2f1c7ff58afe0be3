//! [`CalendarDate`]: one instant, held in whichever calendar it was built
//! from, viewable in any other.
//!
//! Equality, ordering and subtraction compare the instant since the global
//! epoch and never look at which definition a date holds. Conversions to
//! other definitions are memoized per target type. Clones share the memo
//! table until one of them is mutated; every mutation installs a fresh,
//! empty table, so a cached conversion always belongs to the current instant.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc, Weekday};
use parking_lot::Mutex;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::definition::{DateDefinition, ErasedDefinition};
use crate::error::Result;
use crate::gregorian::GregorianDate;
use crate::hebrew::{self, HebrewDate, HebrewDay, HebrewHour, HebrewMonth, HebrewPart, HebrewYear};
use crate::host::HostDate;
use crate::interval::CalendarInterval;
use crate::registry;
use crate::relative::RelativeDate;
use crate::unknown::UnknownDate;

type ConversionCache = Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static EPOCH: LazyLock<CalendarDate> = LazyLock::new(|| CalendarDate::new(HebrewDate::epoch()));

/// An instant in time, stored as exactly one [`DateDefinition`].
///
/// # Examples
///
/// ```
/// use calendar_engine::{CalendarDate, HebrewMonth};
///
/// let rosh_hashanah = CalendarDate::hebrew(5785, HebrewMonth::Tishrei, 1, 6, 0).unwrap();
/// let civil = CalendarDate::gregorian(2024, 10, 3, 0, 0, 0).unwrap();
/// assert_eq!(rosh_hashanah, civil);
/// assert_eq!(civil.hebrew_year().unwrap().get(), 5785);
/// ```
#[derive(Clone)]
pub struct CalendarDate {
    definition: Arc<dyn ErasedDefinition>,
    cache: Arc<ConversionCache>,
}

impl CalendarDate {
    pub fn new<D: DateDefinition>(definition: D) -> Self {
        Self {
            definition: Arc::new(definition),
            cache: Arc::default(),
        }
    }

    /// 1 Tishrei 5758, hour 0, part 0 (1997-10-01T18:00).
    pub fn epoch() -> Self {
        EPOCH.clone()
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`](crate::CalendarError::OutOfRange)
    /// if `day`, `hour` or `part` is outside its legal range.
    pub fn hebrew(year: i64, month: HebrewMonth, day: u8, hour: u8, part: u16) -> Result<Self> {
        HebrewDate::from_fields(year, month, day, hour, part).map(Self::new)
    }

    /// # Errors
    ///
    /// Returns an error if the fields do not name a real proleptic Gregorian
    /// date and time.
    pub fn gregorian(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        GregorianDate::new(year, month, day, hour, minute, second).map(Self::new)
    }

    /// Wrap a host timestamp as a [`HostDate`].
    pub fn from_host(datetime: DateTime<Utc>) -> Self {
        Self::new(HostDate::new(datetime))
    }

    /// The current instant according to the host clock.
    pub fn now() -> Self {
        Self::from_host(Utc::now())
    }

    /// Time since 1 Tishrei 5758, hour 0, part 0.
    pub fn interval_since_epoch(&self) -> CalendarInterval {
        self.definition.interval_since_epoch()
    }

    /// Identifier of the stored definition.
    pub fn identifier(&self) -> Cow<'_, str> {
        self.definition.identifier()
    }

    /// The stored definition, if it is a `D`.
    pub fn definition<D: DateDefinition>(&self) -> Option<&D> {
        self.definition.as_any().downcast_ref::<D>()
    }

    /// Replace the stored definition, discarding all cached conversions.
    pub fn set_definition<D: DateDefinition>(&mut self, definition: D) {
        self.definition = Arc::new(definition);
        self.cache = Arc::default();
    }

    /// View this instant as a `D`.
    ///
    /// Returns the stored definition itself when it already is a `D`;
    /// otherwise rebuilds a `D` from the instant and memoizes it.
    ///
    /// # Errors
    ///
    /// Returns whatever `D` reports when it cannot represent the instant.
    ///
    /// # Panics
    ///
    /// Converting into [`UnknownDate`] from any other definition panics.
    pub fn convert<D: DateDefinition>(&self) -> Result<D> {
        if let Some(own) = self.definition::<D>() {
            return Ok(own.clone());
        }

        let key = TypeId::of::<D>();
        let cached = self
            .cache
            .lock()
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<D>().cloned());
        if let Some(hit) = cached {
            trace!(target_definition = D::IDENTIFIER, "conversion cache hit");
            return Ok(hit);
        }

        trace!(target_definition = D::IDENTIFIER, "conversion cache miss");
        let converted = D::from_interval_since_epoch(self.interval_since_epoch())?;
        self.cache.lock().insert(key, Arc::new(converted.clone()));
        Ok(converted)
    }

    /// This date moved by `interval`.
    ///
    /// A date that already holds a [`RelativeDate`] gets a new offset from
    /// the same base, so repeated additions never nest.
    pub fn offset_by(&self, interval: CalendarInterval) -> Self {
        match self.definition::<RelativeDate>() {
            Some(relative) => {
                Self::new(RelativeDate::new(relative.offset() + interval, relative.base().clone()))
            }
            None => Self::new(RelativeDate::new(interval, self.clone())),
        }
    }

    // ── Hebrew fields ───────────────────────────────────────────────────────

    /// This instant as a [`HebrewDate`], memoized.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::IntervalOutOfRange`](crate::CalendarError::IntervalOutOfRange)
    /// if the instant is not finite or too far from the epoch.
    pub fn hebrew_date(&self) -> Result<HebrewDate> {
        self.convert::<HebrewDate>()
    }

    pub fn hebrew_year(&self) -> Result<HebrewYear> {
        Ok(self.hebrew_date()?.year())
    }

    pub fn hebrew_month(&self) -> Result<HebrewMonth> {
        Ok(self.hebrew_date()?.month())
    }

    pub fn hebrew_day(&self) -> Result<HebrewDay> {
        Ok(self.hebrew_date()?.day())
    }

    pub fn hebrew_hour(&self) -> Result<HebrewHour> {
        Ok(self.hebrew_date()?.hour())
    }

    pub fn hebrew_part(&self) -> Result<HebrewPart> {
        Ok(self.hebrew_date()?.part())
    }

    /// Weekday of the Hebrew day containing this instant, which begins at
    /// 18:00 of the previous civil day.
    pub fn hebrew_weekday(&self) -> Weekday {
        hebrew::weekday_of(self.interval_since_epoch())
    }

    // ── Gregorian fields ────────────────────────────────────────────────────

    pub fn gregorian_date(&self) -> Result<GregorianDate> {
        self.convert::<GregorianDate>()
    }

    pub fn gregorian_year(&self) -> Result<i32> {
        Ok(self.gregorian_date()?.year())
    }

    pub fn gregorian_month(&self) -> Result<u32> {
        Ok(self.gregorian_date()?.month())
    }

    pub fn gregorian_day(&self) -> Result<u32> {
        Ok(self.gregorian_date()?.day())
    }

    pub fn gregorian_hour(&self) -> Result<u32> {
        Ok(self.gregorian_date()?.hour())
    }

    pub fn gregorian_minute(&self) -> Result<u32> {
        Ok(self.gregorian_date()?.minute())
    }

    pub fn gregorian_second(&self) -> Result<u32> {
        Ok(self.gregorian_date()?.second())
    }

    pub fn host_datetime(&self) -> Result<DateTime<Utc>> {
        Ok(self.convert::<HostDate>()?.datetime())
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarDate")
            .field("definition", &self.definition)
            .field("instant", &self.interval_since_epoch())
            .finish()
    }
}

// ── Comparison ──────────────────────────────────────────────────────────────

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.interval_since_epoch() == other.interval_since_epoch()
    }
}

impl Eq for CalendarDate {}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.interval_since_epoch().cmp(&other.interval_since_epoch())
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

impl Sub for &CalendarDate {
    type Output = CalendarInterval;

    fn sub(self, other: &CalendarDate) -> CalendarInterval {
        self.interval_since_epoch() - other.interval_since_epoch()
    }
}

impl Sub for CalendarDate {
    type Output = CalendarInterval;

    fn sub(self, other: CalendarDate) -> CalendarInterval {
        &self - &other
    }
}

impl Add<CalendarInterval> for &CalendarDate {
    type Output = CalendarDate;

    fn add(self, interval: CalendarInterval) -> CalendarDate {
        self.offset_by(interval)
    }
}

impl Add<CalendarInterval> for CalendarDate {
    type Output = CalendarDate;

    fn add(self, interval: CalendarInterval) -> CalendarDate {
        self.offset_by(interval)
    }
}

impl Sub<CalendarInterval> for &CalendarDate {
    type Output = CalendarDate;

    fn sub(self, interval: CalendarInterval) -> CalendarDate {
        self.offset_by(-interval)
    }
}

impl Sub<CalendarInterval> for CalendarDate {
    type Output = CalendarDate;

    fn sub(self, interval: CalendarInterval) -> CalendarDate {
        self.offset_by(-interval)
    }
}

impl AddAssign<CalendarInterval> for CalendarDate {
    fn add_assign(&mut self, interval: CalendarInterval) {
        *self = self.offset_by(interval);
    }
}

impl SubAssign<CalendarInterval> for CalendarDate {
    fn sub_assign(&mut self, interval: CalendarInterval) {
        *self = self.offset_by(-interval);
    }
}

// ── Serde ───────────────────────────────────────────────────────────────────

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let payload = self.definition.encode_payload().map_err(S::Error::custom)?;
        (self.identifier(), payload, self.interval_since_epoch()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (identifier, payload, instant) =
            <(String, String, CalendarInterval)>::deserialize(deserializer)?;
        match registry::resolve(&identifier) {
            Some(decoder) => decoder(&payload).map_err(D::Error::custom),
            None => {
                debug!(identifier = %identifier, "unregistered calendar, keeping payload opaque");
                Ok(Self::new(UnknownDate::new(identifier, payload, instant)))
            }
        }
    }
}
