//! The capability every calendar system implements.
//!
//! A [`DateDefinition`] is one calendar's way of naming an instant. It knows
//! its own reference instant (as a [`CalendarDate`]), can measure itself from
//! that reference, can be rebuilt from such a measurement, and can round-trip
//! its calendar-specific fields through an opaque string payload.
//!
//! [`CalendarDate`] stores definitions type-erased, so the trait also has a
//! crate-private object-safe companion, [`ErasedDefinition`], implemented for
//! every `DateDefinition`.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::calendar_date::CalendarDate;
use crate::error::Result;
use crate::interval::CalendarInterval;

/// A calendar system that can represent an instant.
///
/// # Implementing
///
/// Most definitions only provide the six required items; the instant since
/// the global epoch is derived from [`reference_date`](Self::reference_date).
/// A definition that *is* the epoch (the Hebrew calendar) overrides
/// [`interval_since_epoch`](Self::interval_since_epoch) and
/// [`from_interval_since_epoch`](Self::from_interval_since_epoch) instead.
///
/// Register custom definitions with [`registry::register`](crate::registry::register)
/// before decoding data that uses them; unregistered identifiers decode to
/// [`UnknownDate`](crate::UnknownDate).
pub trait DateDefinition: Clone + fmt::Debug + Send + Sync + 'static {
    /// Registry key for this definition type.
    const IDENTIFIER: &'static str;

    /// The identifier written into serialized dates.
    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::IDENTIFIER)
    }

    /// The instant this definition measures itself from.
    fn reference_date() -> CalendarDate;

    fn from_interval_since_reference(interval: CalendarInterval) -> Result<Self>;

    fn interval_since_reference(&self) -> CalendarInterval;

    /// Serialize only the defining fields.
    fn encode_payload(&self) -> Result<String>;

    fn decode_payload(payload: &str) -> Result<Self>;

    /// The instant since the global epoch.
    fn interval_since_epoch(&self) -> CalendarInterval {
        Self::reference_date().interval_since_epoch() + self.interval_since_reference()
    }

    fn from_interval_since_epoch(interval: CalendarInterval) -> Result<Self> {
        Self::from_interval_since_reference(interval - Self::reference_date().interval_since_epoch())
    }
}

/// Object-safe view of a [`DateDefinition`].
pub(crate) trait ErasedDefinition: fmt::Debug + Send + Sync {
    fn identifier(&self) -> Cow<'_, str>;
    fn interval_since_epoch(&self) -> CalendarInterval;
    fn encode_payload(&self) -> Result<String>;
    fn as_any(&self) -> &(dyn Any + Send + Sync);
}

impl<D: DateDefinition> ErasedDefinition for D {
    fn identifier(&self) -> Cow<'_, str> {
        DateDefinition::identifier(self)
    }

    fn interval_since_epoch(&self) -> CalendarInterval {
        DateDefinition::interval_since_epoch(self)
    }

    fn encode_payload(&self) -> Result<String> {
        DateDefinition::encode_payload(self)
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }
}
