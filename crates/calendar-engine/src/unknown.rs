//! [`UnknownDate`]: placeholder for dates written by a calendar this process
//! has not registered.
//!
//! It keeps the identifier, the opaque payload and the instant exactly as
//! they were read, so the date still compares, sorts and re-encodes
//! correctly. It cannot be rebuilt from an instant or decoded from a
//! payload; both panic.

use std::borrow::Cow;

use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::Result;
use crate::interval::CalendarInterval;

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownDate {
    identifier: String,
    payload: String,
    instant: CalendarInterval,
}

impl UnknownDate {
    pub fn new(identifier: impl Into<String>, payload: impl Into<String>, instant: CalendarInterval) -> Self {
        Self {
            identifier: identifier.into(),
            payload: payload.into(),
            instant,
        }
    }

    /// The payload exactly as it was decoded.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl DateDefinition for UnknownDate {
    /// Never written: [`identifier`](DateDefinition::identifier) reports the
    /// identifier that was read.
    const IDENTIFIER: &'static str = "unknown";

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.identifier)
    }

    fn reference_date() -> CalendarDate {
        CalendarDate::epoch()
    }

    /// # Panics
    ///
    /// Always; an unknown calendar cannot name an arbitrary instant.
    fn from_interval_since_reference(_interval: CalendarInterval) -> Result<Self> {
        panic!("UnknownDate cannot be constructed from an interval")
    }

    fn interval_since_reference(&self) -> CalendarInterval {
        self.instant
    }

    fn encode_payload(&self) -> Result<String> {
        Ok(self.payload.clone())
    }

    /// # Panics
    ///
    /// Always; the payload belongs to a calendar this process does not know.
    fn decode_payload(_payload: &str) -> Result<Self> {
        panic!("UnknownDate cannot decode a payload")
    }

    fn interval_since_epoch(&self) -> CalendarInterval {
        self.instant
    }
}
