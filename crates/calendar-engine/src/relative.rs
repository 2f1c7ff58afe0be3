//! [`RelativeDate`]: a fixed offset from another date.

use serde::{Deserialize, Serialize};

use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::{CalendarError, Result};
use crate::interval::CalendarInterval;

/// `offset` after `base`.
///
/// This is what [`CalendarDate`] holds after `date + interval`. Adding to a
/// date that already holds a `RelativeDate` replaces the offset instead of
/// wrapping again, so the base is never itself the product of an addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDate {
    offset: CalendarInterval,
    base: CalendarDate,
}

impl RelativeDate {
    pub fn new(offset: CalendarInterval, base: CalendarDate) -> Self {
        Self { offset, base }
    }

    pub fn offset(&self) -> CalendarInterval {
        self.offset
    }

    pub fn base(&self) -> &CalendarDate {
        &self.base
    }
}

impl DateDefinition for RelativeDate {
    const IDENTIFIER: &'static str = "relative";

    /// The global epoch.
    fn reference_date() -> CalendarDate {
        CalendarDate::epoch()
    }

    /// An offset from the epoch itself.
    fn from_interval_since_reference(interval: CalendarInterval) -> Result<Self> {
        Ok(Self::new(interval, CalendarDate::epoch()))
    }

    fn interval_since_reference(&self) -> CalendarInterval {
        self.base.interval_since_epoch() + self.offset
    }

    fn encode_payload(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }

    fn decode_payload(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }
}
