//! [`HostDate`]: bridge to the host platform's clock type,
//! `chrono::DateTime<Utc>`.
//!
//! The reference instant is the Unix epoch, 1970-01-01T00:00:00Z, expressed
//! as a [`GregorianDate`]. The payload is the RFC 3339 text of the datetime.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::{CalendarError, Result};
use crate::gregorian::{seconds_from_time_delta, time_delta_from_seconds, GregorianDate};
use crate::interval::CalendarInterval;

static REFERENCE_DATE: LazyLock<CalendarDate> = LazyLock::new(|| {
    CalendarDate::new(GregorianDate::from_datetime(DateTime::UNIX_EPOCH.naive_utc()))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostDate(DateTime<Utc>);

impl HostDate {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// The current instant according to the host clock.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Parse an RFC 3339 datetime, converting any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDatetime`] if `s` is not RFC 3339.
    pub fn parse_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CalendarError::InvalidDatetime(format!("'{s}': {e}")))
    }

    /// RFC 3339 text in UTC with a `Z` suffix, e.g. `1970-01-01T00:00:00Z`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<DateTime<Utc>> for HostDate {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }
}

impl DateDefinition for HostDate {
    const IDENTIFIER: &'static str = "host";

    fn reference_date() -> CalendarDate {
        REFERENCE_DATE.clone()
    }

    fn from_interval_since_reference(interval: CalendarInterval) -> Result<Self> {
        let delta = time_delta_from_seconds(interval.seconds())?;
        DateTime::UNIX_EPOCH
            .checked_add_signed(delta)
            .map(Self)
            .ok_or_else(|| {
                CalendarError::InvalidDatetime(format!(
                    "{interval} from the Unix epoch is out of range"
                ))
            })
    }

    fn interval_since_reference(&self) -> CalendarInterval {
        CalendarInterval::from_seconds(seconds_from_time_delta(self.0 - DateTime::UNIX_EPOCH))
    }

    fn encode_payload(&self) -> Result<String> {
        Ok(self.to_rfc3339())
    }

    fn decode_payload(payload: &str) -> Result<Self> {
        Self::parse_rfc3339(payload).map_err(|e| CalendarError::payload(Self::IDENTIFIER, e))
    }
}
