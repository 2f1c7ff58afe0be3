//! Process-wide map from definition identifiers to payload decoders.
//!
//! The registry is created on first use, seeded with the built-in
//! definitions ([`HebrewDate`], [`GregorianDate`], [`RelativeDate`],
//! [`HostDate`]). Custom definitions must be registered before decoding
//! serialized dates that use them, otherwise those dates decode to
//! [`UnknownDate`](crate::UnknownDate). Entries live for the rest of the
//! process; there is no removal.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::calendar_date::CalendarDate;
use crate::definition::DateDefinition;
use crate::error::Result;
use crate::gregorian::GregorianDate;
use crate::hebrew::HebrewDate;
use crate::host::HostDate;
use crate::relative::RelativeDate;

/// Rebuilds a [`CalendarDate`] from a definition's opaque payload.
pub type Decoder = fn(&str) -> Result<CalendarDate>;

static DECODERS: LazyLock<RwLock<HashMap<String, Decoder>>> = LazyLock::new(|| {
    let mut m: HashMap<String, Decoder> = HashMap::new();
    m.insert(HebrewDate::IDENTIFIER.to_string(), decode_as::<HebrewDate>);
    m.insert(GregorianDate::IDENTIFIER.to_string(), decode_as::<GregorianDate>);
    m.insert(RelativeDate::IDENTIFIER.to_string(), decode_as::<RelativeDate>);
    m.insert(HostDate::IDENTIFIER.to_string(), decode_as::<HostDate>);
    RwLock::new(m)
});

fn decode_as<D: DateDefinition>(payload: &str) -> Result<CalendarDate> {
    D::decode_payload(payload).map(CalendarDate::new)
}

/// Register `D` under [`D::IDENTIFIER`](DateDefinition::IDENTIFIER).
///
/// Do not register [`UnknownDate`](crate::UnknownDate): it cannot be decoded.
pub fn register<D: DateDefinition>() {
    register_decoder(D::IDENTIFIER, decode_as::<D>);
}

/// Register an arbitrary decoder under `identifier`, replacing any previous one.
pub fn register_decoder(identifier: impl Into<String>, decoder: Decoder) {
    let identifier = identifier.into();
    let previous = DECODERS.write().insert(identifier.clone(), decoder);
    if previous.is_some() {
        warn!(identifier = %identifier, "replaced calendar decoder");
    } else {
        debug!(identifier = %identifier, "registered calendar decoder");
    }
}

/// The decoder registered under `identifier`, if any.
pub fn resolve(identifier: &str) -> Option<Decoder> {
    DECODERS.read().get(identifier).copied()
}

/// Whether a decoder is registered under `identifier`.
pub fn is_registered(identifier: &str) -> bool {
    DECODERS.read().contains_key(identifier)
}

/// All registered identifiers, sorted.
pub fn identifiers() -> Vec<String> {
    let mut ids: Vec<String> = DECODERS.read().keys().cloned().collect();
    ids.sort();
    ids
}
