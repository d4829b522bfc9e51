//! The capability shared by all payment instruments.

use serde::Serialize;
use serde_json::{Map, Value};

use super::request::ChargeRequest;
use crate::config::RaveConfig;

/// A payment instrument that can be charged.
///
/// Implementations are pure: they turn data into a payload and resolve
/// endpoints, but never perform IO themselves.
pub trait Chargeable: Send + Sync {
    /// Serializes the charge payload: the applicable envelope fields merged
    /// with the instrument's own fields and flags.
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error>;

    /// URL the charge is posted to: the instance override if set, otherwise
    /// the well-known endpoint for this instrument.
    fn charge_url(&self, config: &RaveConfig) -> String;

    /// URL for OTP validation of a pending charge, if the instrument has one.
    fn validate_url(&self, _config: &RaveConfig) -> Option<String> {
        None
    }
}

/// Merges an instrument's fields over the serialized envelope.
///
/// Keys produced by `fields` win over envelope keys of the same name.
pub(crate) fn merge_payload<F: Serialize>(
    request: &ChargeRequest,
    fields: &F,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut payload = match serde_json::to_value(request)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(extra) = serde_json::to_value(fields)? {
        payload.extend(extra);
    }
    serde_json::to_vec(&Value::Object(payload))
}

/// Resolves an endpoint override, falling back to `default`.
pub(crate) fn resolve(endpoint: Option<&str>, default: impl FnOnce() -> String) -> String {
    match endpoint {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => default(),
    }
}
