//! The common charge envelope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields shared by every charge, regardless of payment instrument.
///
/// The caller fills this in before charging. An empty `public_key` is
/// replaced with the configured default at charge time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    #[serde(rename = "PBFPubKey")]
    pub public_key: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "IP", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Merchant's own reference for the transaction
    #[serde(rename = "txRef", skip_serializing_if = "Option::is_none")]
    pub tx_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(rename = "phonenumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Auth model to use, typically echoed back from an `AUTH_SUGGESTION` response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_auth: Option<String>,
}

impl ChargeRequest {
    /// Creates a request for `amount` with a freshly generated transaction reference.
    pub fn new(amount: f64, email: impl Into<String>) -> Self {
        Self {
            amount,
            email: Some(email.into()),
            tx_ref: Some(generate_tx_ref()),
            ..Self::default()
        }
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = public_key.into();
        self
    }

    pub fn with_suggested_auth(mut self, auth: impl Into<String>) -> Self {
        self.suggested_auth = Some(auth.into());
        self
    }

    /// Sets `public_key` to `default_key` if it is empty.
    pub fn ensure_public_key(&mut self, default_key: &str) {
        if self.public_key.is_empty() {
            self.public_key = default_key.to_string();
        }
    }
}

/// Generates a unique merchant transaction reference.
pub fn generate_tx_ref() -> String {
    format!("RVP-{}", Uuid::new_v4().simple())
}
