//! Card payment instrument.

use serde::Serialize;

use super::instrument::{Chargeable, merge_payload, resolve};
use super::request::ChargeRequest;
use crate::config::{Operation, RaveConfig};

/// A debit/credit card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub card_no: String,
    pub cvv: String,
    pub expiry_month: String,
    pub expiry_year: String,
    /// Card PIN, sent when the gateway suggested PIN auth
    pub pin: Option<String>,
    pub currency: String,
    pub country: String,
    /// Overrides the charge endpoint for this card only.
    pub charge_endpoint: Option<String>,
    /// Overrides the OTP validation endpoint for this card only.
    pub validate_endpoint: Option<String>,
}

#[derive(Serialize)]
struct CardPayload<'a> {
    cardno: &'a str,
    cvv: &'a str,
    expirymonth: &'a str,
    expiryyear: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pin: Option<&'a str>,
    currency: &'a str,
    country: &'a str,
}

impl Card {
    pub fn with_endpoints(
        mut self,
        charge_url: impl Into<String>,
        validate_url: impl Into<String>,
    ) -> Self {
        self.charge_endpoint = Some(charge_url.into());
        self.validate_endpoint = Some(validate_url.into());
        self
    }
}

impl Chargeable for Card {
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error> {
        merge_payload(
            request,
            &CardPayload {
                cardno: &self.card_no,
                cvv: &self.cvv,
                expirymonth: &self.expiry_month,
                expiryyear: &self.expiry_year,
                pin: self.pin.as_deref(),
                currency: &self.currency,
                country: &self.country,
            },
        )
    }

    fn charge_url(&self, config: &RaveConfig) -> String {
        resolve(self.charge_endpoint.as_deref(), || {
            config.url_for(Operation::ChargeCard)
        })
    }

    fn validate_url(&self, config: &RaveConfig) -> Option<String> {
        Some(resolve(self.validate_endpoint.as_deref(), || {
            config.url_for(Operation::ValidateCard)
        }))
    }
}
