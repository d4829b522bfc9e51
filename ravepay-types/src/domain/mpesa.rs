//! M-Pesa payment instrument.

use serde::Serialize;

use super::instrument::{Chargeable, merge_payload, resolve};
use super::request::ChargeRequest;
use crate::config::{Operation, RaveConfig};

/// An M-Pesa mobile money charge (Kenya).
///
/// The customer completes payment on their phone using the business number
/// and account number returned with the charge response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mpesa {
    pub currency: String,
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub charge_endpoint: Option<String>,
}

#[derive(Serialize)]
struct MpesaPayload<'a> {
    currency: &'a str,
    country: &'a str,
    firstname: &'a str,
    lastname: &'a str,
    is_mpesa: &'static str,
    payment_type: &'static str,
}

impl Chargeable for Mpesa {
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error> {
        merge_payload(
            request,
            &MpesaPayload {
                currency: &self.currency,
                country: &self.country,
                firstname: &self.first_name,
                lastname: &self.last_name,
                is_mpesa: "1",
                payment_type: "mpesa",
            },
        )
    }

    fn charge_url(&self, config: &RaveConfig) -> String {
        resolve(self.charge_endpoint.as_deref(), || {
            config.url_for(Operation::ChargeMpesa)
        })
    }
}
