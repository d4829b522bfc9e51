//! USSD payment instrument.

use serde::Serialize;

use super::instrument::{Chargeable, merge_payload, resolve};
use super::request::ChargeRequest;
use crate::config::{Operation, RaveConfig};

/// A bank account charged through a USSD short code flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ussd {
    pub bank_code: String,
    pub account_number: String,
    pub currency: String,
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub charge_endpoint: Option<String>,
}

#[derive(Serialize)]
struct UssdPayload<'a> {
    accountbank: &'a str,
    accountnumber: &'a str,
    currency: &'a str,
    country: &'a str,
    firstname: &'a str,
    lastname: &'a str,
    payment_type: &'static str,
}

impl Chargeable for Ussd {
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error> {
        merge_payload(
            request,
            &UssdPayload {
                accountbank: &self.bank_code,
                accountnumber: &self.account_number,
                currency: &self.currency,
                country: &self.country,
                firstname: &self.first_name,
                lastname: &self.last_name,
                payment_type: "ussd",
            },
        )
    }

    fn charge_url(&self, config: &RaveConfig) -> String {
        resolve(self.charge_endpoint.as_deref(), || {
            config.url_for(Operation::ChargeUssd)
        })
    }
}
