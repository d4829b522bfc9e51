//! Bank account payment instrument.

use serde::Serialize;

use super::instrument::{Chargeable, merge_payload, resolve};
use super::request::ChargeRequest;
use crate::config::{Operation, RaveConfig};

/// A bank account debited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankAccount {
    /// Gateway bank code, e.g. "044"
    pub bank_code: String,
    pub account_number: String,
    pub country: String,
    pub charge_endpoint: Option<String>,
    pub validate_endpoint: Option<String>,
}

#[derive(Serialize)]
struct AccountPayload<'a> {
    accountbank: &'a str,
    accountnumber: &'a str,
    country: &'a str,
    payment_type: &'static str,
}

impl BankAccount {
    pub fn new(
        bank_code: impl Into<String>,
        account_number: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            bank_code: bank_code.into(),
            account_number: account_number.into(),
            country: country.into(),
            ..Self::default()
        }
    }

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

impl Chargeable for BankAccount {
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error> {
        merge_payload(
            request,
            &AccountPayload {
                accountbank: &self.bank_code,
                accountnumber: &self.account_number,
                country: &self.country,
                payment_type: "account",
            },
        )
    }

    fn charge_url(&self, config: &RaveConfig) -> String {
        resolve(self.charge_endpoint.as_deref(), || {
            config.url_for(Operation::ChargeAccount)
        })
    }

    fn validate_url(&self, config: &RaveConfig) -> Option<String> {
        Some(resolve(self.validate_endpoint.as_deref(), || {
            config.url_for(Operation::ValidateAccount)
        }))
    }
}
