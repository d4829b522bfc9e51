//! Ghana mobile money payment instrument.

use serde::Serialize;

use super::instrument::{Chargeable, merge_payload, resolve};
use super::request::ChargeRequest;
use crate::config::{Operation, RaveConfig};

/// A Ghana mobile money wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileMoneyGh {
    pub currency: String,
    pub country: String,
    /// Mobile network operator, e.g. "MTN"
    pub network: String,
    pub charge_endpoint: Option<String>,
}

#[derive(Serialize)]
struct MobileMoneyGhPayload<'a> {
    currency: &'a str,
    country: &'a str,
    network: &'a str,
    is_mobile_money_gh: u8,
    payment_type: &'static str,
}

impl Chargeable for MobileMoneyGh {
    fn build_charge_payload(&self, request: &ChargeRequest) -> Result<Vec<u8>, serde_json::Error> {
        merge_payload(
            request,
            &MobileMoneyGhPayload {
                currency: &self.currency,
                country: &self.country,
                network: &self.network,
                is_mobile_money_gh: 1,
                payment_type: "mobilemoneygh",
            },
        )
    }

    fn charge_url(&self, config: &RaveConfig) -> String {
        resolve(self.charge_endpoint.as_deref(), || {
            config.url_for(Operation::ChargeMobileMoneyGh)
        })
    }
}
