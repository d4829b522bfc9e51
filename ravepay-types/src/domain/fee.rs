//! Fee lookup query.

use serde::Serialize;

/// Asks the gateway what it would charge on top of `amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeeQuery {
    pub amount: f64,
    pub currency: String,
    /// Payment type code; the gateway uses "2" for bank account payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ptype: Option<String>,
    /// First six digits of the card, for card-specific pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card6: Option<String>,
}

impl FeeQuery {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            ..Self::default()
        }
    }

    /// Prices an account payment instead of a card payment.
    pub fn for_account(mut self) -> Self {
        self.ptype = Some("2".into());
        self
    }

    pub fn with_card6(mut self, card6: impl Into<String>) -> Self {
        self.card6 = Some(card6.into());
        self
    }
}
