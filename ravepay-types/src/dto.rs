//! Wire types for gateway responses.
//!
//! The gateway uses one loosely-shaped record for every instrument and
//! outcome. Which fields are populated depends on the payment flow; an
//! absent field means "not applicable", never an error.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::de::{best_effort, null_as_default, one_or_many, option_number};

/// Message the gateway sends when it wants a different auth model.
pub const AUTH_SUGGESTION: &str = "AUTH_SUGGESTION";

/// Charge response code meaning "charged, awaiting OTP validation".
pub const PENDING_VALIDATION_CODE: &str = "02";

// ─────────────────────────────────────────────────────────────────────────────
// Charge DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Customer record nested in charge and validation responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "option_number")]
    pub id: Option<i64>,
    pub phone: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "customertoken")]
    pub customer_token: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<String>,
    #[serde(rename = "AccountId", deserialize_with = "option_number")]
    pub account_id: Option<i64>,
}

/// How the customer should complete a pending charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateInstructions {
    /// Parameters the validation call expects, e.g. `["OTP"]`
    #[serde(rename = "valparams", deserialize_with = "null_as_default")]
    pub val_params: Vec<String>,
    pub instruction: Option<String>,
}

/// Tokens for charging the same card again without re-entering details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeToken {
    pub user_token: Option<String>,
    pub embed_token: Option<String>,
}

/// Union of every field the gateway returns in a transaction record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeResponseData {
    #[serde(deserialize_with = "option_number")]
    pub id: Option<i64>,
    #[serde(rename = "txRef")]
    pub tx_ref: Option<String>,
    /// Gateway order reference; doubles as the M-Pesa account number
    #[serde(rename = "orderRef")]
    pub order_ref: Option<String>,
    /// Gateway reference used to validate a pending charge
    #[serde(rename = "flwRef")]
    pub flw_ref: Option<String>,
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
    pub device_fingerprint: Option<String>,
    pub settlement_token: Option<String>,
    pub cycle: Option<String>,
    #[serde(deserialize_with = "option_number")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "option_number")]
    pub charged_amount: Option<f64>,
    #[serde(rename = "appfee", deserialize_with = "option_number")]
    pub app_fee: Option<f64>,
    #[serde(rename = "merchantfee", deserialize_with = "option_number")]
    pub merchant_fee: Option<f64>,
    #[serde(rename = "merchantbearsfee", deserialize_with = "option_number")]
    pub merchant_bears_fee: Option<i64>,
    #[serde(rename = "chargeResponseCode")]
    pub charge_response_code: Option<String>,
    #[serde(rename = "raveRef")]
    pub rave_ref: Option<String>,
    #[serde(rename = "chargeResponseMessage")]
    pub charge_response_message: Option<String>,
    #[serde(rename = "authModelUsed")]
    pub auth_model_used: Option<String>,
    pub currency: Option<String>,
    #[serde(rename = "IP")]
    pub ip: Option<String>,
    pub narration: Option<String>,
    /// Transaction status, e.g. "success-pending-validation"
    pub status: Option<String>,
    #[serde(rename = "vbvrespmessage")]
    pub vbv_response_message: Option<String>,
    #[serde(rename = "authurl")]
    pub auth_url: Option<String>,
    #[serde(rename = "vbvrespcode")]
    pub vbv_response_code: Option<String>,
    #[serde(rename = "acctvalrespmsg")]
    pub account_validation_message: Option<String>,
    #[serde(rename = "acctvalrespcode")]
    pub account_validation_code: Option<String>,
    #[serde(rename = "paymentType")]
    pub payment_type: Option<String>,
    #[serde(rename = "paymentPlan")]
    pub payment_plan: Option<Value>,
    #[serde(rename = "paymentPage")]
    pub payment_page: Option<Value>,
    #[serde(rename = "paymentId")]
    pub payment_id: Option<String>,
    pub fraud_status: Option<String>,
    pub charge_type: Option<String>,
    #[serde(deserialize_with = "option_number")]
    pub is_live: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt")]
    pub deleted_at: Option<String>,
    #[serde(rename = "customerId", deserialize_with = "option_number")]
    pub customer_id: Option<i64>,
    #[serde(rename = "AccountId", deserialize_with = "option_number")]
    pub account_id: Option<i64>,
    pub customer: Option<Customer>,
    #[serde(rename = "customercandosubsequentnoauth")]
    pub customer_can_do_subsequent_no_auth: Option<bool>,
    #[serde(rename = "validateInstruction")]
    pub validate_instruction: Option<String>,
    #[serde(rename = "validateInstructions")]
    pub validate_instructions: Option<ValidateInstructions>,
    /// M-Pesa paybill number
    pub business_number: Option<String>,
    pub suggested_auth: Option<String>,
    /// Error code on failed charges, e.g. "BIN_ERR"
    pub code: Option<String>,
    /// Error message on failed charges
    pub message: Option<String>,
    #[serde(rename = "chargeToken")]
    pub charge_token: Option<ChargeToken>,
}

/// Result of a charge call.
///
/// `status` is the coarse "success"/"error" indicator. A decoded response
/// with status "error" is a business failure, not a client error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ChargeResponseData,
    /// Validation endpoint of the charged instrument, carried into phase two.
    #[serde(skip)]
    pub validate_url: Option<String>,
    /// Public key the charge was made with.
    #[serde(skip)]
    pub public_key: String,
}

/// Normalized reading of a [`ChargeResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// The charge completed; nothing more to do.
    Success,
    /// The charge is waiting for an OTP (or an off-line customer action).
    PendingValidation,
    /// Retry the charge with the given auth model (e.g. "PIN").
    SuggestedAuth(String),
    /// The gateway rejected the charge.
    Failed {
        code: Option<String>,
        message: String,
    },
}

impl ChargeResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Classifies the response by its coarse status, message and the
    /// populated data fields.
    pub fn outcome(&self) -> ChargeOutcome {
        if !self.is_success() {
            return ChargeOutcome::Failed {
                code: self.data.code.clone(),
                message: self
                    .data
                    .message
                    .clone()
                    .unwrap_or_else(|| self.message.clone()),
            };
        }

        if self.message == AUTH_SUGGESTION {
            return ChargeOutcome::SuggestedAuth(
                self.data.suggested_auth.clone().unwrap_or_default(),
            );
        }

        let pending_code =
            self.data.charge_response_code.as_deref() == Some(PENDING_VALIDATION_CODE);
        let pending_status = self
            .data
            .status
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("pending"));

        if pending_code || pending_status {
            ChargeOutcome::PendingValidation
        } else {
            ChargeOutcome::Success
        }
    }

    /// Payment instructions for an M-Pesa charge.
    pub fn mpesa_payment_info(&self) -> MpesaPaymentInfo {
        MpesaPaymentInfo::from(self)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Processor response attached to a validated card charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationOutcome {
    #[serde(rename = "responsecode")]
    pub response_code: Option<String>,
    #[serde(rename = "responsemessage")]
    pub response_message: Option<String>,
}

/// Payload of a validation response.
///
/// Card validations wrap the transaction as `{"data": {...}, "tx": {...}}`;
/// account validations return the transaction record directly. The two are
/// told apart by the presence of the `tx` key.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationData {
    Nested {
        outcome: ValidationOutcome,
        tx: ChargeResponseData,
    },
    Flat(ChargeResponseData),
}

#[derive(Deserialize)]
struct NestedValidation {
    #[serde(default, deserialize_with = "null_as_default")]
    data: ValidationOutcome,
    #[serde(default, deserialize_with = "null_as_default")]
    tx: ChargeResponseData,
}

impl<'de> Deserialize<'de> for ValidationData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get("tx").is_some() {
            let nested: NestedValidation =
                serde_json::from_value(value).map_err(de::Error::custom)?;
            Ok(ValidationData::Nested {
                outcome: nested.data,
                tx: nested.tx,
            })
        } else {
            serde_json::from_value(value)
                .map(ValidationData::Flat)
                .map_err(de::Error::custom)
        }
    }
}

/// Result of an OTP validation call.
///
/// Only `status` and `message` are guaranteed; `data` is best-effort and
/// is `None` when the gateway sends a record that does not decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChargeValidationResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "best_effort")]
    pub data: Option<ValidationData>,
}

impl ChargeValidationResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// The validated transaction record, whichever shape it arrived in.
    pub fn transaction(&self) -> Option<&ChargeResponseData> {
        match self.data.as_ref()? {
            ValidationData::Nested { tx, .. } => Some(tx),
            ValidationData::Flat(tx) => Some(tx),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verification DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Charge response code of a completed charge. Some flows send `"0"`.
pub const COMPLETED_CODES: [&str; 2] = ["00", "0"];

/// Result of verifying a transaction by its gateway reference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VerificationResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ChargeResponseData,
}

impl VerificationResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// True when the gateway reports the charge as completed for at least
    /// `amount` in `currency`.
    pub fn confirms(&self, amount: f64, currency: &str) -> bool {
        let data = &self.data;
        self.is_success()
            && data
                .charge_response_code
                .as_deref()
                .is_some_and(|c| COMPLETED_CODES.contains(&c))
            && data.amount.is_some_and(|a| a >= amount)
            && data
                .currency
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(currency))
    }
}

/// One attempt returned by a requery.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequeryTransaction {
    #[serde(rename = "txid", deserialize_with = "option_number")]
    pub id: Option<i64>,
    #[serde(rename = "txref")]
    pub tx_ref: Option<String>,
    #[serde(rename = "flwref")]
    pub flw_ref: Option<String>,
    #[serde(rename = "orderref")]
    pub order_ref: Option<String>,
    #[serde(deserialize_with = "option_number")]
    pub amount: Option<f64>,
    #[serde(rename = "chargedamount", deserialize_with = "option_number")]
    pub charged_amount: Option<f64>,
    #[serde(rename = "appfee", deserialize_with = "option_number")]
    pub app_fee: Option<f64>,
    #[serde(rename = "merchantfee", deserialize_with = "option_number")]
    pub merchant_fee: Option<f64>,
    pub currency: Option<String>,
    #[serde(rename = "chargecode")]
    pub charge_code: Option<String>,
    #[serde(rename = "chargemessage")]
    pub charge_message: Option<String>,
    #[serde(rename = "authmodel")]
    pub auth_model: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "paymenttype")]
    pub payment_type: Option<String>,
    #[serde(rename = "fraudstatus")]
    pub fraud_status: Option<String>,
    pub narration: Option<String>,
    pub created: Option<String>,
    #[serde(rename = "custname")]
    pub customer_name: Option<String>,
    #[serde(rename = "custemail")]
    pub customer_email: Option<String>,
    #[serde(rename = "custphone")]
    pub customer_phone: Option<String>,
}

/// Result of re-querying a transaction by the merchant's reference.
///
/// The gateway returns either one attempt or a list of them; both decode
/// into `data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequeryResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<RequeryTransaction>,
}

impl RequeryResponse {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// The most recent attempt.
    pub fn latest(&self) -> Option<&RequeryTransaction> {
        self.data.last()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A bank that accepts account charges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Bank {
    #[serde(rename = "bankname")]
    pub name: String,
    /// Code to send as a bank account's `accountbank`
    #[serde(rename = "bankcode")]
    pub code: String,
    #[serde(rename = "internetbanking", default)]
    pub internet_banking: bool,
}

/// Fee breakdown for a prospective charge.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeeData {
    /// Amount plus fee, what the customer pays
    #[serde(deserialize_with = "option_number")]
    pub charge_amount: Option<f64>,
    #[serde(deserialize_with = "option_number")]
    pub fee: Option<f64>,
    #[serde(rename = "merchantfee", deserialize_with = "option_number")]
    pub merchant_fee: Option<f64>,
    #[serde(rename = "ravefee", deserialize_with = "option_number")]
    pub rave_fee: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeeResponse {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: FeeData,
}

// ─────────────────────────────────────────────────────────────────────────────
// M-Pesa
// ─────────────────────────────────────────────────────────────────────────────

/// What an M-Pesa customer needs to complete payment on their phone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MpesaPaymentInfo {
    pub amount: f64,
    pub account_number: String,
    pub business_number: String,
}

impl From<&ChargeResponse> for MpesaPaymentInfo {
    fn from(resp: &ChargeResponse) -> Self {
        Self {
            amount: resp.data.amount.unwrap_or_default(),
            account_number: resp.data.order_ref.clone().unwrap_or_default(),
            business_number: resp.data.business_number.clone().unwrap_or_default(),
        }
    }
}
