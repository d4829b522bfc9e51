//! Charge Application Service
//!
//! Drives the two-phase charge flow through the transport port:
//! charge an instrument, then validate a pending charge with an OTP.
//! Also answers the follow-up lookups: verification, requery, bank
//! listing and fee quotes. Contains NO HTTP logic.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use ravepay_types::{
    Bank, ChargeRequest, ChargeResponse, ChargeValidationResponse, Chargeable, ClientError,
    FeeQuery, FeeResponse, Operation, RaveConfig, RequeryResponse, Transport,
    VerificationResponse,
};

/// Application service for charge operations.
///
/// Generic over `T: Transport` so tests can inject an in-memory transport.
/// Holds no state between calls; concurrent charges are safe as long as the
/// transport is.
pub struct ChargeService<T: Transport> {
    config: RaveConfig,
    transport: T,
}

#[derive(Serialize)]
struct ValidatePayload<'a> {
    #[serde(rename = "PBFPubKey")]
    public_key: &'a str,
    transaction_reference: &'a str,
    transactionreference: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct VerifyPayload<'a> {
    flw_ref: &'a str,
    #[serde(rename = "SECKEY")]
    secret_key: &'a str,
}

#[derive(Serialize)]
struct RequeryPayload<'a> {
    txref: &'a str,
    #[serde(rename = "SECKEY")]
    secret_key: &'a str,
}

#[derive(Serialize)]
struct FeePayload<'a> {
    #[serde(rename = "PBFPubKey")]
    public_key: &'a str,
    #[serde(flatten)]
    query: &'a FeeQuery,
}

impl<T: Transport> ChargeService<T> {
    /// Creates a new charge service.
    pub fn new(config: RaveConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &RaveConfig {
        &self.config
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Charges `instrument` for the given request.
    ///
    /// An empty `request.public_key` is set to the configured key before
    /// anything else happens, so it is filled in even when the call fails.
    /// A response with status "error" is returned as `Ok`.
    #[instrument(
        skip(self, request, instrument),
        fields(tx_ref = request.tx_ref.as_deref().unwrap_or_default())
    )]
    pub async fn charge<C>(
        &self,
        request: &mut ChargeRequest,
        instrument: &C,
    ) -> Result<ChargeResponse, ClientError>
    where
        C: Chargeable + ?Sized,
    {
        request.ensure_public_key(&self.config.public_key);

        let payload = instrument
            .build_charge_payload(request)
            .map_err(ClientError::Encode)?;
        let url = instrument.charge_url(&self.config);
        debug!(%url, "Posting charge");

        let body = self.transport.post(&url, payload).await?;

        let mut response: ChargeResponse = decode(&body)?;
        response.validate_url = instrument.validate_url(&self.config);
        response.public_key = request.public_key.clone();

        info!(
            status = %response.status,
            message = %response.message,
            "Charge response received"
        );
        Ok(response)
    }

    /// Completes a pending charge with the OTP the customer received.
    ///
    /// Posts to the validation URL carried on `charge`, or the default card
    /// validation endpoint if it has none.
    #[instrument(skip(self, charge, otp))]
    pub async fn validate(
        &self,
        charge: &ChargeResponse,
        otp: &str,
    ) -> Result<ChargeValidationResponse, ClientError> {
        let url = match charge.validate_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.config.url_for(Operation::ValidateCard),
        };
        let public_key = if charge.public_key.is_empty() {
            self.config.public_key.as_str()
        } else {
            charge.public_key.as_str()
        };
        let flw_ref = charge.data.flw_ref.as_deref().unwrap_or_default();

        let payload = serde_json::to_vec(&ValidatePayload {
            public_key,
            transaction_reference: flw_ref,
            transactionreference: flw_ref,
            otp,
        })
        .map_err(ClientError::Encode)?;
        debug!(%url, flw_ref, "Posting OTP validation");

        let body = self.transport.post(&url, payload).await?;
        let response: ChargeValidationResponse = decode(&body)?;

        info!(
            status = %response.status,
            message = %response.message,
            "Validation response received"
        );
        Ok(response)
    }

    /// Looks up a transaction by its gateway (`flwRef`) reference.
    ///
    /// Needs the secret key; fails with `ClientError::Config` before any
    /// request is sent if none is configured.
    #[instrument(skip(self))]
    pub async fn verify(&self, flw_ref: &str) -> Result<VerificationResponse, ClientError> {
        let secret_key = self.config.require_secret_key(Operation::Verify)?;
        let payload = serde_json::to_vec(&VerifyPayload {
            flw_ref,
            secret_key,
        })
        .map_err(ClientError::Encode)?;
        let url = self.config.url_for(Operation::Verify);
        debug!(%url, "Posting verification");

        let body = self.transport.post(&url, payload).await?;
        let response: VerificationResponse = decode(&body)?;

        info!(
            status = %response.status,
            tx_status = response.data.status.as_deref().unwrap_or_default(),
            "Verification response received"
        );
        Ok(response)
    }

    /// Looks up every attempt made under the merchant's `txRef`.
    #[instrument(skip(self))]
    pub async fn requery(&self, tx_ref: &str) -> Result<RequeryResponse, ClientError> {
        let secret_key = self.config.require_secret_key(Operation::Requery)?;
        let payload = serde_json::to_vec(&RequeryPayload {
            txref: tx_ref,
            secret_key,
        })
        .map_err(ClientError::Encode)?;
        let url = self.config.url_for(Operation::Requery);
        debug!(%url, "Posting requery");

        let body = self.transport.post(&url, payload).await?;
        let response: RequeryResponse = decode(&body)?;

        info!(
            status = %response.status,
            attempts = response.data.len(),
            "Requery response received"
        );
        Ok(response)
    }

    /// Lists the banks that accept account charges. Needs no key.
    #[instrument(skip(self))]
    pub async fn list_banks(&self) -> Result<Vec<Bank>, ClientError> {
        let url = self.config.url_for(Operation::ListBanks);
        debug!(%url, "Fetching bank list");

        let body = self.transport.get(&url).await?;
        let banks: Vec<Bank> = decode(&body)?;

        info!(count = banks.len(), "Bank list received");
        Ok(banks)
    }

    /// Quotes the fee the gateway adds to a charge, using the configured
    /// public key.
    #[instrument(skip(self, query), fields(amount = query.amount, currency = %query.currency))]
    pub async fn get_fee(&self, query: &FeeQuery) -> Result<FeeResponse, ClientError> {
        let payload = serde_json::to_vec(&FeePayload {
            public_key: &self.config.public_key,
            query,
        })
        .map_err(ClientError::Encode)?;
        let url = self.config.url_for(Operation::Fee);
        debug!(%url, "Posting fee query");

        let body = self.transport.post(&url, payload).await?;
        let response: FeeResponse = decode(&body)?;

        info!(status = %response.status, "Fee response received");
        Ok(response)
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, ClientError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Gateway response did not match the expected schema");
        ClientError::Protocol(e)
    })
}
