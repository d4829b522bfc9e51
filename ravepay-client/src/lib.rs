//! # Ravepay Client
//!
//! HTTP adapter for the Rave charge API. Wires [`ChargeService`] to a
//! `reqwest`-backed [`Transport`].
//!
//! ```no_run
//! use ravepay_client::{BankAccount, ChargeRequest, RaveConfig, build_client};
//!
//! # async fn run() -> Result<(), ravepay_client::ClientError> {
//! let client = build_client(RaveConfig::test("FLWPUBK-xxxx-X"))?;
//! let mut req = ChargeRequest::new(300.0, "tester@flutter.co");
//! let charge = client
//!     .charge(&mut req, &BankAccount::new("044", "0690000031", "NG"))
//!     .await?;
//! let confirmation = client.validate(&charge, "12345").await?;
//! println!("{}: {}", confirmation.status, confirmation.message);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, error};

pub use ravepay_hex::ChargeService;
pub use ravepay_types::*;

/// A charge service talking HTTP.
pub type RaveClient = ChargeService<ReqwestTransport>;

/// Builds a client whose transport honours the config's timeout.
pub fn build_client(config: RaveConfig) -> Result<RaveClient, ClientError> {
    let transport = ReqwestTransport::from_config(&config)?;
    Ok(ChargeService::new(config, transport))
}

/// [`Transport`] implementation backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's default settings (no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport with the request timeout from `config`.
    pub fn from_config(config: &RaveConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_body(resp, url).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        read_body(resp, url).await
    }
}

async fn read_body(resp: reqwest::Response, url: &str) -> Result<Vec<u8>, TransportError> {
    let status = resp.status();
    if !status.is_success() {
        // Business errors arrive as 4xx JSON bodies; hand them back for decoding.
        debug!(%status, url, "Gateway answered with a non-success status");
    }

    let bytes = resp.bytes().await.map_err(transport_error)?;
    Ok(bytes.to_vec())
}

fn transport_error(err: reqwest::Error) -> TransportError {
    error!(error = %err, "HTTP transport failure");
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}
