//! Transport port trait.
//!
//! The charge service depends on this trait, not on an HTTP library.
//! Adapters (reqwest, in-memory stubs) implement it.

use crate::error::TransportError;

/// Sends requests to the gateway and returns the raw response body.
///
/// Implementations return the body for any HTTP status the server answered
/// with; the gateway reports business errors inside 4xx bodies. Only a
/// failure to obtain a body at all is a [`TransportError`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// POSTs a JSON body.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    /// GETs a URL. Only the bank listing uses this.
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}
