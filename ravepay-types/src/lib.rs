//! # Ravepay Types
//!
//! Payment instruments, wire types and port traits for the Rave charge
//! client. This crate performs no IO.
//!
//! ## Architecture
//!
//! - `domain/` - The charge envelope, the payment instruments and the fee query
//! - `dto` - Response types and their normalization
//! - `config` - Gateway mode, default key and endpoint resolution
//! - `ports/` - The `Transport` trait adapters must implement
//! - `error` - Transport, protocol and config errors

pub mod config;
pub mod de;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use config::{Mode, Operation, RaveConfig, SANDBOX_PUBLIC_KEY, SANDBOX_SECRET_KEY};
pub use domain::{
    BankAccount, Card, ChargeRequest, Chargeable, FeeQuery, MobileMoneyGh, Mpesa, Ussd,
};
pub use dto::*;
pub use error::{ClientError, ConfigError, TransportError};
pub use ports::Transport;
