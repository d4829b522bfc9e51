//! # Ravepay Hex
//!
//! Application service layer for the Rave charge client.
//!
//! The service is generic over `T: Transport`, allowing different
//! transport implementations (HTTP, in-memory) to be injected.

pub mod service;


pub use service::ChargeService;
