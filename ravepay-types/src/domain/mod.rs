//! Payment instruments and the common charge envelope.

pub mod account;
pub mod card;
pub mod fee;
pub mod instrument;
pub mod mobile_money;
pub mod mpesa;
pub mod request;
pub mod ussd;

pub use account::BankAccount;
pub use card::Card;
pub use fee::FeeQuery;
pub use instrument::Chargeable;
pub use mobile_money::MobileMoneyGh;
pub use mpesa::Mpesa;
pub use request::{ChargeRequest, generate_tx_ref};
pub use ussd::Ussd;
