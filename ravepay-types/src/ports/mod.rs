//! Port traits (interfaces for adapters).

mod transport;

pub use transport::Transport;
