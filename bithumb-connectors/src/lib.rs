//! Bithumb Exchange Connectors
//!
//! REST binding for the Bithumb public and private HTTP API.
//! Requests are signed with HMAC-SHA512; responses are unwrapped from the
//! `{"status": ..., "data": ...}` envelope into values or errors.

#![warn(clippy::all)]

// Public modules
pub mod config;
pub mod envelope;
pub mod error;
pub mod nonce;
pub mod private_api;
pub mod public_api;
pub mod signer;
pub mod transport;

// Re-exports
pub use config::{BithumbConfig, BITHUMB_API_URL};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use error::{BithumbError, BithumbResult};
pub use nonce::NonceSource;
pub use private_api::{
    BithumbPrivateApi, CoinWithdrawal, KrwWithdrawal, OrdersQuery, UserTransactionsQuery,
};
pub use public_api::BithumbPublicApi;
pub use transport::Transport;
