//! Bithumb Domain Layer
//!
//! Pure types with zero I/O dependencies: credentials, currency pairs,
//! request payloads and the data models decoded from exchange responses.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod credentials;
pub mod market_data;
pub mod payload;
pub mod value_objects;

// Re-export commonly used types
pub use credentials::Credentials;
pub use market_data::{
    AssetStatus, BtciIndex, Candle, IndexValue, OrderBook, OrderBookLevel, PlacedOrder, Ticker,
    Transaction,
};
pub use payload::{Payload, PayloadValue};
pub use value_objects::{
    normalize_currency, ChartInterval, CurrencyPair, DomainError, OrderType, TransactionSearch,
    DEFAULT_ORDER_CURRENCY, DEFAULT_PAYMENT_CURRENCY,
};
