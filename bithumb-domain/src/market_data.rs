//! Typed views over the `data` section of Bithumb responses.
//!
//! Bithumb encodes most numbers as strings; they decode to `Decimal`.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::OrderType;

/// Parse a millisecond timestamp string as sent by Bithumb.
fn parse_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.trim().parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

// =============================================================================
// Ticker
// =============================================================================

/// `/public/ticker/{pair}` data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Opening price (00:00 reference)
    pub opening_price: Decimal,
    /// Last traded price
    pub closing_price: Decimal,
    /// Lowest price
    pub min_price: Decimal,
    /// Highest price
    pub max_price: Decimal,
    /// Volume
    pub units_traded: Decimal,
    /// Traded value
    pub acc_trade_value: Decimal,
    /// Previous day's closing price
    pub prev_closing_price: Decimal,
    /// Volume over the last 24 hours
    #[serde(rename = "units_traded_24H")]
    pub units_traded_24h: Decimal,
    /// Traded value over the last 24 hours
    #[serde(rename = "acc_trade_value_24H")]
    pub acc_trade_value_24h: Decimal,
    /// Price change over the last 24 hours
    #[serde(rename = "fluctate_24H")]
    pub fluctuation_24h: Decimal,
    /// Price change rate over the last 24 hours (percent)
    #[serde(rename = "fluctate_rate_24H")]
    pub fluctuation_rate_24h: Decimal,
    /// Millisecond timestamp
    #[serde(default)]
    pub date: Option<String>,
}

impl Ticker {
    /// Timestamp of the snapshot, if present and well-formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_millis)
    }
}

// =============================================================================
// Order Book
// =============================================================================

/// One price level of the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Quantity resting at this price
    pub quantity: Decimal,
    /// Price
    pub price: Decimal,
}

/// `/public/orderbook/{pair}` data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Millisecond timestamp
    pub timestamp: String,
    /// Payment currency
    pub payment_currency: String,
    /// Order currency
    pub order_currency: String,
    /// Buy side, best first
    pub bids: Vec<OrderBookLevel>,
    /// Sell side, best first
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Highest bid.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Lowest ask.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Best ask minus best bid.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    /// Timestamp of the snapshot.
    pub fn snapshot_time(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.timestamp)
    }
}

// =============================================================================
// Transaction History
// =============================================================================

/// One entry of `/public/transaction_history/{pair}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Execution time ("YYYY-MM-DD HH:MM:SS", KST)
    pub transaction_date: String,
    /// Taker side
    #[serde(rename = "type")]
    pub side: OrderType,
    /// Executed quantity
    pub units_traded: Decimal,
    /// Execution price
    pub price: Decimal,
    /// Executed value
    pub total: Decimal,
}

// =============================================================================
// Asset Status
// =============================================================================

/// `/public/assetsstatus/{currency}` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStatus {
    /// 1 when deposits are open
    pub deposit_status: u8,
    /// 1 when withdrawals are open
    pub withdrawal_status: u8,
}

impl AssetStatus {
    /// Deposits are currently accepted.
    pub fn deposits_enabled(&self) -> bool {
        self.deposit_status == 1
    }

    /// Withdrawals are currently accepted.
    pub fn withdrawals_enabled(&self) -> bool {
        self.withdrawal_status == 1
    }
}

// =============================================================================
// Bithumb Index
// =============================================================================

/// One index value of `/public/btci`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexValue {
    /// Index level
    pub market_index: Decimal,
    /// Change
    pub width: Decimal,
    /// Change rate (percent)
    pub rate: Decimal,
}

/// `/public/btci` data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtciIndex {
    /// Bithumb altcoin index
    pub btai: IndexValue,
    /// Bithumb market index
    pub btmi: IndexValue,
    /// Millisecond timestamp
    #[serde(default)]
    pub date: Option<String>,
}

// =============================================================================
// Candlestick
// =============================================================================

/// Raw candlestick row: `[time, open, close, high, low, volume]`.
#[derive(Deserialize)]
struct CandleRow(i64, Decimal, Decimal, Decimal, Decimal, Decimal);

/// One candle of `/public/candlestick/{pair}/{interval}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CandleRow")]
pub struct Candle {
    /// Open time (milliseconds since epoch)
    pub open_time_ms: i64,
    /// Opening price
    pub open: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Highest price
    pub high: Decimal,
    /// Lowest price
    pub low: Decimal,
    /// Volume
    pub volume: Decimal,
}

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        let CandleRow(open_time_ms, open, close, high, low, volume) = row;
        Self {
            open_time_ms,
            open,
            close,
            high,
            low,
            volume,
        }
    }
}

impl Candle {
    /// Open time as a UTC timestamp.
    pub fn open_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.open_time_ms).single()
    }
}

// =============================================================================
// Placed Order
// =============================================================================

/// Envelope returned by `/trade/place`, `/trade/market_buy` and `/trade/market_sell`.
///
/// The order id sits next to `status`, not under `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    /// Status code ("0000")
    pub status: String,
    /// Exchange-assigned order id
    pub order_id: String,
}

// =============================================================================
// Tests
// =============================================================================
