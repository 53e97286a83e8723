//! Value Objects for the Bithumb Domain
//!
//! Immutable, validated primitives used to build request paths and payloads.
//! All value objects enforce invariants at construction time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order currency used when the caller does not pick one.
pub const DEFAULT_ORDER_CURRENCY: &str = "BTC";

/// Payment currency used when the caller does not pick one.
pub const DEFAULT_PAYMENT_CURRENCY: &str = "KRW";

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Currency code must be non-empty ASCII alphanumeric
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Unknown order type string
    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    /// Unknown candlestick interval string
    #[error("Invalid chart interval: {0}")]
    InvalidChartInterval(String),

    /// Unknown user transaction search code
    #[error("Invalid transaction search: {0}")]
    InvalidTransactionSearch(String),

    /// Connect key or secret key absent
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

// =============================================================================
// Currency Pair
// =============================================================================

/// Order/payment currency pair (e.g., BTC/KRW).
///
/// # Invariants
/// - Both codes are non-empty ASCII alphanumeric
/// - Both codes are stored upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    order_currency: String,
    payment_currency: String,
}

impl CurrencyPair {
    /// Create a pair from explicit order and payment currencies.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCurrency` if either code is malformed
    pub fn new(order_currency: &str, payment_currency: &str) -> Result<Self, DomainError> {
        Ok(Self {
            order_currency: normalize_currency(order_currency)?,
            payment_currency: normalize_currency(payment_currency)?,
        })
    }

    /// Create a pair paid in KRW.
    pub fn krw(order_currency: &str) -> Result<Self, DomainError> {
        Self::new(order_currency, DEFAULT_PAYMENT_CURRENCY)
    }

    /// Currency being bought or sold.
    pub fn order_currency(&self) -> &str {
        &self.order_currency
    }

    /// Currency used for settlement.
    pub fn payment_currency(&self) -> &str {
        &self.payment_currency
    }

    /// Path segment used by public endpoints (e.g., "BTC_KRW").
    pub fn path_segment(&self) -> String {
        format!("{}_{}", self.order_currency, self.payment_currency)
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            order_currency: DEFAULT_ORDER_CURRENCY.to_string(),
            payment_currency: DEFAULT_PAYMENT_CURRENCY.to_string(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.order_currency, self.payment_currency)
    }
}

impl FromStr for CurrencyPair {
    type Err = DomainError;

    /// Accepts "BTC_KRW", "BTC/KRW" or a bare order currency ("BTC", paid in KRW).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(['_', '/']) {
            Some((order, payment)) => Self::new(order, payment),
            None => Self::krw(s),
        }
    }
}

/// Validate a currency code and return its canonical (upper-case) form.
///
/// # Errors
/// Returns `DomainError::InvalidCurrency` if the code is empty or contains
/// anything but ASCII letters and digits
pub fn normalize_currency(code: &str) -> Result<String, DomainError> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidCurrency(format!("{:?}", code)));
    }
    Ok(code.to_ascii_uppercase())
}

// =============================================================================
// Order Type
// =============================================================================

/// Side of an order as Bithumb names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl OrderType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Bid => "bid",
            OrderType::Ask => "ask",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bid" | "buy" => Ok(OrderType::Bid),
            "ask" | "sell" => Ok(OrderType::Ask),
            other => Err(DomainError::InvalidOrderType(other.to_string())),
        }
    }
}

// =============================================================================
// Chart Interval
// =============================================================================

/// Candlestick interval accepted by `/public/candlestick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartInterval {
    /// 1 minute
    OneMinute,
    /// 3 minutes
    ThreeMinutes,
    /// 5 minutes
    FiveMinutes,
    /// 10 minutes
    TenMinutes,
    /// 30 minutes
    ThirtyMinutes,
    /// 1 hour
    OneHour,
    /// 6 hours
    SixHours,
    /// 12 hours
    TwelveHours,
    /// 24 hours
    #[default]
    OneDay,
}

impl ChartInterval {
    /// All intervals, shortest first.
    pub const ALL: [ChartInterval; 9] = [
        ChartInterval::OneMinute,
        ChartInterval::ThreeMinutes,
        ChartInterval::FiveMinutes,
        ChartInterval::TenMinutes,
        ChartInterval::ThirtyMinutes,
        ChartInterval::OneHour,
        ChartInterval::SixHours,
        ChartInterval::TwelveHours,
        ChartInterval::OneDay,
    ];

    /// Wire representation (e.g., "24h").
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartInterval::OneMinute => "1m",
            ChartInterval::ThreeMinutes => "3m",
            ChartInterval::FiveMinutes => "5m",
            ChartInterval::TenMinutes => "10m",
            ChartInterval::ThirtyMinutes => "30m",
            ChartInterval::OneHour => "1h",
            ChartInterval::SixHours => "6h",
            ChartInterval::TwelveHours => "12h",
            ChartInterval::OneDay => "24h",
        }
    }
}

impl fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartInterval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| DomainError::InvalidChartInterval(s.to_string()))
    }
}

// =============================================================================
// Transaction Search
// =============================================================================

/// Filter for `/info/user_transactions` (`searchGb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionSearch {
    /// Everything
    #[default]
    All,
    /// Completed buys
    Bought,
    /// Completed sells
    Sold,
    /// Withdrawals in progress
    WithdrawalPending,
    /// Deposits
    Deposit,
    /// Withdrawals
    Withdrawal,
    /// KRW deposits in progress
    KrwDepositPending,
}

impl TransactionSearch {
    /// Numeric code sent as `searchGb`.
    pub fn code(&self) -> i64 {
        match self {
            TransactionSearch::All => 0,
            TransactionSearch::Bought => 1,
            TransactionSearch::Sold => 2,
            TransactionSearch::WithdrawalPending => 3,
            TransactionSearch::Deposit => 4,
            TransactionSearch::Withdrawal => 5,
            TransactionSearch::KrwDepositPending => 9,
        }
    }
}

impl FromStr for TransactionSearch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "all" => Ok(TransactionSearch::All),
            "1" | "bought" => Ok(TransactionSearch::Bought),
            "2" | "sold" => Ok(TransactionSearch::Sold),
            "3" | "withdrawal_pending" => Ok(TransactionSearch::WithdrawalPending),
            "4" | "deposit" => Ok(TransactionSearch::Deposit),
            "5" | "withdrawal" => Ok(TransactionSearch::Withdrawal),
            "9" | "krw_deposit_pending" => Ok(TransactionSearch::KrwDepositPending),
            other => Err(DomainError::InvalidTransactionSearch(other.to_string())),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
