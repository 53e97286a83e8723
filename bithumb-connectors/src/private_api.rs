//! Private (signed) account and trading endpoints.
//!
//! Each method assembles its payload in the order Bithumb documents it and
//! sends a signed POST. Units and prices are not range-checked here; the
//! exchange validates them.
//!
//! # Example
//!
//! ```ignore
//! let api = BithumbPrivateApi::new(connect_key, secret_key)?;
//! let order: PlacedOrder = api
//!     .trade_place(&CurrencyPair::krw("BTC")?, dec!(0.001), dec!(50000000), OrderType::Bid)
//!     .await?
//!     .decode()?;
//! ```

use rust_decimal::Decimal;
use tracing::info;

use bithumb_domain::{
    normalize_currency, Credentials, CurrencyPair, OrderType, Payload, TransactionSearch,
    DEFAULT_PAYMENT_CURRENCY,
};

use crate::config::{BithumbConfig, BITHUMB_API_URL};
use crate::envelope::Envelope;
use crate::error::{BithumbError, BithumbResult};
use crate::transport::Transport;

/// Default page size of `/info/orders`.
pub const DEFAULT_ORDERS_COUNT: u32 = 100;

/// Default page size of `/info/user_transactions`.
pub const DEFAULT_USER_TRANSACTIONS_COUNT: u32 = 20;

/// Default bank for KRW withdrawals.
pub const DEFAULT_WITHDRAWAL_BANK: &str = "011_농협은행";

// =============================================================================
// Query Parameters
// =============================================================================

/// Parameters of `/info/orders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Specific order (requires `order_type`)
    pub order_id: Option<String>,
    /// Side of the specific order (requires `order_id`)
    pub order_type: Option<OrderType>,
    /// Page size
    pub count: u32,
    /// Only orders placed after this millisecond timestamp
    pub after: Option<i64>,
}

impl OrdersQuery {
    /// Open orders of a pair with default paging.
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            order_id: None,
            order_type: None,
            count: DEFAULT_ORDERS_COUNT,
            after: None,
        }
    }

    /// Narrow to one order.
    pub fn with_order(mut self, order_id: impl Into<String>, order_type: OrderType) -> Self {
        self.order_id = Some(order_id.into());
        self.order_type = Some(order_type);
        self
    }

    /// Set the page size.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Only orders after a millisecond timestamp.
    pub fn with_after(mut self, after: i64) -> Self {
        self.after = Some(after);
        self
    }

    /// Build the payload, rejecting an order id without a type and vice versa.
    fn to_payload(&self) -> BithumbResult<Payload> {
        let mut payload = pair_payload(&self.pair).with("count", self.count);

        let order_id = self.order_id.as_deref().filter(|id| !id.is_empty());

        match (order_id, self.order_type) {
            (Some(order_id), Some(order_type)) => {
                payload.push("order_id", order_id);
                payload.push("type", order_type.as_str());
            }
            (None, None) => {}
            _ => {
                return Err(BithumbError::Validation(
                    "info_orders requires both order_id and order_type, or neither".to_string(),
                ))
            }
        }

        Ok(payload.with_opt("after", self.after))
    }
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self::new(CurrencyPair::default())
    }
}

/// Parameters of `/info/user_transactions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTransactionsQuery {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Rows to skip
    pub offset: u32,
    /// Page size
    pub count: u32,
    /// Transaction kind filter
    pub search: TransactionSearch,
}

impl UserTransactionsQuery {
    /// All transactions of a pair, first page.
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            offset: 0,
            count: DEFAULT_USER_TRANSACTIONS_COUNT,
            search: TransactionSearch::All,
        }
    }

    /// Set offset and page size.
    pub fn with_page(mut self, offset: u32, count: u32) -> Self {
        self.offset = offset;
        self.count = count;
        self
    }

    /// Filter by transaction kind.
    pub fn with_search(mut self, search: TransactionSearch) -> Self {
        self.search = search;
        self
    }

    fn to_payload(&self) -> Payload {
        pair_payload(&self.pair)
            .with("offset", self.offset)
            .with("count", self.count)
            .with("searchGb", self.search.code())
    }
}

impl Default for UserTransactionsQuery {
    fn default() -> Self {
        Self::new(CurrencyPair::default())
    }
}

/// Parameters of `/trade/btc_withdrawal` (any coin, despite the path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinWithdrawal {
    /// Coin to withdraw
    pub currency: String,
    /// Destination wallet address
    pub address: String,
    /// Destination tag / memo, for coins that use one
    pub destination: Option<String>,
    /// Amount
    pub units: Decimal,
}

impl CoinWithdrawal {
    fn to_payload(&self) -> Payload {
        Payload::new()
            .with("currency", self.currency.as_str())
            .with("address", self.address.as_str())
            .with_opt("destination", self.destination.as_deref())
            .with("units", self.units)
    }
}

/// Parameters of `/trade/krw_withdrawal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrwWithdrawal {
    /// Bank code and name (e.g., "011_농협은행")
    pub bank: String,
    /// Account number
    pub account: String,
    /// Amount in KRW
    pub price: i64,
}

impl KrwWithdrawal {
    /// Withdrawal to an account at the default bank.
    pub fn new(account: impl Into<String>, price: i64) -> Self {
        Self {
            bank: DEFAULT_WITHDRAWAL_BANK.to_string(),
            account: account.into(),
            price,
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .with("bank", self.bank.as_str())
            .with("account", self.account.as_str())
            .with("price", self.price)
    }
}

fn pair_payload(pair: &CurrencyPair) -> Payload {
    Payload::new()
        .with("order_currency", pair.order_currency())
        .with("payment_currency", pair.payment_currency())
}

fn currency_payload(currency: &str) -> BithumbResult<Payload> {
    Ok(Payload::new().with("currency", normalize_currency(currency)?))
}

// =============================================================================
// Private API Client
// =============================================================================

/// Client for `/info/*` and `/trade/*` endpoints.
#[derive(Debug)]
pub struct BithumbPrivateApi {
    transport: Transport,
    credentials: Credentials,
}

impl BithumbPrivateApi {
    /// Create a client for the production API.
    ///
    /// Fails with `BithumbError::Config` if either key is empty.
    pub fn new(
        connect_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> BithumbResult<Self> {
        Self::with_base_url(BITHUMB_API_URL, connect_key, secret_key)
    }

    /// Create a client for another host.
    pub fn with_base_url(
        base_url: impl Into<String>,
        connect_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> BithumbResult<Self> {
        let credentials = Credentials::new(connect_key, secret_key).map_err(|e| {
            BithumbError::Config(format!(
                "private api requires connect_key and secret_key ({})",
                e
            ))
        })?;

        Ok(Self {
            transport: Transport::new(base_url),
            credentials,
        })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &BithumbConfig) -> BithumbResult<Self> {
        Self::with_base_url(
            config.base_url.clone(),
            config.connect_key.clone().unwrap_or_default(),
            config.secret_key.clone().unwrap_or_default(),
        )
    }

    async fn post(&self, path: &str, payload: Payload) -> BithumbResult<Envelope> {
        self.transport.post(path, &payload, &self.credentials).await
    }

    // =========================================================================
    // Info API
    // =========================================================================

    /// Member information and trading fee for a pair.
    ///
    /// `POST /info/account`
    pub async fn info_account(&self, pair: &CurrencyPair) -> BithumbResult<Envelope> {
        self.post("/info/account", pair_payload(pair)).await
    }

    /// Balances of a currency (`"ALL"` for every currency).
    ///
    /// `POST /info/balance`
    pub async fn info_balance(&self, currency: &str) -> BithumbResult<Envelope> {
        self.post("/info/balance", currency_payload(currency)?).await
    }

    /// Balance of the default payment currency (KRW).
    pub async fn info_balance_krw(&self) -> BithumbResult<Envelope> {
        self.info_balance(DEFAULT_PAYMENT_CURRENCY).await
    }

    /// Deposit wallet address of a coin.
    ///
    /// `POST /info/wallet_address`
    pub async fn info_wallet_address(&self, currency: &str) -> BithumbResult<Envelope> {
        self.post("/info/wallet_address", currency_payload(currency)?)
            .await
    }

    /// Member trading statistics for a pair.
    ///
    /// `POST /info/ticker`
    pub async fn info_ticker(&self, pair: &CurrencyPair) -> BithumbResult<Envelope> {
        self.post("/info/ticker", pair_payload(pair)).await
    }

    /// Open buy/sell orders.
    ///
    /// `POST /info/orders`
    ///
    /// Fails with `BithumbError::Validation` before sending if only one of
    /// `order_id` and `order_type` is set.
    pub async fn info_orders(&self, query: &OrdersQuery) -> BithumbResult<Envelope> {
        let payload = query.to_payload()?;
        self.post("/info/orders", payload).await
    }

    /// Execution details of one order.
    ///
    /// `POST /info/order_detail`
    pub async fn info_order_detail(
        &self,
        order_id: &str,
        pair: &CurrencyPair,
    ) -> BithumbResult<Envelope> {
        let payload = Payload::new()
            .with("order_id", order_id)
            .with("order_currency", pair.order_currency())
            .with("payment_currency", pair.payment_currency());
        self.post("/info/order_detail", payload).await
    }

    /// Completed transactions of the member.
    ///
    /// `POST /info/user_transactions`
    pub async fn info_user_transactions(
        &self,
        query: &UserTransactionsQuery,
    ) -> BithumbResult<Envelope> {
        self.post("/info/user_transactions", query.to_payload())
            .await
    }

    // =========================================================================
    // Trade API
    // =========================================================================

    /// Place a limit order.
    ///
    /// `POST /trade/place`
    pub async fn trade_place(
        &self,
        pair: &CurrencyPair,
        units: Decimal,
        price: Decimal,
        order_type: OrderType,
    ) -> BithumbResult<Envelope> {
        info!(pair = %pair, %units, %price, side = %order_type, "Placing limit order");

        let payload = pair_payload(pair)
            .with("units", units)
            .with("price", price)
            .with("type", order_type.as_str());
        self.post("/trade/place", payload).await
    }

    /// Cancel an open order.
    ///
    /// `POST /trade/cancel`
    pub async fn trade_cancel(
        &self,
        order_id: &str,
        order_type: OrderType,
        pair: &CurrencyPair,
    ) -> BithumbResult<Envelope> {
        info!(pair = %pair, order_id = %order_id, "Cancelling order");

        let payload = Payload::new()
            .with("order_id", order_id)
            .with("type", order_type.as_str())
            .with("order_currency", pair.order_currency())
            .with("payment_currency", pair.payment_currency());
        self.post("/trade/cancel", payload).await
    }

    /// Buy at market price.
    ///
    /// `POST /trade/market_buy`
    pub async fn trade_market_buy(
        &self,
        pair: &CurrencyPair,
        units: Decimal,
    ) -> BithumbResult<Envelope> {
        info!(pair = %pair, %units, "Placing market buy");
        self.post("/trade/market_buy", pair_payload(pair).with("units", units))
            .await
    }

    /// Sell at market price.
    ///
    /// `POST /trade/market_sell`
    pub async fn trade_market_sell(
        &self,
        pair: &CurrencyPair,
        units: Decimal,
    ) -> BithumbResult<Envelope> {
        info!(pair = %pair, %units, "Placing market sell");
        self.post("/trade/market_sell", pair_payload(pair).with("units", units))
            .await
    }

    /// Request a coin withdrawal.
    ///
    /// `POST /trade/btc_withdrawal`
    pub async fn trade_btc_withdrawal(
        &self,
        withdrawal: &CoinWithdrawal,
    ) -> BithumbResult<Envelope> {
        info!(currency = %withdrawal.currency, units = %withdrawal.units, "Requesting coin withdrawal");
        self.post("/trade/btc_withdrawal", withdrawal.to_payload())
            .await
    }

    /// Request a KRW withdrawal to a bank account.
    ///
    /// `POST /trade/krw_withdrawal`
    pub async fn trade_krw_withdrawal(
        &self,
        withdrawal: &KrwWithdrawal,
    ) -> BithumbResult<Envelope> {
        info!(bank = %withdrawal.bank, price = withdrawal.price, "Requesting KRW withdrawal");
        self.post("/trade/krw_withdrawal", withdrawal.to_payload())
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================
