//! Public (unauthenticated) market data endpoints.
//!
//! Every method returns the full response envelope; use
//! [`Envelope::data_as`] to decode it into a model from `bithumb_domain`.
//!
//! # Example
//!
//! ```ignore
//! let api = BithumbPublicApi::new();
//! let ticker: Ticker = api.ticker(&CurrencyPair::default()).await?.data_as()?;
//! println!("BTC/KRW {}", ticker.closing_price);
//! ```

use bithumb_domain::{ChartInterval, CurrencyPair};

use crate::config::{BithumbConfig, BITHUMB_API_URL};
use crate::envelope::Envelope;
use crate::error::BithumbResult;
use crate::transport::Transport;

/// Default number of order book levels per side.
pub const DEFAULT_ORDERBOOK_COUNT: u32 = 30;

/// Default number of recent transactions.
pub const DEFAULT_TRANSACTION_COUNT: u32 = 20;

/// Client for `/public/*` endpoints.
#[derive(Debug)]
pub struct BithumbPublicApi {
    transport: Transport,
}

impl BithumbPublicApi {
    /// Client for the production API.
    pub fn new() -> Self {
        Self::with_base_url(BITHUMB_API_URL)
    }

    /// Client for another host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(base_url),
        }
    }

    /// Client built from configuration (credentials are ignored).
    pub fn from_config(config: &BithumbConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    /// Current price snapshot.
    ///
    /// `GET /public/ticker/{order}_{payment}`
    pub async fn ticker(&self, pair: &CurrencyPair) -> BithumbResult<Envelope> {
        self.transport.get(&ticker_path(pair)).await
    }

    /// Order book, `count` levels per side.
    ///
    /// `GET /public/orderbook/{order}_{payment}?count={count}`
    pub async fn orderbook(&self, pair: &CurrencyPair, count: u32) -> BithumbResult<Envelope> {
        self.transport.get(&orderbook_path(pair, count)).await
    }

    /// Most recent executed trades.
    ///
    /// `GET /public/transaction_history/{order}_{payment}?count={count}`
    pub async fn transaction_history(
        &self,
        pair: &CurrencyPair,
        count: u32,
    ) -> BithumbResult<Envelope> {
        self.transport
            .get(&transaction_history_path(pair, count))
            .await
    }

    /// Deposit/withdrawal availability of a currency.
    ///
    /// `GET /public/assetsstatus/{order}`
    pub async fn assets_status(&self, order_currency: &str) -> BithumbResult<Envelope> {
        self.transport.get(&assets_status_path(order_currency)?).await
    }

    /// Bithumb market indices (BTMI, BTAI).
    ///
    /// `GET /public/btci`
    pub async fn btci(&self) -> BithumbResult<Envelope> {
        self.transport.get("/public/btci").await
    }

    /// Candlesticks for an interval.
    ///
    /// `GET /public/candlestick/{order}_{payment}/{interval}`
    pub async fn candlestick(
        &self,
        pair: &CurrencyPair,
        interval: ChartInterval,
    ) -> BithumbResult<Envelope> {
        self.transport.get(&candlestick_path(pair, interval)).await
    }
}

impl Default for BithumbPublicApi {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Paths
// =============================================================================

fn ticker_path(pair: &CurrencyPair) -> String {
    format!("/public/ticker/{}", pair.path_segment())
}

fn orderbook_path(pair: &CurrencyPair, count: u32) -> String {
    format!("/public/orderbook/{}?count={}", pair.path_segment(), count)
}

fn transaction_history_path(pair: &CurrencyPair, count: u32) -> String {
    format!(
        "/public/transaction_history/{}?count={}",
        pair.path_segment(),
        count
    )
}

fn assets_status_path(order_currency: &str) -> BithumbResult<String> {
    let currency = bithumb_domain::normalize_currency(order_currency)?;
    Ok(format!("/public/assetsstatus/{}", currency))
}

fn candlestick_path(pair: &CurrencyPair, interval: ChartInterval) -> String {
    format!("/public/candlestick/{}/{}", pair.path_segment(), interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BithumbError;

    #[test]
    fn test_default_pair_paths() {
        let pair = CurrencyPair::default();

        assert_eq!(ticker_path(&pair), "/public/ticker/BTC_KRW");
        assert_eq!(
            orderbook_path(&pair, DEFAULT_ORDERBOOK_COUNT),
            "/public/orderbook/BTC_KRW?count=30"
        );
        assert_eq!(
            transaction_history_path(&pair, DEFAULT_TRANSACTION_COUNT),
            "/public/transaction_history/BTC_KRW?count=20"
        );
        assert_eq!(
            candlestick_path(&pair, ChartInterval::default()),
            "/public/candlestick/BTC_KRW/24h"
        );
    }

    #[test]
    fn test_overridden_pair_paths() {
        let pair = CurrencyPair::new("ETH", "BTC").unwrap();

        assert_eq!(ticker_path(&pair), "/public/ticker/ETH_BTC");
        assert_eq!(
            candlestick_path(&pair, ChartInterval::TenMinutes),
            "/public/candlestick/ETH_BTC/10m"
        );
    }

    #[test]
    fn test_assets_status_path() {
        assert_eq!(assets_status_path("xrp").unwrap(), "/public/assetsstatus/XRP");
        assert!(matches!(
            assets_status_path("../info"),
            Err(BithumbError::Domain(_))
        ));
    }
}
