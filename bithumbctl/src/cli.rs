//! Command-line arguments.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use bithumb_connectors::public_api::{DEFAULT_ORDERBOOK_COUNT, DEFAULT_TRANSACTION_COUNT};
use bithumb_connectors::private_api::{DEFAULT_ORDERS_COUNT, DEFAULT_USER_TRANSACTIONS_COUNT};
use bithumb_domain::{ChartInterval, CurrencyPair, OrderType, TransactionSearch};

#[derive(Debug, Parser)]
#[command(name = "bithumbctl")]
#[command(about = "Query Bithumb market data and manage an account from the shell")]
#[command(version)]
pub struct Cli {
    /// Order currency (e.g. BTC, ETH)
    #[arg(long, global = true, default_value = "BTC")]
    pub order: String,

    /// Payment currency
    #[arg(long, global = true, default_value = "KRW")]
    pub payment: String,

    /// Override the API base URL
    #[arg(long, global = true, env = "BITHUMB_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Currency pair selected with `--order` / `--payment`.
    pub fn pair(&self) -> anyhow::Result<CurrencyPair> {
        Ok(CurrencyPair::new(&self.order, &self.payment)?)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current price snapshot
    Ticker,

    /// Order book
    Orderbook {
        /// Levels per side
        #[arg(long, default_value_t = DEFAULT_ORDERBOOK_COUNT)]
        count: u32,
    },

    /// Recent executed trades
    Transactions {
        /// Number of trades
        #[arg(long, default_value_t = DEFAULT_TRANSACTION_COUNT)]
        count: u32,
    },

    /// Deposit/withdrawal availability of the order currency
    AssetsStatus,

    /// Bithumb market indices
    Btci,

    /// Candlesticks
    Candlestick {
        /// Interval (1m, 3m, 5m, 10m, 30m, 1h, 6h, 12h, 24h)
        #[arg(long, default_value = "24h", value_parser = parse_interval)]
        interval: ChartInterval,
    },

    /// Member information and fees (private)
    Account,

    /// Balance of a currency, or ALL (private)
    Balance {
        /// Currency
        #[arg(long, default_value = "KRW")]
        currency: String,
    },

    /// Deposit wallet address (private)
    WalletAddress {
        /// Currency
        #[arg(long)]
        currency: String,
    },

    /// Open orders (private)
    Orders {
        /// Specific order id (requires --type)
        #[arg(long)]
        order_id: Option<String>,

        /// Specific order side (requires --order-id)
        #[arg(long = "type", value_parser = parse_order_type)]
        order_type: Option<OrderType>,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_ORDERS_COUNT)]
        count: u32,

        /// Only orders after this millisecond timestamp
        #[arg(long)]
        after: Option<i64>,
    },

    /// Execution details of one order (private)
    OrderDetail {
        /// Order id
        #[arg(long)]
        order_id: String,
    },

    /// Completed transactions (private)
    UserTransactions {
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_USER_TRANSACTIONS_COUNT)]
        count: u32,

        /// Kind filter (all, bought, sold, deposit, withdrawal, ... or 0-9)
        #[arg(long, default_value = "all", value_parser = parse_search)]
        search: TransactionSearch,
    },

    /// Place a limit order (private)
    Place {
        /// bid or ask
        #[arg(long = "type", value_parser = parse_order_type)]
        order_type: OrderType,

        /// Quantity
        #[arg(long)]
        units: Decimal,

        /// Limit price
        #[arg(long)]
        price: Decimal,
    },

    /// Cancel an order (private)
    Cancel {
        /// Order id
        #[arg(long)]
        order_id: String,

        /// bid or ask
        #[arg(long = "type", value_parser = parse_order_type)]
        order_type: OrderType,
    },

    /// Buy at market price (private)
    MarketBuy {
        /// Quantity
        #[arg(long)]
        units: Decimal,
    },

    /// Sell at market price (private)
    MarketSell {
        /// Quantity
        #[arg(long)]
        units: Decimal,
    },
}

impl Command {
    /// Needs credentials.
    pub fn is_private(&self) -> bool {
        !matches!(
            self,
            Command::Ticker
                | Command::Orderbook { .. }
                | Command::Transactions { .. }
                | Command::AssetsStatus
                | Command::Btci
                | Command::Candlestick { .. }
        )
    }
}

fn parse_interval(s: &str) -> Result<ChartInterval, String> {
    s.parse().map_err(|e: bithumb_domain::DomainError| e.to_string())
}

fn parse_order_type(s: &str) -> Result<OrderType, String> {
    s.parse().map_err(|e: bithumb_domain::DomainError| e.to_string())
}

fn parse_search(s: &str) -> Result<TransactionSearch, String> {
    s.parse().map_err(|e: bithumb_domain::DomainError| e.to_string())
}
