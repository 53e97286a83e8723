//! Command dispatch.

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use bithumb_connectors::{
    BithumbConfig, BithumbPrivateApi, BithumbPublicApi, Envelope, OrdersQuery,
    UserTransactionsQuery,
};

use crate::cli::{Cli, Command};

/// Run one command and return the response envelope as JSON.
pub async fn run(cli: Cli, config: BithumbConfig) -> anyhow::Result<Value> {
    let config = match &cli.api_url {
        Some(url) => config.with_base_url(url)?,
        None => config,
    };
    let pair = cli.pair()?;

    debug!(command = ?cli.command, pair = %pair, base_url = %config.base_url, "Running command");

    let envelope: Envelope = if cli.command.is_private() {
        let api = BithumbPrivateApi::from_config(&config)
            .context("set BITHUMB_CONNECT_KEY and BITHUMB_SECRET_KEY for private commands")?;
        run_private(&api, cli.command, &pair).await?
    } else {
        let api = BithumbPublicApi::from_config(&config);
        run_public(&api, cli.command, &pair).await?
    };

    Ok(envelope.into_inner())
}

async fn run_public(
    api: &BithumbPublicApi,
    command: Command,
    pair: &bithumb_domain::CurrencyPair,
) -> anyhow::Result<Envelope> {
    let envelope = match command {
        Command::Ticker => api.ticker(pair).await?,
        Command::Orderbook { count } => api.orderbook(pair, count).await?,
        Command::Transactions { count } => api.transaction_history(pair, count).await?,
        Command::AssetsStatus => api.assets_status(pair.order_currency()).await?,
        Command::Btci => api.btci().await?,
        Command::Candlestick { interval } => api.candlestick(pair, interval).await?,
        other => anyhow::bail!("{:?} is not a public command", other),
    };
    Ok(envelope)
}

async fn run_private(
    api: &BithumbPrivateApi,
    command: Command,
    pair: &bithumb_domain::CurrencyPair,
) -> anyhow::Result<Envelope> {
    let envelope = match command {
        Command::Account => api.info_account(pair).await?,
        Command::Balance { currency } => api.info_balance(&currency).await?,
        Command::WalletAddress { currency } => api.info_wallet_address(&currency).await?,
        Command::Orders {
            order_id,
            order_type,
            count,
            after,
        } => {
            let query = OrdersQuery {
                order_id,
                order_type,
                count,
                after,
                ..OrdersQuery::new(pair.clone())
            };
            api.info_orders(&query).await?
        }
        Command::OrderDetail { order_id } => api.info_order_detail(&order_id, pair).await?,
        Command::UserTransactions {
            offset,
            count,
            search,
        } => {
            let query = UserTransactionsQuery::new(pair.clone())
                .with_page(offset, count)
                .with_search(search);
            api.info_user_transactions(&query).await?
        }
        Command::Place {
            order_type,
            units,
            price,
        } => api.trade_place(pair, units, price, order_type).await?,
        Command::Cancel {
            order_id,
            order_type,
        } => api.trade_cancel(&order_id, order_type, pair).await?,
        Command::MarketBuy { units } => api.trade_market_buy(pair, units).await?,
        Command::MarketSell { units } => api.trade_market_sell(pair, units).await?,
        other => anyhow::bail!("{:?} is not a private command", other),
    };
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bithumb_connectors::BithumbError;
    use bithumb_testkit::{ok_envelope, StubExchange};
    use clap::Parser;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bithumbctl").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_public_command_hits_stub() {
        let stub = StubExchange::start().await.unwrap();
        let envelope = ok_envelope(json!({"closing_price": "1"}));
        stub.respond_json("/public/ticker/ETH_KRW", 200, &envelope);
        let config = BithumbConfig::default().with_base_url(&stub.base_url()).unwrap();

        let output = run(parse(&["ticker", "--order", "ETH"]), config).await.unwrap();

        assert_eq!(output, envelope);
    }

    #[tokio::test]
    async fn test_private_command_without_keys_fails_early() {
        let stub = StubExchange::start().await.unwrap();
        let config = BithumbConfig::default().with_base_url(&stub.base_url()).unwrap();

        let err = run(parse(&["balance"]), config).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BithumbError>(),
            Some(BithumbError::Config(_))
        ));
        assert_eq!(stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_private_orders_validation_surfaces() {
        let stub = StubExchange::start().await.unwrap();
        let config = BithumbConfig::default()
            .with_base_url(&stub.base_url())
            .unwrap()
            .with_credentials("connect", "secret");

        let err = run(parse(&["orders", "--order-id", "C0101"]), config)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BithumbError>(),
            Some(BithumbError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_private_market_buy_is_signed() {
        let stub = StubExchange::start().await.unwrap();
        stub.respond_json("/trade/market_buy", 200, &json!({"status": "0000", "order_id": "C9"}));
        let config = BithumbConfig::default()
            .with_base_url(&stub.base_url())
            .unwrap()
            .with_credentials("connect", "secret");

        let output = run(parse(&["market-buy", "--units", "0.5"]), config).await.unwrap();

        assert_eq!(output["order_id"], "C9");
        let request = stub.last_request().unwrap();
        assert_eq!(request.body, "order_currency=BTC&payment_currency=KRW&units=0.5");
        assert_eq!(request.header("api-key"), Some("connect"));
        assert!(request.header("api-sign").is_some());
    }
}
