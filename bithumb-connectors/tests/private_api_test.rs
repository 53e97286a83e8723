//! Private endpoints against the stub exchange.
//!
//! Verifies the signed request on the wire (headers, body order, signature)
//! and the error handling shared with the public client.

use bithumb_connectors::signer;
use bithumb_connectors::{
    BithumbConfig, BithumbError, BithumbPrivateApi, CoinWithdrawal, KrwWithdrawal, OrdersQuery,
    UserTransactionsQuery,
};
use bithumb_domain::{CurrencyPair, OrderType, PlacedOrder, TransactionSearch};
use bithumb_testkit::{error_envelope, ok_envelope, RecordedRequest, StubExchange};
use rust_decimal_macros::dec;
use serde_json::json;

const CONNECT_KEY: &str = "test-connect-key";
const SECRET_KEY: &str = "test-secret-key";

async fn setup() -> (StubExchange, BithumbPrivateApi) {
    let stub = StubExchange::start().await.unwrap();
    let api = BithumbPrivateApi::with_base_url(stub.base_url(), CONNECT_KEY, SECRET_KEY).unwrap();
    (stub, api)
}

/// Check headers and recompute the signature from what actually went over the wire.
fn assert_signed(request: &RecordedRequest) {
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("Api-Key"), Some(CONNECT_KEY));
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );

    let nonce = request.header("Api-Nonce").expect("nonce header");
    let expected = signer::sign(SECRET_KEY, &request.path, &request.body, nonce).unwrap();
    assert_eq!(request.header("Api-Sign"), Some(expected.as_str()));
}

// =============================================================================
// Construction
// =============================================================================

#[tokio::test]
async fn test_missing_keys_fail_before_any_request() {
    let stub = StubExchange::start().await.unwrap();

    let no_secret = BithumbPrivateApi::with_base_url(stub.base_url(), CONNECT_KEY, "");
    let no_connect = BithumbPrivateApi::with_base_url(stub.base_url(), "", SECRET_KEY);
    let from_config =
        BithumbPrivateApi::from_config(&BithumbConfig::default().with_base_url(&stub.base_url()).unwrap());

    assert!(matches!(no_secret, Err(BithumbError::Config(_))));
    assert!(matches!(no_connect, Err(BithumbError::Config(_))));
    assert!(matches!(from_config, Err(BithumbError::Config(_))));
    assert_eq!(stub.request_count(), 0);
}

// =============================================================================
// Info API
// =============================================================================

#[tokio::test]
async fn test_info_balance_signed_request() {
    let (stub, api) = setup().await;
    let envelope = ok_envelope(json!({"total_btc": "1.5", "available_btc": "1.0"}));
    stub.respond_json("/info/balance", 200, &envelope);

    let result = api.info_balance("BTC").await.unwrap();

    assert_eq!(result.as_value(), &envelope);
    let request = stub.last_request().unwrap();
    assert_eq!(request.path, "/info/balance");
    assert_eq!(request.body, "currency=BTC");
    assert_signed(&request);
}

#[tokio::test]
async fn test_info_account_ticker_wallet_and_detail() {
    let (stub, api) = setup().await;
    for path in [
        "/info/account",
        "/info/ticker",
        "/info/wallet_address",
        "/info/order_detail",
    ] {
        stub.respond_json(path, 200, &ok_envelope(json!({})));
    }
    let pair = CurrencyPair::krw("ETH").unwrap();

    api.info_account(&pair).await.unwrap();
    api.info_ticker(&pair).await.unwrap();
    api.info_wallet_address("eth").await.unwrap();
    api.info_order_detail("C0101000000001", &pair).await.unwrap();

    let bodies: Vec<(String, String)> = stub
        .requests()
        .into_iter()
        .inspect(assert_signed)
        .map(|r| (r.path, r.body))
        .collect();
    assert_eq!(
        bodies,
        vec![
            ("/info/account".to_string(), "order_currency=ETH&payment_currency=KRW".to_string()),
            ("/info/ticker".to_string(), "order_currency=ETH&payment_currency=KRW".to_string()),
            ("/info/wallet_address".to_string(), "currency=ETH".to_string()),
            (
                "/info/order_detail".to_string(),
                "order_id=C0101000000001&order_currency=ETH&payment_currency=KRW".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_info_orders_requires_id_and_type_together() {
    let (stub, api) = setup().await;
    stub.respond_json("/info/orders", 200, &ok_envelope(json!([])));

    let id_only = OrdersQuery {
        order_id: Some("C0101".to_string()),
        ..OrdersQuery::default()
    };
    let type_only = OrdersQuery {
        order_type: Some(OrderType::Ask),
        ..OrdersQuery::default()
    };

    assert!(matches!(
        api.info_orders(&id_only).await,
        Err(BithumbError::Validation(_))
    ));
    assert!(matches!(
        api.info_orders(&type_only).await,
        Err(BithumbError::Validation(_))
    ));
    assert_eq!(stub.request_count(), 0);

    api.info_orders(&OrdersQuery::default()).await.unwrap();
    api.info_orders(&OrdersQuery::default().with_order("C0101", OrderType::Ask))
        .await
        .unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].body,
        "order_currency=BTC&payment_currency=KRW&count=100"
    );
    assert_eq!(
        requests[1].body,
        "order_currency=BTC&payment_currency=KRW&count=100&order_id=C0101&type=ask"
    );
    requests.iter().for_each(assert_signed);
}

#[tokio::test]
async fn test_info_user_transactions_payload() {
    let (stub, api) = setup().await;
    stub.respond_json("/info/user_transactions", 200, &ok_envelope(json!([])));

    let query = UserTransactionsQuery::default()
        .with_page(40, 10)
        .with_search(TransactionSearch::Deposit);
    api.info_user_transactions(&query).await.unwrap();

    let request = stub.last_request().unwrap();
    assert_eq!(
        request.body,
        "order_currency=BTC&payment_currency=KRW&offset=40&count=10&searchGb=4"
    );
    assert_signed(&request);
}

// =============================================================================
// Trade API
// =============================================================================

#[tokio::test]
async fn test_trade_place_returns_order_id() {
    let (stub, api) = setup().await;
    stub.respond_json(
        "/trade/place",
        200,
        &json!({"status": "0000", "order_id": "C0101000000123"}),
    );

    let order: PlacedOrder = api
        .trade_place(
            &CurrencyPair::default(),
            dec!(0.0015),
            dec!(50000000),
            OrderType::Bid,
        )
        .await
        .unwrap()
        .decode()
        .unwrap();

    assert_eq!(order.order_id, "C0101000000123");
    let request = stub.last_request().unwrap();
    assert_eq!(
        request.body,
        "order_currency=BTC&payment_currency=KRW&units=0.0015&price=50000000&type=bid"
    );
    assert_signed(&request);
}

#[tokio::test]
async fn test_trade_cancel_and_market_orders() {
    let (stub, api) = setup().await;
    for path in ["/trade/cancel", "/trade/market_buy", "/trade/market_sell"] {
        stub.respond_json(path, 200, &json!({"status": "0000", "order_id": "C1"}));
    }
    let pair = CurrencyPair::krw("XRP").unwrap();

    api.trade_cancel("C1", OrderType::Ask, &pair).await.unwrap();
    api.trade_market_buy(&pair, dec!(10)).await.unwrap();
    api.trade_market_sell(&pair, dec!(2.5)).await.unwrap();

    let bodies: Vec<String> = stub.requests().into_iter().map(|r| r.body).collect();
    assert_eq!(
        bodies,
        vec![
            "order_id=C1&type=ask&order_currency=XRP&payment_currency=KRW",
            "order_currency=XRP&payment_currency=KRW&units=10",
            "order_currency=XRP&payment_currency=KRW&units=2.5",
        ]
    );
}

#[tokio::test]
async fn test_withdrawals() {
    let (stub, api) = setup().await;
    stub.respond_json("/trade/btc_withdrawal", 200, &json!({"status": "0000"}));
    stub.respond_json("/trade/krw_withdrawal", 200, &json!({"status": "0000"}));

    api.trade_btc_withdrawal(&CoinWithdrawal {
        currency: "XRP".to_string(),
        address: "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh".to_string(),
        destination: Some("123456".to_string()),
        units: dec!(25),
    })
    .await
    .unwrap();
    api.trade_krw_withdrawal(&KrwWithdrawal::new("3021234567890", 50_000))
        .await
        .unwrap();

    let requests = stub.requests();
    assert_eq!(
        requests[0].body,
        "currency=XRP&address=rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh&destination=123456&units=25"
    );
    assert_eq!(
        requests[1].body,
        "bank=011_%EB%86%8D%ED%98%91%EC%9D%80%ED%96%89&account=3021234567890&price=50000"
    );
    requests.iter().for_each(assert_signed);
}

// =============================================================================
// Nonces and failures
// =============================================================================

#[tokio::test]
async fn test_nonces_strictly_increase() {
    let (stub, api) = setup().await;
    stub.respond_json("/info/balance", 200, &ok_envelope(json!({})));

    for _ in 0..5 {
        api.info_balance_krw().await.unwrap();
    }

    let nonces: Vec<u64> = stub
        .requests()
        .iter()
        .map(|r| r.header("Api-Nonce").unwrap().parse().unwrap())
        .collect();
    assert_eq!(nonces.len(), 5);
    assert!(nonces.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_post_http_500_is_transport_error() {
    let (stub, api) = setup().await;
    stub.respond_json("/info/balance", 500, &ok_envelope(json!({})));

    let err = api.info_balance("KRW").await.unwrap_err();

    assert_eq!(
        err,
        BithumbError::Transport {
            method: "POST",
            path: "/info/balance".to_string(),
            status: 500,
        }
    );
}

#[tokio::test]
async fn test_post_error_envelope_is_api_error() {
    let (stub, api) = setup().await;
    stub.respond_json(
        "/trade/place",
        200,
        &error_envelope("5600", "주문량이 사용가능 잔고를 초과하였습니다."),
    );

    let err = api
        .trade_place(&CurrencyPair::default(), dec!(100), dec!(1), OrderType::Bid)
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some("5600"));
}

#[tokio::test]
async fn test_post_to_unreachable_host_is_request_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api =
        BithumbPrivateApi::with_base_url(format!("http://{}", addr), CONNECT_KEY, SECRET_KEY).unwrap();

    let err = api.info_balance("BTC").await.unwrap_err();

    assert!(matches!(err, BithumbError::Request(_)));
    assert!(!err.is_transport());
}
