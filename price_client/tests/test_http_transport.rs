use {
	axum::{
		Json, Router,
		extract::{Path, RawQuery},
		http::{HeaderMap, StatusCode, header::AUTHORIZATION},
		routing::get,
	},
	price_client::{Gateway, HttpTransport, PriceClient, PriceError, RequestDescriptor, SessionContext, Transport, TransportError},
	serde_json::{Value, json},
	std::{net::SocketAddr, sync::Arc, time::Duration},
	tokio::net::TcpListener,
};

/// 回显收到的 query 和 Authorization 头
async fn echo_prices(RawQuery(query): RawQuery, headers: HeaderMap) -> Json<Value> {
	let auth = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_string);
	Json(json!({ "query": query, "auth": auth }))
}

async fn chart_down(Path(_id): Path<String>) -> (StatusCode, &'static str) {
	(StatusCode::BAD_GATEWAY, "down")
}

async fn plain_text() -> &'static str {
	"not json"
}

/// 本地起一个上游 返回监听地址
async fn spawn_upstream() -> SocketAddr {
	let routes = Router::new().route("/api/v1/prices", get(echo_prices)).route("/api/v1/chart/{id}", get(chart_down)).route("/api/v1/text", get(plain_text));
	let app = Router::new().merge(routes.clone()).nest("/upstream", routes);

	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind local upstream");
	let addr = listener.local_addr().expect("local addr");
	tokio::spawn(async move {
		axum::serve(listener, app).await.expect("local upstream stopped");
	});
	addr
}

fn http_transport() -> HttpTransport {
	HttpTransport::new(Duration::from_secs(5), Duration::from_secs(2)).expect("build http transport")
}

fn prices_descriptor() -> RequestDescriptor {
	RequestDescriptor::get("api/v1/prices").param("cryptoIds", "btc,eth").param("fiat", "usd")
}

#[tokio::test]
async fn test_http_transport_sends_query_and_bearer_token() {
	let addr = spawn_upstream().await;
	let session = SessionContext::new(format!("http://{}", addr)).with_bearer_token("tok");

	let value = http_transport().send(&session.outbound(prices_descriptor())).await.expect("request should succeed");
	assert_eq!(value, json!({ "query": "cryptoIds=btc%2Ceth&fiat=usd", "auth": "Bearer tok" }));
}

#[tokio::test]
async fn test_http_transport_without_token_sends_no_auth_header() {
	let addr = spawn_upstream().await;
	let session = SessionContext::new(format!("http://{}", addr));

	let value = http_transport().send(&session.outbound(prices_descriptor())).await.expect("request should succeed");
	assert_eq!(value["auth"], Value::Null);
}

/// base_url 结尾带不带 / 都能拼对 带路径前缀也一样
#[tokio::test]
async fn test_http_transport_joins_trailing_slash_base_url() {
	let addr = spawn_upstream().await;
	let transport = http_transport();

	for base_url in [format!("http://{}/", addr), format!("http://{}/upstream/", addr), format!("http://{}/upstream", addr)] {
		let session = SessionContext::new(base_url.clone());
		let value = transport.send(&session.outbound(prices_descriptor())).await.unwrap_or_else(|e| panic!("base_url={} failed: {}", base_url, e));
		assert_eq!(value["query"], json!("cryptoIds=btc%2Ceth&fiat=usd"), "base_url={}", base_url);
	}
}

#[tokio::test]
async fn test_http_transport_maps_error_status() {
	let addr = spawn_upstream().await;
	let session = SessionContext::new(format!("http://{}", addr));
	let descriptor = RequestDescriptor::get("api/v1/chart/btc").param("fiat", "usd").param("days", 30);

	let err = http_transport().send(&session.outbound(descriptor)).await.expect_err("502 should fail");
	assert_eq!(err, TransportError::Status { status: 502, body: "down".to_string() });
}

#[tokio::test]
async fn test_http_transport_rejects_non_json_body() {
	let addr = spawn_upstream().await;
	let session = SessionContext::new(format!("http://{}", addr));

	let err = http_transport().send(&session.outbound(RequestDescriptor::get("api/v1/text"))).await.expect_err("plain text is not json");
	assert!(matches!(err, TransportError::Decode(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_http_transport_maps_connection_failure() {
	// 先占一个端口再释放 之后连过去没人听
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
	let addr = listener.local_addr().expect("local addr");
	drop(listener);

	let session = SessionContext::new(format!("http://{}", addr));
	let err = http_transport().send(&session.outbound(prices_descriptor())).await.expect_err("nothing is listening");
	assert!(matches!(err, TransportError::Request(_)), "unexpected error: {:?}", err);
}

/// 整条链路 client -> gateway -> reqwest -> 本地上游
#[tokio::test]
async fn test_client_over_http_transport() {
	let addr = spawn_upstream().await;
	let session = SessionContext::new(format!("http://{}/", addr)).with_bearer_token("tok");
	let client = PriceClient::new(Gateway::new(Arc::new(http_transport()), session));

	let err = client.chart("btc", "1D", "usd").await.expect_err("chart upstream is down");
	assert_eq!(err, PriceError::Transport(TransportError::Status { status: 502, body: "down".to_string() }));
	assert!(client.gateway().is_empty(), "failure should not be cached");

	let value = client.gateway().fetch(prices_descriptor()).await.expect("prices should succeed");
	assert_eq!(value["auth"], json!("Bearer tok"));
	assert_eq!(client.gateway().len(), 1);
}
