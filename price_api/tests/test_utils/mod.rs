use {
	async_trait::async_trait,
	axum::{
		Router,
		body::{Body, to_bytes},
		http::{Request, StatusCode},
	},
	price_api::server::{AppState, app},
	price_client::{Gateway, OutboundRequest, PriceClient, SessionContext, Transport, TransportError},
	serde_json::{Value, json},
	std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	tower::ServiceExt,
};

/// 固定回显的上游 fail=true 时所有请求都失败
pub struct StubTransport {
	pub calls: AtomicUsize,
	pub fail: bool,
}

impl StubTransport {
	pub fn new(fail: bool) -> Self {
		Self { calls: AtomicUsize::new(0), fail }
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Transport for StubTransport {
	async fn send(&self, request: &OutboundRequest) -> Result<Value, TransportError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err(TransportError::Status { status: 503, body: "unavailable".to_string() });
		}
		Ok(match request.descriptor.params.get("cryptoIds") {
			Some(ids) => Value::Array(ids.split(',').map(|id| json!({ "id": id, "price": 42 })).collect()),
			None => json!({ "path": request.descriptor.path, "days": request.descriptor.params.get("days") }),
		})
	}
}

pub fn build_app(transport: Arc<StubTransport>) -> Router {
	let gateway = Gateway::new(transport, SessionContext::new("https://price.test"));
	app(AppState::new(PriceClient::new(gateway)))
}

/// 发一个 GET 返回 (http 状态, json body)
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
	let request = Request::builder().uri(uri).body(Body::empty()).expect("valid request");
	let response = app.oneshot(request).await.expect("router is infallible");
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string())) };
	(status, body)
}
