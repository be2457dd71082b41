use {
	async_trait::async_trait,
	price_client::{Gateway, OutboundRequest, PriceClient, SessionContext, Transport, TransportError},
	serde_json::{Value, json},
	std::{
		sync::{
			Arc, Mutex,
			atomic::{AtomicUsize, Ordering},
		},
		time::Duration,
	},
	tokio::sync::Semaphore,
};

pub const TEST_BASE_URL: &str = "https://price.test";

type Handler = Box<dyn Fn(&OutboundRequest, usize) -> Result<Value, TransportError> + Send + Sync>;

/// 记录调用次数和请求内容的 transport
///
/// handler 的第二个参数是这是第几次调用（从 1 开始）
/// 设置了 gate 的话请求会卡住 直到 `release` 放行
pub struct MockTransport {
	calls: AtomicUsize,
	requests: Mutex<Vec<OutboundRequest>>,
	handler: Handler,
	gate: Option<Semaphore>,
}

#[allow(dead_code)]
impl MockTransport {
	pub fn new<F>(handler: F) -> Self
	where
		F: Fn(&OutboundRequest, usize) -> Result<Value, TransportError> + Send + Sync + 'static,
	{
		Self { calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()), handler: Box::new(handler), gate: None }
	}

	/// 请求先卡住 调 release 才返回
	pub fn gated<F>(handler: F) -> Self
	where
		F: Fn(&OutboundRequest, usize) -> Result<Value, TransportError> + Send + Sync + 'static,
	{
		Self { gate: Some(Semaphore::new(0)), ..Self::new(handler) }
	}

	/// 按请求参数回显 market 行情 其他请求回显参数
	pub fn echo() -> Self {
		Self::new(|request, _| Ok(echo_response(request)))
	}

	pub fn gated_echo() -> Self {
		Self::gated(|request, _| Ok(echo_response(request)))
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn requests(&self) -> Vec<OutboundRequest> {
		self.requests.lock().unwrap().clone()
	}

	pub fn release(&self) {
		if let Some(gate) = self.gate.as_ref() {
			gate.add_permits(1024);
		}
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn send(&self, request: &OutboundRequest) -> Result<Value, TransportError> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
		self.requests.lock().unwrap().push(request.clone());
		if let Some(gate) = self.gate.as_ref() {
			gate.acquire().await.expect("gate closed").forget();
		}
		(self.handler)(request, call)
	}
}

/// market 请求返回 [{id, price}] 其他请求返回 {path, params}
pub fn echo_response(request: &OutboundRequest) -> Value {
	match request.descriptor.params.get("cryptoIds") {
		Some(ids) => Value::Array(ids.split(',').map(|id| json!({ "id": id, "price": 1.5 })).collect()),
		None => json!({ "path": request.descriptor.path, "params": request.descriptor.params }),
	}
}

pub fn test_session() -> SessionContext {
	SessionContext::new(TEST_BASE_URL)
}

pub fn build_gateway(transport: Arc<MockTransport>) -> Gateway {
	Gateway::new(transport, test_session())
}

#[allow(dead_code)]
pub fn build_gateway_with_ttl(transport: Arc<MockTransport>, ttl: Duration) -> Gateway {
	Gateway::with_ttl(transport, test_session(), ttl)
}

#[allow(dead_code)]
pub fn build_client(transport: Arc<MockTransport>) -> PriceClient {
	PriceClient::new(build_gateway(transport))
}

/// 生成 n 个测试 id: coin-0 .. coin-{n-1}
#[allow(dead_code)]
pub fn generate_ids(n: usize) -> Vec<String> {
	(0..n).map(|i| format!("coin-{}", i)).collect()
}

/// 等到 transport 至少被调用 n 次
#[allow(dead_code)]
pub async fn wait_for_calls(transport: &MockTransport, n: usize) {
	while transport.calls() < n {
		tokio::task::yield_now().await;
	}
}
