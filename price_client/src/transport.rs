use {
	crate::{
		descriptor::{Method, RequestDescriptor},
		errors::TransportError,
	},
	async_trait::async_trait,
	reqwest::{Client, header::AUTHORIZATION},
	serde_json::Value,
	std::{collections::BTreeMap, time::Duration},
	tracing::debug,
};

/// 上游会话上下文 每个账户一份
///
/// 发送前由网关注入到请求里 不参与缓存 key 的计算
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
	pub base_url: String,
	pub headers: BTreeMap<String, String>,
}

impl SessionContext {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self { base_url: base_url.into(), headers: BTreeMap::new() }
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	pub fn with_bearer_token(self, token: &str) -> Self {
		self.with_header(AUTHORIZATION.as_str(), format!("Bearer {}", token))
	}

	pub fn outbound(&self, descriptor: RequestDescriptor) -> OutboundRequest {
		OutboundRequest { descriptor, base_url: self.base_url.clone(), headers: self.headers.clone() }
	}
}

/// 真正交给 transport 的请求 = 描述 + 会话信息
#[derive(Debug, Clone)]
pub struct OutboundRequest {
	pub descriptor: RequestDescriptor,
	pub base_url: String,
	pub headers: BTreeMap<String, String>,
}

impl OutboundRequest {
	pub fn url(&self) -> String {
		format!("{}/{}", self.base_url.trim_end_matches('/'), self.descriptor.path.trim_start_matches('/'))
	}
}

/// 发送请求的能力 网络、鉴权、服务发现都在这一层之外
#[async_trait]
pub trait Transport: Send + Sync + 'static {
	async fn send(&self, request: &OutboundRequest) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
	client: Client,
}

impl HttpTransport {
	pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
		let client = Client::builder().timeout(timeout).connect_timeout(connect_timeout).build().map_err(|e| TransportError::Request(format!("Failed to build HTTP client: {}", e)))?;
		Ok(Self { client })
	}

	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, request: &OutboundRequest) -> Result<Value, TransportError> {
		let url = request.url();
		let params = &request.descriptor.params;
		let mut builder = match request.descriptor.method {
			Method::Get => self.client.get(&url).query(params),
		};
		for (name, value) in request.headers.iter() {
			builder = builder.header(name.as_str(), value.as_str());
		}

		debug!("Sending {:?} {} params={:?}", request.descriptor.method, url, params);
		let response = builder.send().await.map_err(|e| TransportError::Request(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::Status { status: status.as_u16(), body });
		}

		response.json::<Value>().await.map_err(|e| TransportError::Decode(e.to_string()))
	}
}
