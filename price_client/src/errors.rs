use thiserror::Error;

/// 上游发送失败
///
/// 错误会被所有等待同一请求的调用方共享 所以只保存渲染后的信息 必须能 Clone
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	#[error("Request failed: {0}")]
	Request(String),

	#[error("Unexpected status {status}: {body}")]
	Status { status: u16, body: String },

	#[error("Failed to decode response: {0}")]
	Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
	#[error("Transport failure: {0}")]
	Transport(#[from] TransportError),

	#[error("Unsupported period: {0}")]
	UnsupportedPeriod(String),

	#[error("Invalid asset id: {0:?}")]
	InvalidAssetId(String),

	#[error("Unexpected response from {path}: {reason}")]
	UnexpectedResponse { path: String, reason: String },

	#[error("Request task aborted: {0}")]
	TaskAborted(String),
}

impl PriceError {
	/// 调用方是否值得重试 网关内部从不重试
	pub fn is_retryable(&self) -> bool {
		match self {
			PriceError::Transport(_) | PriceError::TaskAborted(_) => true,
			PriceError::UnsupportedPeriod(_) | PriceError::InvalidAssetId(_) | PriceError::UnexpectedResponse { .. } => false,
		}
	}
}
