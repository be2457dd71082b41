use price_client::PriceError;

/// API 错误码定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
	/// 成功
	Success = 0,
	/// 参数错误
	InvalidParameter = 2003,
	/// 不支持的 chart 时间范围
	UnsupportedPeriod = 2008,
	/// 上游价格服务失败 可以稍后重试
	UpstreamFailed = 2009,
	/// 内部错误
	InternalError = 2998,
}

/// 内部错误类型 - 用于表示服务器内部错误
#[derive(Debug)]
pub struct InternalError;

impl axum::response::IntoResponse for InternalError {
	fn into_response(self) -> axum::response::Response {
		let body = crate::api_types::ApiResponse::<()>::error(ApiErrorCode::InternalError);
		(axum::http::StatusCode::OK, axum::Json(body)).into_response()
	}
}

// 业务错误和上游错误都返回错误码而不是 http 500

impl ApiErrorCode {
	/// 获取错误消息
	pub fn message(&self) -> &'static str {
		match self {
			ApiErrorCode::Success => "success",
			ApiErrorCode::InvalidParameter => "Invalid parameter",
			ApiErrorCode::UnsupportedPeriod => "Unsupported period",
			ApiErrorCode::UpstreamFailed => "Price service unavailable",
			ApiErrorCode::InternalError => "Internal error",
		}
	}

	/// 转换为 i32
	pub fn as_i32(&self) -> i32 {
		*self as i32
	}

	/// 客户端错误码 None 表示按内部错误处理
	pub fn from_price_error(err: &PriceError) -> Option<Self> {
		match err {
			PriceError::UnsupportedPeriod(_) => Some(ApiErrorCode::UnsupportedPeriod),
			PriceError::InvalidAssetId(_) => Some(ApiErrorCode::InvalidParameter),
			PriceError::Transport(_) | PriceError::UnexpectedResponse { .. } => Some(ApiErrorCode::UpstreamFailed),
			PriceError::TaskAborted(_) => None,
		}
	}
}
