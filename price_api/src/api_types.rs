use serde::{Deserialize, Serialize};

/// 统一返回格式 {code, msg, data}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
	#[serde(rename = "code")]
	pub code: i32,
	#[serde(rename = "msg")]
	pub msg: String,
	#[serde(rename = "data")]
	pub data: Option<T>,
}

impl<T> ApiResponse<T> {
	/// 创建成功响应
	pub fn success(data: T) -> Self {
		Self { code: 0, msg: "success".to_string(), data: Some(data) }
	}

	/// 创建失败响应
	pub fn error(error_code: crate::api_error::ApiErrorCode) -> Self {
		Self { code: error_code.as_i32(), msg: error_code.message().to_string(), data: None }
	}
}

/// market 查询 ids 逗号分隔 可以为空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRequest {
	pub ids: Option<String>,
	pub currency: Option<String>,
}

impl MarketRequest {
	/// 拆出 id 列表 去掉空白和空项 顺序不变
	pub fn id_list(&self) -> Vec<String> {
		self.ids.as_deref().unwrap_or_default().split(',').map(|id| id.trim()).filter(|id| !id.is_empty()).map(|id| id.to_string()).collect()
	}
}

/// chart 查询
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
	pub id: Option<String>,
	pub period: Option<String>,
	pub currency: Option<String>,
}

/// 必填字符串参数 缺失或全空白返回 None
pub fn required(param: &Option<String>) -> Option<&str> {
	param.as_deref().map(|value| value.trim()).filter(|value| !value.is_empty())
}
