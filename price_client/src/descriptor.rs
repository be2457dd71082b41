use {
	serde::{Deserialize, Serialize},
	std::{collections::BTreeMap, fmt},
};

/// 上游只提供查询接口 method 仍然写进 key 里
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
}

/// 一次上游请求的完整描述 缓存 key 由它派生
///
/// params 用 BTreeMap 保存 序列化时按 key 排序 和插入顺序无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
	pub method: Method,
	pub path: String,
	pub params: BTreeMap<String, String>,
}

impl RequestDescriptor {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), params: BTreeMap::new() }
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.params.insert(name.into(), value.to_string());
		self
	}

	pub fn cache_key(&self) -> CacheKey {
		// 字段全是字符串 序列化不会失败
		match serde_json::to_string(self) {
			Ok(key) => CacheKey(key),
			Err(_) => CacheKey(format!("{:?}", self)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
