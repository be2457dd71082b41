use {
	crate::{
		consts::{CHART_PATH_PREFIX, MARKET_CHUNK_SIZE, MARKET_PATH, PARAM_CRYPTO_IDS, PARAM_DAYS, PARAM_FIAT},
		descriptor::RequestDescriptor,
		errors::PriceError,
		gateway::Gateway,
		period::Period,
	},
	futures::future::try_join_all,
	serde_json::Value,
	tracing::{debug, warn},
};

/// 上游返回的单个资产行情 内容不解析
pub type PricePoint = Value;
/// 上游返回的走势数据 原样透传
pub type ChartSeries = Value;

/// 一个分片请求 ids_count 用来和返回条数对比
pub struct MarketChunk {
	pub descriptor: RequestDescriptor,
	pub ids_count: usize,
}

/// 把 id 列表按 MARKET_CHUNK_SIZE 切片 每片一个请求 顺序和输入一致
pub fn market_chunks<S: AsRef<str>>(ids: &[S], currency: &str) -> Vec<MarketChunk> {
	ids.chunks(MARKET_CHUNK_SIZE)
		.map(|chunk| {
			let joined = chunk.iter().map(|id| id.as_ref()).collect::<Vec<&str>>().join(",");
			MarketChunk { descriptor: RequestDescriptor::get(MARKET_PATH).param(PARAM_CRYPTO_IDS, joined).param(PARAM_FIAT, currency), ids_count: chunk.len() }
		})
		.collect()
}

/// id 直接拼进路径 不能带路径分隔符或 query/fragment 字符
pub fn chart_descriptor(id: &str, period: Period, currency: &str) -> Result<RequestDescriptor, PriceError> {
	if !is_path_safe_id(id) {
		return Err(PriceError::InvalidAssetId(id.to_string()));
	}
	Ok(RequestDescriptor::get(format!("{}/{}", CHART_PATH_PREFIX, id)).param(PARAM_FIAT, currency).param(PARAM_DAYS, period.days()))
}

fn is_path_safe_id(id: &str) -> bool {
	!id.is_empty() && id != "." && id != ".." && !id.chars().any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
}

#[derive(Clone)]
pub struct PriceClient {
	gateway: Gateway,
}

impl PriceClient {
	pub fn new(gateway: Gateway) -> Self {
		Self { gateway }
	}

	pub fn gateway(&self) -> &Gateway {
		&self.gateway
	}

	/// 批量查询当前行情
	///
	/// 超过 50 个 id 会拆成多个请求并发发出 结果按分片顺序拼接
	/// 任何一个分片失败整个调用失败 不返回部分结果
	pub async fn market<S: AsRef<str>>(&self, ids: &[S], currency: &str) -> Result<Vec<PricePoint>, PriceError> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}

		let chunks = market_chunks(ids, currency);
		debug!("Market query: {} ids, {} chunks, currency={}", ids.len(), chunks.len(), currency);

		let responses = try_join_all(chunks.iter().map(|chunk| self.gateway.fetch(chunk.descriptor.clone()))).await?;

		let mut prices = Vec::with_capacity(ids.len());
		for (chunk, response) in chunks.iter().zip(responses) {
			let items = match response {
				Value::Array(items) => items,
				other => return Err(PriceError::UnexpectedResponse { path: chunk.descriptor.path.clone(), reason: format!("expected array, got {}", json_kind(&other)) }),
			};
			// 上游可能丢掉不认识的 id 条数对不上就原样透传
			if items.len() != chunk.ids_count {
				warn!("Market chunk returned {} items for {} ids, currency={}", items.len(), chunk.ids_count, currency);
			}
			prices.extend(items);
		}
		Ok(prices)
	}

	/// 查询单个资产的历史走势 period 不支持时不会发请求
	pub async fn chart(&self, id: &str, period: &str, currency: &str) -> Result<ChartSeries, PriceError> {
		let period: Period = period.parse()?;
		self.chart_for(id, period, currency).await
	}

	pub async fn chart_for(&self, id: &str, period: Period, currency: &str) -> Result<ChartSeries, PriceError> {
		debug!("Chart query: id={}, period={}, currency={}", id, period, currency);
		let descriptor = chart_descriptor(id, period, currency)?;
		self.gateway.fetch(descriptor).await
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
