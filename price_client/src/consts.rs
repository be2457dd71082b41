use std::time::Duration;

/// 完成结果在网关里的缓存时间
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// market 单次请求最多携带的 id 数量
pub const MARKET_CHUNK_SIZE: usize = 50;

pub const MARKET_PATH: &str = "api/v1/prices";
pub const CHART_PATH_PREFIX: &str = "api/v1/chart";

pub const PARAM_CRYPTO_IDS: &str = "cryptoIds";
pub const PARAM_FIAT: &str = "fiat";
pub const PARAM_DAYS: &str = "days";

