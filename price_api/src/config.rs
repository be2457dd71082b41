use {
	common::logging::LoggingConfig,
	config::{Config, File},
	serde::{Deserialize, Serialize},
	std::time::Duration,
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceApiConfig {
	pub logging: LoggingConfig,
	pub server: ServerConfig,
	pub cache: CacheConfig,
	pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	pub port: u16,
}

impl ServerConfig {
	pub fn get_addr(&self) -> String {
		format!("0.0.0.0:{}", self.port)
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
	pub ttl_secs: u64,
	// 不配或者配 0 就不跑定期回收 只靠访问时惰性过期
	pub sweep_interval_secs: Option<u64>,
}

impl CacheConfig {
	pub fn ttl(&self) -> Duration {
		Duration::from_secs(self.ttl_secs)
	}

	pub fn sweep_interval(&self) -> Option<Duration> {
		self.sweep_interval_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
	pub timeout_secs: u64,
	pub connect_timeout_secs: u64,
}

pub static CONFIG: OnceCell<PriceApiConfig> = OnceCell::const_new();

pub fn load_config(config_path: &str) -> anyhow::Result<()> {
	let run_mode = &common::common_env::get_common_env().run_mode;

	let config = Config::builder().add_source(File::with_name(&format!("{}/{}", config_path, run_mode)).required(true)).build()?;

	let price_api_config: PriceApiConfig = config.try_deserialize()?;
	check_config(&price_api_config)?;
	println!("Configuration loaded for mode: {}", run_mode);
	println!("Configuration: {:?}", price_api_config);
	CONFIG.set(price_api_config)?;
	Ok(())
}

pub fn check_config(config: &PriceApiConfig) -> anyhow::Result<()> {
	config.logging.check()?;
	if config.cache.ttl_secs == 0 {
		return Err(anyhow::anyhow!("Cache ttl_secs must be greater than 0"));
	}
	if config.http.timeout_secs == 0 || config.http.connect_timeout_secs == 0 {
		return Err(anyhow::anyhow!("HTTP timeouts must be greater than 0"));
	}
	Ok(())
}

pub fn get_config() -> &'static PriceApiConfig {
	CONFIG.get().expect("Config not loaded")
}
