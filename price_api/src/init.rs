use {
	crate::{
		config::{PriceApiConfig, get_config, load_config},
		server::AppState,
	},
	common::common_env::{self, CommonEnv},
	price_client::{Gateway, HttpTransport, PriceClient, SessionContext, gateway::run_sweeper},
	std::{sync::Arc, time::Duration},
	tokio::sync::{OnceCell, broadcast},
	tracing::info,
};

/// 全局 shutdown 信号广播器
static G_SHUTDOWN: OnceCell<broadcast::Sender<()>> = OnceCell::const_new();

pub fn init_shutdown_signal() -> anyhow::Result<()> {
	let (shutdown_tx, _) = broadcast::channel(1);
	G_SHUTDOWN.set(shutdown_tx).map_err(|_| anyhow::anyhow!("Shutdown signal already initialized"))
}

pub fn get_shutdown_receiver() -> anyhow::Result<broadcast::Receiver<()>> {
	G_SHUTDOWN.get().map(|sender| sender.subscribe()).ok_or_else(|| anyhow::anyhow!("Shutdown signal not initialized"))
}

pub fn send_shutdown_signal() {
	if let Some(sender) = G_SHUTDOWN.get() {
		let _ = sender.send(());
	}
}

pub fn init_all() -> anyhow::Result<()> {
	init_load()?;
	get_config().logging.init()?;
	init_shutdown_signal()?;
	Ok(())
}

fn init_load() -> anyhow::Result<()> {
	common_env::load_common_env()?;
	load_config(common::consts::PRICE_API_CONFIG_PATH)?;
	Ok(())
}

/// 账户会话 base url 和 token 都来自 env
pub fn build_session(env: &CommonEnv) -> SessionContext {
	let session = SessionContext::new(env.price_service_base_url.as_str());
	match env.price_service_token.as_deref() {
		Some(token) => session.with_bearer_token(token),
		None => session,
	}
}

/// 一个会话一个网关 网关通过 PriceClient 显式传给 handler
pub fn build_price_client(env: &CommonEnv, config: &PriceApiConfig) -> anyhow::Result<PriceClient> {
	let transport = HttpTransport::new(Duration::from_secs(config.http.timeout_secs), Duration::from_secs(config.http.connect_timeout_secs))?;
	let gateway = Gateway::with_ttl(Arc::new(transport), build_session(env), config.cache.ttl());
	Ok(PriceClient::new(gateway))
}

pub fn init_app_state() -> anyhow::Result<AppState> {
	let config = get_config();
	let price_client = build_price_client(common_env::get_common_env(), config)?;

	if let Some(interval) = config.cache.sweep_interval() {
		tokio::spawn(run_sweeper(price_client.gateway().clone(), interval, get_shutdown_receiver()?));
		info!("Gateway sweeper started, interval={:?}", interval);
	}

	info!("Price client initialized, ttl={:?}", price_client.gateway().ttl());
	Ok(AppState::new(price_client))
}
