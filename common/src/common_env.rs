use {
	crate::consts::COMMON_ENV_PATH,
	config::{Config, Environment},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommonEnv {
	pub run_mode: String,

	// 价格服务地址 由部署方发现后写入 env
	pub price_service_base_url: String,
	// 价格服务会话 token 没有就不带 Authorization
	pub price_service_token: Option<String>,
}

pub static COMMON_ENV: OnceCell<CommonEnv> = OnceCell::const_new();

pub fn load_common_env() -> anyhow::Result<()> {
	// 使用 dotenvy 从文件加载环境变量到进程环境变量中
	dotenvy::from_path(COMMON_ENV_PATH)?;

	// 使用 config crate 从环境变量反序列化到 CommonEnv
	let config = Config::builder().add_source(Environment::default()).build()?;

	let common_env: CommonEnv = config.try_deserialize()?;
	check_common_env(&common_env)?;
	println!("Common env loaded, run_mode: {}, price_service_base_url: {}", common_env.run_mode, common_env.price_service_base_url);
	COMMON_ENV.set(common_env)?;
	Ok(())
}

pub fn check_common_env(common_env: &CommonEnv) -> anyhow::Result<()> {
	crate::consts::validate_run_mode(&common_env.run_mode)?;

	if common_env.price_service_base_url.is_empty() {
		return Err(anyhow::anyhow!("Price service base url is empty"));
	}
	if let Some(token) = common_env.price_service_token.as_ref()
		&& token.is_empty()
	{
		return Err(anyhow::anyhow!("Price service token is set but empty"));
	}

	Ok(())
}

pub fn get_common_env() -> &'static CommonEnv {
	COMMON_ENV.get().expect("Common env not loaded")
}
