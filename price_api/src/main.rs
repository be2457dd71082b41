use {price_api::config, tracing::info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	price_api::init::init_all()?;

	let state = price_api::init::init_app_state()?;

	let config = config::get_config();
	let addr = config.server.get_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	info!("Price API Server is running at {}", listener.local_addr()?);

	let app = price_api::server::app(state);

	axum::serve(listener, app).with_graceful_shutdown(price_api::graceful::shutdown_signal()).await?;

	info!("Price API service stopped");
	Ok(())
}
