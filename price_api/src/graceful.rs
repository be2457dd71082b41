pub async fn shutdown_signal() {
	common::graceful::on_stop_signal(crate::init::send_shutdown_signal, crate::consts::GRACEFUL_DRAIN).await;
}
