use {std::time::Duration, tokio::signal, tracing::info};

/// 停机原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
	Interrupt,
	Terminate,
}

/// 阻塞到收到 SIGINT 或 SIGTERM
///
/// 注册 SIGTERM 失败时退化为只等 ctrl_c
pub async fn wait_for_stop_signal() -> StopSignal {
	#[cfg(unix)]
	{
		use tokio::signal::unix::{SignalKind, signal};
		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => tokio::select! {
				_ = signal::ctrl_c() => StopSignal::Interrupt,
				_ = sigterm.recv() => StopSignal::Terminate,
			},
			Err(e) => {
				info!("SIGTERM handler unavailable ({}), waiting for SIGINT only", e);
				let _ = signal::ctrl_c().await;
				StopSignal::Interrupt
			}
		}
	}
	#[cfg(not(unix))]
	{
		let _ = signal::ctrl_c().await;
		StopSignal::Interrupt
	}
}

/// 通知后台任务退出 再给在途请求留出 drain 时间
pub async fn drain<F>(notify: F, drain_for: Duration)
where
	F: FnOnce(),
{
	notify();
	if !drain_for.is_zero() {
		info!("Background tasks notified, draining for {:?}", drain_for);
		tokio::time::sleep(drain_for).await;
	}
	info!("Shutdown drain finished");
}

/// 给 `axum::serve(..).with_graceful_shutdown` 用 收到信号后 drain 完才返回
pub async fn on_stop_signal<F>(notify: F, drain_for: Duration)
where
	F: FnOnce(),
{
	let reason = wait_for_stop_signal().await;
	info!("Received {:?}, shutting down", reason);
	drain(notify, drain_for).await;
}
