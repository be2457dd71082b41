use {
	crate::{
		consts::DEFAULT_CACHE_TTL,
		descriptor::{CacheKey, RequestDescriptor},
		errors::PriceError,
		transport::{SessionContext, Transport},
	},
	dashmap::{DashMap, mapref::entry::Entry},
	futures::future::{BoxFuture, FutureExt, Shared},
	serde_json::Value,
	std::{
		sync::{Arc, Weak},
		time::Duration,
	},
	tokio::{
		sync::broadcast,
		time::{Instant, MissedTickBehavior},
	},
	tracing::{debug, info, warn},
};

type SharedFetch = Shared<BoxFuture<'static, Result<Value, PriceError>>>;

enum CacheEntry {
	/// 请求还在路上 后来的调用方 clone 这个 future 一起等
	Pending(SharedFetch),
	Completed { value: Value, stored_at: Instant },
}

enum Lookup {
	Ready(Value),
	InFlight(SharedFetch),
}

impl CacheEntry {
	/// 过期的完成结果返回 None 当作不存在
	fn lookup(&self, now: Instant, ttl: Duration) -> Option<Lookup> {
		match self {
			CacheEntry::Pending(fetch) => Some(Lookup::InFlight(fetch.clone())),
			CacheEntry::Completed { value, stored_at } if now.saturating_duration_since(*stored_at) < ttl => Some(Lookup::Ready(value.clone())),
			CacheEntry::Completed { .. } => None,
		}
	}

	fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
		match self {
			CacheEntry::Pending(_) => false,
			CacheEntry::Completed { stored_at, .. } => now.saturating_duration_since(*stored_at) >= ttl,
		}
	}
}

struct GatewayInner {
	transport: Arc<dyn Transport>,
	session: SessionContext,
	ttl: Duration,
	state: DashMap<CacheKey, CacheEntry>,
}

/// 带缓存的请求网关
///
/// - 相同 key 的完成结果在 ttl 内直接返回 不访问上游
/// - 相同 key 的并发请求只打一次上游 共享同一个结果（失败也一起失败）
/// - 失败不缓存 下一次调用会重新请求
/// - 过期是惰性的 访问时才判断 需要回收内存可以跑 `run_sweeper`
///
/// 一个账户/会话上下文一个网关 clone 出来的句柄共享同一份状态
#[derive(Clone)]
pub struct Gateway {
	inner: Arc<GatewayInner>,
}

impl Gateway {
	pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
		Self::with_ttl(transport, session, DEFAULT_CACHE_TTL)
	}

	pub fn with_ttl(transport: Arc<dyn Transport>, session: SessionContext, ttl: Duration) -> Self {
		Self { inner: Arc::new(GatewayInner { transport, session, ttl, state: DashMap::new() }) }
	}

	pub fn ttl(&self) -> Duration {
		self.inner.ttl
	}

	pub fn session(&self) -> &SessionContext {
		&self.inner.session
	}

	/// 当前缓存条目数（包括在途和已过期未回收的）
	pub fn len(&self) -> usize {
		self.inner.state.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.state.is_empty()
	}

	pub async fn fetch(&self, descriptor: RequestDescriptor) -> Result<Value, PriceError> {
		let key = descriptor.cache_key();

		// entry 持有分片写锁 检查和占位是原子的 两个首次调用方不可能都发请求
		// 锁在 await 之前释放
		let fetch = match self.inner.state.entry(key.clone()) {
			Entry::Occupied(mut occupied) => match occupied.get().lookup(Instant::now(), self.inner.ttl) {
				Some(Lookup::Ready(value)) => {
					debug!("Gateway cache hit: {}", key);
					return Ok(value);
				}
				Some(Lookup::InFlight(fetch)) => {
					debug!("Gateway joined in-flight request: {}", key);
					fetch
				}
				None => {
					debug!("Gateway cache entry expired: {}", key);
					let fetch = self.spawn_fetch(key.clone(), descriptor);
					occupied.insert(CacheEntry::Pending(fetch.clone()));
					fetch
				}
			},
			Entry::Vacant(vacant) => {
				debug!("Gateway cache miss: {}", key);
				let fetch = self.spawn_fetch(key.clone(), descriptor);
				vacant.insert(CacheEntry::Pending(fetch.clone()));
				fetch
			}
		};

		fetch.await
	}

	/// 在独立任务里发请求 调用方被 drop 请求也会跑完并落到缓存
	fn spawn_fetch(&self, key: CacheKey, descriptor: RequestDescriptor) -> SharedFetch {
		let inner = Arc::clone(&self.inner);
		let task_key = key.clone();
		let handle = tokio::spawn(async move {
			let request = inner.session.outbound(descriptor);
			match inner.transport.send(&request).await {
				Ok(value) => {
					inner.state.insert(task_key, CacheEntry::Completed { value: value.clone(), stored_at: Instant::now() });
					Ok(value)
				}
				Err(e) => {
					warn!("Gateway request failed, key={}, url={}: {}", task_key, request.url(), e);
					inner.state.remove(&task_key);
					Err(PriceError::Transport(e))
				}
			}
		});

		// 这里只拿 Weak 避免 map 里的 future 反过来持有网关
		let state: Weak<GatewayInner> = Arc::downgrade(&self.inner);
		async move {
			match handle.await {
				Ok(result) => result,
				Err(e) => {
					warn!("Gateway request task aborted, key={}: {}", key, e);
					if let Some(inner) = state.upgrade() {
						inner.state.remove(&key);
					}
					Err(PriceError::TaskAborted(e.to_string()))
				}
			}
		}
		.boxed()
		.shared()
	}

	/// 删除所有过期的完成结果 返回删除数量 在途请求不动
	pub fn sweep_expired(&self) -> usize {
		let now = Instant::now();
		let ttl = self.inner.ttl;

		let expired_keys: Vec<CacheKey> = self.inner.state.iter().filter(|entry| entry.value().is_expired(now, ttl)).map(|entry| entry.key().clone()).collect();

		// 收集和删除之间条目可能被刷新 删除时再判断一次
		expired_keys.iter().filter(|key| self.inner.state.remove_if(*key, |_, entry| entry.is_expired(now, ttl)).is_some()).count()
	}
}

/// 定期回收过期条目 收到 shutdown 信号退出
pub async fn run_sweeper(gateway: Gateway, interval: Duration, mut shutdown_rx: broadcast::Receiver<()>) {
	let mut ticker = tokio::time::interval(interval);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
	ticker.tick().await;

	loop {
		tokio::select! {
			_ = ticker.tick() => {
				let removed = gateway.sweep_expired();
				info!("Gateway sweep removed {} expired entries, {} remaining", removed, gateway.len());
			}
			_ = shutdown_rx.recv() => {
				info!("Gateway sweeper received shutdown signal");
				break;
			}
		}
	}
}
