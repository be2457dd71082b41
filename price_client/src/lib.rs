//! 价格服务客户端
//!
//! - `gateway`: 带 TTL 缓存和并发合并的请求网关 相同请求同一时刻只会打一次上游
//! - `client`: market 批量查询（按 50 个 id 分片并发）和 chart 历史走势查询
//! - `transport`: 上游发送能力的抽象 以及基于 reqwest 的 HTTP 实现

pub mod client;
pub mod consts;
pub mod descriptor;
pub mod errors;
pub mod gateway;
pub mod period;
pub mod transport;

pub use {
	client::{ChartSeries, PriceClient, PricePoint},
	descriptor::{CacheKey, Method, RequestDescriptor},
	errors::{PriceError, TransportError},
	gateway::Gateway,
	period::Period,
	transport::{HttpTransport, OutboundRequest, SessionContext, Transport},
};
