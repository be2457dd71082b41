use std::time::Duration;

/// 收到停机信号后留给在途上游请求的时间
pub const GRACEFUL_DRAIN: Duration = Duration::from_secs(2);
