//! 外部调用超时

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

/// 给一次外部调用加上独立的超时
///
/// 超时与调用本身返回的错误同等对待，不做重试。
pub async fn with_deadline<T, E, F>(
    limit: Duration,
    call: F,
    on_timeout: impl FnOnce(Duration) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(limit)),
    }
}
