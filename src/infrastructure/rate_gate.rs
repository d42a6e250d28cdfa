//! 投递限流闸门 - 基础设施层
//!
//! 滑动窗口：任意 `window` 时长内最多放行 `max_permits` 次。

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

/// 投递限流闸门
///
/// 只在提交投递前等待，不影响其它 worker 的筛选和求职信生成。
#[derive(Debug)]
pub struct RateGate {
    max_permits: usize,
    window: Duration,
    granted: Mutex<VecDeque<Instant>>,
}

impl RateGate {
    /// 创建闸门，`max_permits` 至少为 1
    pub fn new(max_permits: usize, window: Duration) -> Self {
        Self {
            max_permits: max_permits.max(1),
            window,
            granted: Mutex::new(VecDeque::new()),
        }
    }

    /// 等待直到允许一次投递
    pub async fn acquire(&self) {
        loop {
            let wait = match self.try_acquire_at(Instant::now()) {
                None => return,
                Some(wait) => wait,
            };
            debug!("⏳ 投递限流，等待 {:?}", wait);
            sleep(wait).await;
        }
    }

    /// 尝试在 `now` 时刻放行；不能放行时返回需要等待的时长
    fn try_acquire_at(&self, now: Instant) -> Option<Duration> {
        let mut granted = self.granted.lock().unwrap_or_else(PoisonError::into_inner);
        while let Some(&oldest) = granted.front() {
            if now.duration_since(oldest) >= self.window {
                granted.pop_front();
            } else {
                break;
            }
        }

        if granted.len() < self.max_permits {
            granted.push_back(now);
            return None;
        }

        granted
            .front()
            .map(|&oldest| self.window.saturating_sub(now.duration_since(oldest)))
    }
}
