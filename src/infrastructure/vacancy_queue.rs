//! 待处理岗位队列 - 基础设施层
//!
//! FIFO 队列，一次运行独占。入队时分配位置编号，
//! 编号用于在并发处理后恢复结果的原始顺序。

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::debug;

/// 出队的岗位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedVacancy {
    /// 入队顺序（从 0 开始）
    pub position: usize,
    pub vacancy_id: String,
}

/// 岗位队列
///
/// 职责：
/// - 支持多个 worker 并发出队，每个岗位只会交给一个 worker
/// - 同一个岗位ID在一次运行中只能入队一次
/// - 处理过程中允许继续追加岗位
#[derive(Debug, Default)]
pub struct VacancyQueue {
    state: Mutex<QueueState>,
    pushed: Notify,
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<QueuedVacancy>,
    seen: HashSet<String>,
    next_position: usize,
}

impl VacancyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个岗位
    ///
    /// # 返回
    /// 返回分配的位置编号；岗位已入队过则返回 `None`
    pub fn push(&self, vacancy_id: impl Into<String>) -> Option<usize> {
        let vacancy_id = vacancy_id.into();
        let mut state = self.lock();
        if !state.seen.insert(vacancy_id.clone()) {
            debug!("岗位 {} 已在本次运行中入队，忽略", vacancy_id);
            return None;
        }
        let position = state.next_position;
        state.next_position += 1;
        state.pending.push_back(QueuedVacancy {
            position,
            vacancy_id,
        });
        drop(state);
        self.pushed.notify_one();
        Some(position)
    }

    /// 取出队首岗位
    pub fn pop(&self) -> Option<QueuedVacancy> {
        self.lock().pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    /// 等待下一次成功入队
    ///
    /// 入队时没有等待者也会留下一次通知，唤醒后需要重新 `pop` 确认。
    pub async fn pushed(&self) {
        self.pushed.notified().await;
    }

    /// 取出所有剩余岗位ID（取消运行时使用）
    pub fn drain_remaining(&self) -> Vec<String> {
        self.lock()
            .pending
            .drain(..)
            .map(|queued| queued.vacancy_id)
            .collect()
    }

    // 持锁区间内没有 await
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
