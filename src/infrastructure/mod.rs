//! 基础设施层
//!
//! 持有一次运行中被多个 worker 共享的资源，只暴露能力：
//! - `VacancyQueue` - 待处理岗位队列，保证每个岗位只被一个 worker 取走
//! - `RateGate` - 投递限流闸门

pub mod rate_gate;
pub mod vacancy_queue;

pub use rate_gate::RateGate;
pub use vacancy_queue::{QueuedVacancy, VacancyQueue};
