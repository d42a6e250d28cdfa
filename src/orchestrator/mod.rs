//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量投递编排器
//! - 获取简历与候选岗位，填充 `VacancyQueue`
//! - 控制并发数量（Semaphore）
//! - 处理取消信号
//! - 按入队顺序汇总结果
//!
//! ### `batch_result` - 批次结果与统计
//!
//! ### `cancel` - 取消信号
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理一批岗位)
//!     ↓
//! workflow::VacancyFlow (处理单个岗位)
//!     ↓
//! services (能力层：portal / cover_letter / eligibility)
//!     ↓
//! infrastructure (基础设施：VacancyQueue / RateGate)
//! ```

pub mod batch_processor;
pub mod batch_result;
pub mod cancel;

pub use batch_processor::{ApplicationOrchestrator, CoverLetterPreview, OrchestratorOptions};
pub use batch_result::BatchResult;
pub use cancel::{CancelHandle, CancelSignal};
