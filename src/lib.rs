//! # hh Auto Apply
//!
//! 在 hh.ru 上批量自动投递简历的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有一次运行中共享的资源，只暴露能力
//! - `VacancyQueue` - 待处理岗位队列，每个岗位只交给一个 worker
//! - `RateGate` - 投递限流闸门
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 平台与 LLM 的 HTTP 适配器
//! - `PortalClient` - hh.ru REST API
//! - `LlmClient` - OpenAI 兼容的聊天接口
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个岗位
//! - `JobPortalGateway` - 简历、岗位、投递能力
//! - `CoverLetterGenerator` - 求职信生成能力
//! - `EligibilityFilter` - 投递资格判断
//! - `OutcomeWriter` - 写结果日志
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一个岗位"的完整处理流程
//! - `VacancyCtx` - 上下文封装（resume_id + vacancy_id + 位置）
//! - `VacancyFlow` - 资格判断 → 求职信 → 限流 → 提交
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - 批量调度、并发控制、取消与结果汇总

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{LlmClient, PortalClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{RateGate, VacancyQueue};
pub use models::{AccessToken, ApplicationOutcome, OutcomeKind, ResumeSummary, VacancyCandidate};
pub use orchestrator::{
    ApplicationOrchestrator, BatchResult, CancelHandle, CancelSignal, OrchestratorOptions,
};
pub use services::{CoverLetterGenerator, EligibilityFilter, JobPortalGateway};
pub use workflow::{VacancyCtx, VacancyFlow};
