//! 流程层
//!
//! 定义"一个岗位"从资格判断到提交投递的完整流程，不关心批量调度。

pub mod vacancy_ctx;
pub mod vacancy_flow;

pub use vacancy_ctx::VacancyCtx;
pub use vacancy_flow::VacancyFlow;
