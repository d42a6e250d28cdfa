//! 领域模型
//!
//! 平台返回的原始 JSON 只在这里被解析一次，投影成统一的
//! `ResumeSummary` / `VacancyCandidate`，下游只认识投影后的类型。

pub mod credential;
pub mod outcome;
pub mod resume;
pub mod vacancy;

pub use credential::AccessToken;
pub use outcome::{ApplicationOutcome, OutcomeKind};
pub use resume::{ContactKind, HhResume, ResumeBrief, ResumeSummary};
pub use vacancy::{HhPage, HhVacancy, VacancyCandidate};
