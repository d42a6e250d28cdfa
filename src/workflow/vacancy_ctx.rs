//! 岗位处理上下文
//!
//! 封装"我正在为哪份简历处理第几个岗位"这一信息

use std::fmt::Display;

/// 岗位处理上下文
#[derive(Debug, Clone)]
pub struct VacancyCtx {
    /// 简历ID
    pub resume_id: String,

    /// 岗位ID
    pub vacancy_id: String,

    /// 入队位置（从0开始）
    pub position: usize,

    /// 本批入队总数（仅用于日志显示）
    pub total: usize,
}

impl VacancyCtx {
    /// 创建新的岗位上下文
    pub fn new(resume_id: String, vacancy_id: String, position: usize, total: usize) -> Self {
        Self {
            resume_id,
            vacancy_id,
            position,
            total,
        }
    }
}

impl Display for VacancyCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[岗位 {}/{} #{}]",
            self.position + 1,
            self.total,
            self.vacancy_id
        )
    }
}
