use serde::Serialize;

/// 单个岗位的最终处理结果
///
/// 每个出队的岗位恰好产生一个结果，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationOutcome {
    pub vacancy_id: String,
    pub kind: OutcomeKind,
}

/// 结果类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// 投递成功
    Applied,
    /// 岗位需要测试，跳过
    SkippedTestRequired,
    /// 平台报告已投递过，跳过
    SkippedDuplicate,
    /// 求职信生成失败
    FailedLetterGeneration { error: String },
    /// 投递提交失败
    FailedSubmission { error: String },
    /// 按ID获取岗位失败
    FailedVacancyFetch { error: String },
}

impl ApplicationOutcome {
    pub fn new(vacancy_id: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            vacancy_id: vacancy_id.into(),
            kind,
        }
    }

    pub fn applied(vacancy_id: impl Into<String>) -> Self {
        Self::new(vacancy_id, OutcomeKind::Applied)
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.kind, OutcomeKind::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self.kind,
            OutcomeKind::SkippedTestRequired | OutcomeKind::SkippedDuplicate
        )
    }

    pub fn is_failed(&self) -> bool {
        self.error().is_some()
    }

    /// 失败时的错误描述
    pub fn error(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::FailedLetterGeneration { error }
            | OutcomeKind::FailedSubmission { error }
            | OutcomeKind::FailedVacancyFetch { error } => Some(error),
            _ => None,
        }
    }
}

impl OutcomeKind {
    /// 日志里使用的简短标签
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Applied => "已投递",
            OutcomeKind::SkippedTestRequired => "跳过(需要测试)",
            OutcomeKind::SkippedDuplicate => "跳过(重复投递)",
            OutcomeKind::FailedLetterGeneration { .. } => "失败(求职信生成)",
            OutcomeKind::FailedSubmission { .. } => "失败(投递提交)",
            OutcomeKind::FailedVacancyFetch { .. } => "失败(获取岗位)",
        }
    }
}
