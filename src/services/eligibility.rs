//! 投递资格判断 - 业务能力层

use crate::models::VacancyCandidate;

/// 判断结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// 可以继续投递
    Proceed,
    /// 岗位需要测试，自动流程无法完成，跳过
    SkipTestRequired,
}

/// 投递资格过滤器
///
/// 纯函数：无副作用，不会失败。
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter;

impl EligibilityFilter {
    pub fn decide(&self, candidate: &VacancyCandidate) -> Eligibility {
        if candidate.requires_test {
            Eligibility::SkipTestRequired
        } else {
            Eligibility::Proceed
        }
    }
}
