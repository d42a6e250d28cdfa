//! 招聘平台能力 - 业务能力层
//!
//! 编排层只依赖这个 trait，具体的 HTTP 适配器在 `clients::hh_client`。

use async_trait::async_trait;

use crate::error::PortalError;
use crate::models::{AccessToken, ResumeSummary, VacancyCandidate};

/// 招聘平台网关
///
/// 访问令牌作为参数显式传入每一次调用。
#[async_trait]
pub trait JobPortalGateway: Send + Sync {
    /// 获取简历
    async fn fetch_resume(
        &self,
        token: &AccessToken,
        resume_id: &str,
    ) -> Result<ResumeSummary, PortalError>;

    /// 获取与简历匹配的候选岗位，按平台相关度排序
    async fn fetch_candidate_vacancies(
        &self,
        token: &AccessToken,
        resume_id: &str,
        limit: usize,
    ) -> Result<Vec<VacancyCandidate>, PortalError>;

    /// 按ID获取岗位
    async fn fetch_vacancy(
        &self,
        token: &AccessToken,
        vacancy_id: &str,
    ) -> Result<VacancyCandidate, PortalError>;

    /// 提交投递；不需要求职信时 `cover_letter` 为空字符串
    async fn submit_application(
        &self,
        token: &AccessToken,
        resume_id: &str,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> Result<(), PortalError>;
}
