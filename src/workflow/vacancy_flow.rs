//! 岗位投递流程 - 流程层
//!
//! 核心职责：定义"一个岗位"的完整处理流程
//!
//! 流程顺序：
//! 1. 资格判断（需要测试的岗位直接跳过）
//! 2. 需要时生成求职信
//! 3. 等待限流闸门
//! 4. 提交投递
//!
//! 每一步的失败都在这里变成结果，不会向上抛出。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{LlmError, PortalError};
use crate::infrastructure::RateGate;
use crate::models::{AccessToken, ApplicationOutcome, OutcomeKind, ResumeSummary, VacancyCandidate};
use crate::services::{CoverLetterGenerator, Eligibility, EligibilityFilter, JobPortalGateway};
use crate::utils::deadline::with_deadline;
use crate::utils::truncate_text;
use crate::workflow::vacancy_ctx::VacancyCtx;

/// 岗位投递流程
///
/// - 不持有队列，也不关心并发
/// - 只依赖业务能力（services）和限流闸门
#[derive(Clone)]
pub struct VacancyFlow {
    portal: Arc<dyn JobPortalGateway>,
    letters: Arc<dyn CoverLetterGenerator>,
    rate_gate: Arc<RateGate>,
    eligibility: EligibilityFilter,
    call_timeout: Duration,
}

impl VacancyFlow {
    /// 创建新的岗位投递流程
    pub fn new(
        portal: Arc<dyn JobPortalGateway>,
        letters: Arc<dyn CoverLetterGenerator>,
        rate_gate: Arc<RateGate>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            portal,
            letters,
            rate_gate,
            eligibility: EligibilityFilter,
            call_timeout,
        }
    }

    /// 处理一个出队的岗位
    ///
    /// # 参数
    /// - `prefetched`: 候选列表中已获取的岗位；为 `None` 时按ID重新获取
    ///
    /// # 返回
    /// 总是返回一个结果
    pub async fn run_queued(
        &self,
        token: &AccessToken,
        resume: &ResumeSummary,
        prefetched: Option<VacancyCandidate>,
        ctx: &VacancyCtx,
    ) -> ApplicationOutcome {
        let vacancy = match prefetched {
            Some(vacancy) => vacancy,
            None => match self.fetch_vacancy(token, &ctx.vacancy_id).await {
                Ok(vacancy) => vacancy,
                Err(e) => {
                    error!("{} ❌ 获取岗位失败: {}", ctx, e);
                    return ApplicationOutcome::new(
                        ctx.vacancy_id.clone(),
                        OutcomeKind::FailedVacancyFetch {
                            error: e.to_string(),
                        },
                    );
                }
            },
        };

        self.run(token, resume, &vacancy, ctx).await
    }

    /// 对已获取的岗位执行完整流程
    pub async fn run(
        &self,
        token: &AccessToken,
        resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
        ctx: &VacancyCtx,
    ) -> ApplicationOutcome {
        info!("{} 📋 {}", ctx, vacancy.name);

        // ========== 1. 资格判断 ==========
        if self.eligibility.decide(vacancy) == Eligibility::SkipTestRequired {
            info!("{} ⏭️ 岗位需要完成测试，跳过", ctx);
            return ApplicationOutcome::new(vacancy.id.clone(), OutcomeKind::SkippedTestRequired);
        }

        // ========== 2. 求职信 ==========
        let cover_letter = if vacancy.requires_cover_letter {
            info!("{} ✍️ 岗位要求求职信，正在生成...", ctx);
            match self.generate_letter(resume, vacancy).await {
                Ok(letter) => {
                    debug!("{} 求职信: {}", ctx, truncate_text(&letter, 120));
                    letter
                }
                Err(e) => {
                    error!("{} ❌ 求职信生成失败: {}", ctx, e);
                    return ApplicationOutcome::new(
                        vacancy.id.clone(),
                        OutcomeKind::FailedLetterGeneration {
                            error: e.to_string(),
                        },
                    );
                }
            }
        } else {
            String::new()
        };

        // ========== 3. 限流 + 提交 ==========
        self.rate_gate.acquire().await;

        match self.submit(token, resume, vacancy, &cover_letter).await {
            Ok(()) => {
                info!("{} ✅ 投递成功", ctx);
                ApplicationOutcome::applied(vacancy.id.clone())
            }
            Err(PortalError::AlreadyApplied { .. }) => {
                info!("{} ⏭️ 平台报告已投递过，跳过", ctx);
                ApplicationOutcome::new(vacancy.id.clone(), OutcomeKind::SkippedDuplicate)
            }
            Err(PortalError::TestRequired { .. }) => {
                warn!("{} ⏭️ 平台要求先完成测试，跳过", ctx);
                ApplicationOutcome::new(vacancy.id.clone(), OutcomeKind::SkippedTestRequired)
            }
            Err(e) => {
                error!("{} ❌ 投递失败: {}", ctx, e);
                ApplicationOutcome::new(
                    vacancy.id.clone(),
                    OutcomeKind::FailedSubmission {
                        error: e.to_string(),
                    },
                )
            }
        }
    }

    async fn fetch_vacancy(
        &self,
        token: &AccessToken,
        vacancy_id: &str,
    ) -> Result<VacancyCandidate, PortalError> {
        let endpoint = format!("/vacancies/{}", vacancy_id);
        with_deadline(
            self.call_timeout,
            self.portal.fetch_vacancy(token, vacancy_id),
            |elapsed| PortalError::Timeout { endpoint, elapsed },
        )
        .await
    }

    async fn generate_letter(
        &self,
        resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
    ) -> Result<String, LlmError> {
        with_deadline(
            self.call_timeout,
            self.letters.generate(resume, vacancy),
            |elapsed| LlmError::Timeout { elapsed },
        )
        .await
    }

    async fn submit(
        &self,
        token: &AccessToken,
        resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
        cover_letter: &str,
    ) -> Result<(), PortalError> {
        with_deadline(
            self.call_timeout,
            self.portal
                .submit_application(token, &resume.id, &vacancy.id, cover_letter),
            |elapsed| PortalError::Timeout {
                endpoint: "/negotiations".to_string(),
                elapsed,
            },
        )
        .await
    }
}
