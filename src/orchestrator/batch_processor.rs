//! 批量投递处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **批次准备**：获取简历、获取候选岗位并入队
//! 2. **并发控制**：使用 Semaphore 限制同时处理的岗位数
//! 3. **取消**：收到取消信号后不再出队，已开始的岗位允许完成
//! 4. **结果汇总**：按入队顺序返回每个岗位的结果
//!
//! 单个岗位怎么处理由 `workflow::VacancyFlow` 决定，这里只做调度。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{LlmError, OrchestratorError, PortalError};
use crate::infrastructure::{QueuedVacancy, RateGate, VacancyQueue};
use crate::models::{AccessToken, ApplicationOutcome, OutcomeKind, ResumeSummary, VacancyCandidate};
use crate::orchestrator::batch_result::{BatchCollector, BatchResult};
use crate::orchestrator::cancel::CancelSignal;
use crate::services::{CoverLetterGenerator, JobPortalGateway};
use crate::utils::deadline::with_deadline;
use crate::utils::logging;
use crate::workflow::{VacancyCtx, VacancyFlow};

/// 编排器选项
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorOptions {
    /// 同时处理的岗位数
    pub max_workers: usize,
    /// 每次外部调用的超时
    pub call_timeout: Duration,
}

impl OrchestratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_workers: config.max_concurrent_applications,
            call_timeout: config.call_timeout(),
        }
    }
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            max_workers: 3,
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// 求职信预览（不投递）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverLetterPreview {
    pub resume_id: String,
    pub vacancy_id: String,
    pub vacancy_name: String,
    pub cover_letter: String,
}

/// 批量投递编排器
pub struct ApplicationOrchestrator {
    portal: Arc<dyn JobPortalGateway>,
    letters: Arc<dyn CoverLetterGenerator>,
    flow: VacancyFlow,
    options: OrchestratorOptions,
}

impl ApplicationOrchestrator {
    /// 创建编排器
    ///
    /// 限流闸门由调用方传入，多次运行可以共享同一个闸门。
    pub fn new(
        portal: Arc<dyn JobPortalGateway>,
        letters: Arc<dyn CoverLetterGenerator>,
        rate_gate: Arc<RateGate>,
        options: OrchestratorOptions,
    ) -> Self {
        let flow = VacancyFlow::new(
            portal.clone(),
            letters.clone(),
            rate_gate,
            options.call_timeout,
        );
        Self {
            portal,
            letters,
            flow,
            options: OrchestratorOptions {
                max_workers: options.max_workers.max(1),
                ..options
            },
        }
    }

    /// 按配置创建编排器（包括限流闸门）
    pub fn from_config(
        portal: Arc<dyn JobPortalGateway>,
        letters: Arc<dyn CoverLetterGenerator>,
        config: &Config,
    ) -> Self {
        let rate_gate = Arc::new(RateGate::new(
            config.rate_limit_max_submissions,
            config.rate_limit_window(),
        ));
        Self::new(
            portal,
            letters,
            rate_gate,
            OrchestratorOptions::from_config(config),
        )
    }

    /// 批量投递
    ///
    /// # 参数
    /// - `resume_id`: 简历ID
    /// - `apply_limit`: 最多处理的候选岗位数
    ///
    /// # 返回
    /// 完整的批次结果；简历或候选岗位获取失败时返回错误
    pub async fn run_batch(
        &self,
        token: &AccessToken,
        resume_id: &str,
        apply_limit: usize,
    ) -> Result<BatchResult, OrchestratorError> {
        self.run_batch_with_cancel(token, resume_id, apply_limit, CancelSignal::never())
            .await
    }

    /// 批量投递（可取消）
    pub async fn run_batch_with_cancel(
        &self,
        token: &AccessToken,
        resume_id: &str,
        apply_limit: usize,
        cancel: CancelSignal,
    ) -> Result<BatchResult, OrchestratorError> {
        let resume = self.fetch_resume(token, resume_id).await?;

        if apply_limit == 0 {
            info!("apply_limit 为 0，不获取候选岗位");
            return Ok(BatchResult::empty());
        }

        let candidates = self
            .fetch_candidates(token, resume_id, apply_limit)
            .await
            .map_err(|source| OrchestratorError::CandidateFetch {
                resume_id: resume_id.to_string(),
                source,
            })?;

        if candidates.is_empty() {
            warn!("⚠️ 简历 {} 没有候选岗位", resume_id);
            return Ok(BatchResult::empty());
        }

        let queue = Arc::new(VacancyQueue::new());
        let mut prefetched = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            if queue.push(candidate.id.clone()).is_some() {
                prefetched.insert(candidate.id.clone(), candidate);
            } else {
                warn!("⚠️ 候选列表中岗位 {} 重复出现，只处理一次", candidate.id);
            }
        }

        let result = self
            .drain_queue(token, Arc::new(resume), queue, prefetched, cancel)
            .await;
        logging::log_batch_complete(&result);
        Ok(result)
    }

    /// 单岗位投递
    ///
    /// 与批量使用同一个流程，队列里只有一个岗位。岗位获取失败记为结果而不是错误。
    pub async fn run_single(
        &self,
        token: &AccessToken,
        resume_id: &str,
        vacancy_id: &str,
    ) -> Result<ApplicationOutcome, OrchestratorError> {
        let resume = self.fetch_resume(token, resume_id).await?;

        let queue = Arc::new(VacancyQueue::new());
        queue.push(vacancy_id);

        self.drain_queue(
            token,
            Arc::new(resume),
            queue,
            HashMap::new(),
            CancelSignal::never(),
        )
        .await
        .into_outcomes()
        .into_iter()
        .next()
        .ok_or_else(|| OrchestratorError::MissingOutcome {
            vacancy_id: vacancy_id.to_string(),
        })
    }

    /// 处理一个由调用方持有的队列
    ///
    /// 队列取空之前调用方追加的岗位都会被处理；`prefetched` 中没有的岗位会按ID获取。
    pub async fn run_queue(
        &self,
        token: &AccessToken,
        resume: ResumeSummary,
        queue: Arc<VacancyQueue>,
        prefetched: HashMap<String, VacancyCandidate>,
        cancel: CancelSignal,
    ) -> BatchResult {
        self.drain_queue(token, Arc::new(resume), queue, prefetched, cancel)
            .await
    }

    /// 为第一个候选岗位生成求职信，不投递
    pub async fn preview_cover_letter(
        &self,
        token: &AccessToken,
        resume_id: &str,
    ) -> Result<CoverLetterPreview, OrchestratorError> {
        let resume = self.fetch_resume(token, resume_id).await?;
        let first = self
            .fetch_candidates(token, resume_id, 1)
            .await
            .map_err(|source| OrchestratorError::CandidateFetch {
                resume_id: resume_id.to_string(),
                source,
            })?
            .into_iter()
            .next()
            .ok_or_else(|| OrchestratorError::NoCandidates {
                resume_id: resume_id.to_string(),
            })?;

        // 相似岗位列表只有摘要，按ID取完整描述和技能
        let endpoint = format!("/vacancies/{}", first.id);
        let vacancy = with_deadline(
            self.options.call_timeout,
            self.portal.fetch_vacancy(token, &first.id),
            |elapsed| PortalError::Timeout { endpoint, elapsed },
        )
        .await
        .map_err(|source| OrchestratorError::VacancyFetch {
            vacancy_id: first.id.clone(),
            source,
        })?;

        let cover_letter = with_deadline(
            self.options.call_timeout,
            self.letters.generate(&resume, &vacancy),
            |elapsed| LlmError::Timeout { elapsed },
        )
        .await
        .map_err(|source| OrchestratorError::LetterGeneration {
            vacancy_id: vacancy.id.clone(),
            source,
        })?;

        Ok(CoverLetterPreview {
            resume_id: resume.id,
            vacancy_id: vacancy.id,
            vacancy_name: vacancy.name,
            cover_letter,
        })
    }

    async fn fetch_resume(
        &self,
        token: &AccessToken,
        resume_id: &str,
    ) -> Result<ResumeSummary, OrchestratorError> {
        let endpoint = format!("/resumes/{}", resume_id);
        with_deadline(
            self.options.call_timeout,
            self.portal.fetch_resume(token, resume_id),
            |elapsed| PortalError::Timeout { endpoint, elapsed },
        )
        .await
        .map_err(|source| {
            error!("❌ 获取简历 {} 失败: {}", resume_id, source);
            OrchestratorError::ResumeFetch {
                resume_id: resume_id.to_string(),
                source,
            }
        })
    }

    async fn fetch_candidates(
        &self,
        token: &AccessToken,
        resume_id: &str,
        limit: usize,
    ) -> Result<Vec<VacancyCandidate>, PortalError> {
        let endpoint = format!("/resumes/{}/similar_vacancies", resume_id);
        let mut candidates = with_deadline(
            self.options.call_timeout,
            self.portal.fetch_candidate_vacancies(token, resume_id, limit),
            |elapsed| PortalError::Timeout { endpoint, elapsed },
        )
        .await?;
        candidates.truncate(limit);
        Ok(candidates)
    }

    /// 并发消费队列，直到队列为空且没有进行中的岗位，或收到取消信号
    ///
    /// 队列暂时为空时不会立即结束：进行中的岗位完成或调用方追加新岗位后会再次出队。
    async fn drain_queue(
        &self,
        token: &AccessToken,
        resume: Arc<ResumeSummary>,
        queue: Arc<VacancyQueue>,
        mut prefetched: HashMap<String, VacancyCandidate>,
        cancel: CancelSignal,
    ) -> BatchResult {
        let workers = self.options.max_workers;
        let total = queue.len();
        logging::log_batch_start(&resume.id, total, workers);

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut in_flight = FuturesUnordered::new();
        let mut collector = BatchCollector::default();
        let mut cancelled = false;

        loop {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                permit = semaphore.clone().acquire_owned() => permit,
            };
            let Ok(permit) = permit else { break };

            // 等待 permit 期间可能已经取消
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let Some(queued) = queue.pop() else {
                drop(permit);
                if in_flight.is_empty() {
                    break;
                }
                // 等一个岗位完成，或者等调用方追加新岗位
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        cancelled = true;
                        break;
                    }
                    Some((position, vacancy_id, joined)) = in_flight.next() => {
                        record_joined(&mut collector, position, vacancy_id, joined);
                    }
                    _ = queue.pushed() => {}
                }
                continue;
            };

            let ctx = VacancyCtx::new(
                resume.id.clone(),
                queued.vacancy_id.clone(),
                queued.position,
                total.max(queued.position + 1),
            );
            let candidate = prefetched.remove(&queued.vacancy_id);
            let flow = self.flow.clone();
            let token = token.clone();
            let resume = resume.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.run_queued(&token, &resume, candidate, &ctx).await
            });
            let QueuedVacancy {
                position,
                vacancy_id,
            } = queued;
            in_flight.push(async move { (position, vacancy_id, handle.await) });
        }

        if cancelled {
            warn!("⛔ 收到取消信号，停止出队，等待进行中的岗位完成");
        }

        // 等待所有已开始的岗位完成
        while let Some((position, vacancy_id, joined)) = in_flight.next().await {
            record_joined(&mut collector, position, vacancy_id, joined);
        }

        let unprocessed = if cancelled {
            queue.drain_remaining()
        } else {
            Vec::new()
        };
        collector.finish(cancelled, unprocessed)
    }
}

/// 任务 panic 时也要记一个结果，保证每个出队的岗位都有结果
fn record_joined(
    collector: &mut BatchCollector,
    position: usize,
    vacancy_id: String,
    joined: Result<ApplicationOutcome, JoinError>,
) {
    let outcome = joined.unwrap_or_else(|e| {
        error!("[岗位 #{}] 任务执行失败: {}", vacancy_id, e);
        ApplicationOutcome::new(
            vacancy_id,
            OutcomeKind::FailedSubmission {
                error: format!("worker task aborted: {}", e),
            },
        )
    });
    collector.record(position, outcome);
}
