//! 测试替身：内存中的招聘平台与求职信生成器

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hh_auto_apply::error::{LlmError, PortalError};
use hh_auto_apply::{
    AccessToken, ApplicationOrchestrator, CancelHandle, CoverLetterGenerator, JobPortalGateway,
    OrchestratorOptions, RateGate, ResumeSummary, VacancyCandidate,
};

/// 投递时的行为
#[derive(Debug, Clone, Copy)]
pub enum SubmitBehavior {
    Ok,
    Duplicate,
    TestRequired,
    Fail,
    Hang,
    Delay(Duration),
}

/// 一次投递调用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCall {
    pub resume_id: String,
    pub vacancy_id: String,
    pub cover_letter: String,
}

#[derive(Default)]
pub struct FakePortal {
    resume_fails: bool,
    candidates_fail: bool,
    candidates: Vec<VacancyCandidate>,
    vacancies: HashMap<String, VacancyCandidate>,
    submit_behavior: HashMap<String, SubmitBehavior>,
    cancel_on_submit: Option<Arc<CancelHandle>>,
    submits: Mutex<Vec<SubmitCall>>,
    candidate_calls: AtomicUsize,
    vacancy_fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakePortal {
    pub fn with_candidates(candidates: Vec<VacancyCandidate>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn failing_resume() -> Self {
        Self {
            resume_fails: true,
            ..Self::default()
        }
    }

    pub fn failing_candidates(mut self) -> Self {
        self.candidates_fail = true;
        self
    }

    pub fn with_vacancy(mut self, vacancy: VacancyCandidate) -> Self {
        self.vacancies.insert(vacancy.id.clone(), vacancy);
        self
    }

    pub fn on_submit(mut self, vacancy_id: &str, behavior: SubmitBehavior) -> Self {
        self.submit_behavior.insert(vacancy_id.to_string(), behavior);
        self
    }

    pub fn cancel_on_submit(mut self, handle: Arc<CancelHandle>) -> Self {
        self.cancel_on_submit = Some(handle);
        self
    }

    pub fn submits(&self) -> Vec<SubmitCall> {
        self.submits.lock().unwrap().clone()
    }

    pub fn submitted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.submits().into_iter().map(|c| c.vacancy_id).collect();
        ids.sort();
        ids
    }

    pub fn was_submitted(&self, vacancy_id: &str) -> bool {
        self.submits().iter().any(|c| c.vacancy_id == vacancy_id)
    }

    pub fn candidate_calls(&self) -> usize {
        self.candidate_calls.load(Ordering::SeqCst)
    }

    pub fn vacancy_fetches(&self) -> usize {
        self.vacancy_fetches.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobPortalGateway for FakePortal {
    async fn fetch_resume(
        &self,
        _token: &AccessToken,
        resume_id: &str,
    ) -> Result<ResumeSummary, PortalError> {
        if self.resume_fails {
            return Err(PortalError::NotFound {
                endpoint: format!("/resumes/{}", resume_id),
            });
        }
        Ok(ResumeSummary::new(resume_id, "Rust разработчик", "Навыки: Rust"))
    }

    async fn fetch_candidate_vacancies(
        &self,
        _token: &AccessToken,
        resume_id: &str,
        limit: usize,
    ) -> Result<Vec<VacancyCandidate>, PortalError> {
        self.candidate_calls.fetch_add(1, Ordering::SeqCst);
        if self.candidates_fail {
            return Err(PortalError::BadResponse {
                endpoint: format!("/resumes/{}/similar_vacancies", resume_id),
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    async fn fetch_vacancy(
        &self,
        _token: &AccessToken,
        vacancy_id: &str,
    ) -> Result<VacancyCandidate, PortalError> {
        self.vacancy_fetches.fetch_add(1, Ordering::SeqCst);
        self.vacancies
            .get(vacancy_id)
            .cloned()
            .ok_or_else(|| PortalError::NotFound {
                endpoint: format!("/vacancies/{}", vacancy_id),
            })
    }

    async fn submit_application(
        &self,
        _token: &AccessToken,
        resume_id: &str,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> Result<(), PortalError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        self.submits.lock().unwrap().push(SubmitCall {
            resume_id: resume_id.to_string(),
            vacancy_id: vacancy_id.to_string(),
            cover_letter: cover_letter.to_string(),
        });
        if let Some(handle) = &self.cancel_on_submit {
            handle.cancel();
        }

        let behavior = self
            .submit_behavior
            .get(vacancy_id)
            .copied()
            .unwrap_or(SubmitBehavior::Ok);

        let result = match behavior {
            SubmitBehavior::Ok => Ok(()),
            SubmitBehavior::Duplicate => Err(PortalError::AlreadyApplied {
                vacancy_id: vacancy_id.to_string(),
            }),
            SubmitBehavior::TestRequired => Err(PortalError::TestRequired {
                vacancy_id: vacancy_id.to_string(),
            }),
            SubmitBehavior::Fail => Err(PortalError::BadResponse {
                endpoint: "/negotiations".to_string(),
                status: 400,
                body: "bad request".to_string(),
            }),
            SubmitBehavior::Hang => std::future::pending().await,
            SubmitBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
pub struct FakeLetters {
    fail_for: HashSet<String>,
    hang: bool,
    calls: Mutex<Vec<String>>,
    texts: Mutex<Vec<String>>,
}

impl FakeLetters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(vacancy_id: &str) -> Self {
        let mut letters = Self::default();
        letters.fail_for.insert(vacancy_id.to_string());
        letters
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }

    /// 生成时收到的岗位文本
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

/// 生成的求职信内容
pub fn letter_for(vacancy_id: &str) -> String {
    format!("Сопроводительное письмо для {}", vacancy_id)
}

#[async_trait]
impl CoverLetterGenerator for FakeLetters {
    async fn generate(
        &self,
        _resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(vacancy.id.clone());
        self.texts.lock().unwrap().push(vacancy.text.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail_for.contains(&vacancy.id) {
            return Err(LlmError::EmptyContent {
                model: "fake".to_string(),
            });
        }
        Ok(letter_for(&vacancy.id))
    }
}

pub fn token() -> AccessToken {
    AccessToken::new("test-token")
}

pub fn options(max_workers: usize) -> OrchestratorOptions {
    OrchestratorOptions {
        max_workers,
        call_timeout: Duration::from_secs(5),
    }
}

/// 不会触发限流的闸门
pub fn open_gate() -> Arc<RateGate> {
    Arc::new(RateGate::new(1_000, Duration::from_secs(1)))
}

pub fn orchestrator(
    portal: &Arc<FakePortal>,
    letters: &Arc<FakeLetters>,
    max_workers: usize,
) -> ApplicationOrchestrator {
    ApplicationOrchestrator::new(
        portal.clone(),
        letters.clone(),
        open_gate(),
        options(max_workers),
    )
}

pub fn vacancy(id: &str, requires_test: bool, requires_cover_letter: bool) -> VacancyCandidate {
    VacancyCandidate::new(id, format!("Вакансия {}", id))
        .with_test_required(requires_test)
        .with_cover_letter_required(requires_cover_letter)
        .with_text(format!("Название: Вакансия {}", id))
}
