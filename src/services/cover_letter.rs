//! 求职信生成 - 业务能力层
//!
//! 只负责"根据简历和岗位写一封求职信"，不关心流程

use async_trait::async_trait;
use tracing::debug;

use crate::clients::LlmClient;
use crate::error::LlmError;
use crate::models::{ResumeSummary, VacancyCandidate};

/// 求职信生成能力
#[async_trait]
pub trait CoverLetterGenerator: Send + Sync {
    async fn generate(
        &self,
        resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
    ) -> Result<String, LlmError>;
}

const SYSTEM_PROMPT: &str = "Ты опытный карьерный консультант. \
Пиши короткие (до 1200 символов) сопроводительные письма на русском языке от первого лица кандидата. \
Опирайся только на факты из резюме, не выдумывай опыт. \
Свяжи навыки кандидата с требованиями вакансии. \
Не используй заголовки, подписи-заглушки и markdown.";

/// 基于 LLM 的求职信生成器
///
/// 不做重试；失败原样返回给流程层处理。
pub struct LlmCoverLetterGenerator {
    client: LlmClient,
    max_tokens: u32,
}

impl LlmCoverLetterGenerator {
    pub fn new(client: LlmClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }
}

#[async_trait]
impl CoverLetterGenerator for LlmCoverLetterGenerator {
    async fn generate(
        &self,
        resume: &ResumeSummary,
        vacancy: &VacancyCandidate,
    ) -> Result<String, LlmError> {
        debug!(
            "生成求职信: 简历 {} → 岗位 {} (模型: {})",
            resume.id,
            vacancy.id,
            self.client.model_name()
        );
        let prompt = build_prompt(resume, vacancy);
        self.client
            .chat(&prompt, Some(SYSTEM_PROMPT), self.max_tokens)
            .await
    }
}

/// 构建求职信的用户消息
pub fn build_prompt(resume: &ResumeSummary, vacancy: &VacancyCandidate) -> String {
    let vacancy_text = if vacancy.text.trim().is_empty() {
        format!("Название: {}", vacancy.name)
    } else {
        vacancy.text.clone()
    };
    let resume_text = if resume.text.trim().is_empty() {
        format!("Желаемая должность: {}", resume.title)
    } else {
        resume.text.clone()
    };

    format!(
        "Составь сопроводительное письмо для вакансии.\n\nВАКАНСИЯ:\n{}\n\nРЕЗЮМЕ КАНДИДАТА:\n{}",
        vacancy_text, resume_text
    )
}
