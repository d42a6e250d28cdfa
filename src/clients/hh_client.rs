//! hh.ru API 客户端
//!
//! 封装简历、岗位和投递相关的 HTTP 调用。访问令牌由调用方每次显式传入。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart::Form, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::portal_errors::classify_failure;
use crate::config::Config;
use crate::error::PortalError;
use crate::models::{
    AccessToken, HhPage, HhResume, HhVacancy, ResumeBrief, ResumeSummary, VacancyCandidate,
};
use crate::services::JobPortalGateway;

/// 平台单页最多返回的条数
const MAX_PER_PAGE: usize = 100;

/// hh.ru API 客户端
pub struct PortalClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl PortalClient {
    /// 创建新的平台客户端
    pub fn new(config: &Config) -> Result<Self, PortalError> {
        let http = Client::builder()
            .user_agent(config.hh_user_agent.as_str())
            .timeout(config.call_timeout())
            .build()
            .map_err(|source| PortalError::Request {
                endpoint: config.hh_api_base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.hh_api_base_url.trim_end_matches('/').to_string(),
            timeout: config.call_timeout(),
        })
    }

    /// 列出当前用户的全部简历
    pub async fn list_resumes(&self, token: &AccessToken) -> Result<Vec<ResumeBrief>, PortalError> {
        let page: HhPage<ResumeBrief> = self.get_json("/resumes/mine", token).await?;
        debug!("获取到 {} 份简历", page.items.len());
        Ok(page.items)
    }

    fn request_error(&self, endpoint: &str, source: reqwest::Error) -> PortalError {
        if source.is_timeout() {
            return PortalError::Timeout {
                endpoint: endpoint.to_string(),
                elapsed: self.timeout,
            };
        }
        PortalError::Request {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// GET 请求并解析 JSON
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: &AccessToken,
    ) -> Result<T, PortalError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|source| self.request_error(endpoint, source))?;

        let response = ensure_status(endpoint, None, response, StatusCode::OK).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| PortalError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

#[async_trait]
impl JobPortalGateway for PortalClient {
    async fn fetch_resume(
        &self,
        token: &AccessToken,
        resume_id: &str,
    ) -> Result<ResumeSummary, PortalError> {
        let raw: HhResume = self
            .get_json(&format!("/resumes/{}", resume_id), token)
            .await?;
        Ok(ResumeSummary::from(raw))
    }

    async fn fetch_candidate_vacancies(
        &self,
        token: &AccessToken,
        resume_id: &str,
        limit: usize,
    ) -> Result<Vec<VacancyCandidate>, PortalError> {
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        let mut candidates = Vec::with_capacity(limit);
        let mut page_index = 0;

        while candidates.len() < limit {
            let endpoint = format!(
                "/resumes/{}/similar_vacancies?per_page={}&page={}",
                resume_id, per_page, page_index
            );
            let page: HhPage<HhVacancy> = self.get_json(&endpoint, token).await?;
            let fetched = page.items.len();
            candidates.extend(
                page.items
                    .into_iter()
                    .filter(|v| !v.archived)
                    .map(VacancyCandidate::from),
            );

            page_index += 1;
            if fetched < per_page || page_index >= page.pages {
                break;
            }
        }

        candidates.truncate(limit);
        debug!("简历 {} 获取到 {} 个候选岗位", resume_id, candidates.len());
        Ok(candidates)
    }

    async fn fetch_vacancy(
        &self,
        token: &AccessToken,
        vacancy_id: &str,
    ) -> Result<VacancyCandidate, PortalError> {
        let raw: HhVacancy = self
            .get_json(&format!("/vacancies/{}", vacancy_id), token)
            .await?;
        Ok(VacancyCandidate::from(raw))
    }

    async fn submit_application(
        &self,
        token: &AccessToken,
        resume_id: &str,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> Result<(), PortalError> {
        let endpoint = "/negotiations";
        let url = format!("{}{}", self.base_url, endpoint);

        let mut form = Form::new()
            .text("resume_id", resume_id.to_string())
            .text("vacancy_id", vacancy_id.to_string());
        if !cover_letter.is_empty() {
            form = form.text("message", cover_letter.to_string());
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|source| self.request_error(endpoint, source))?;

        ensure_status(endpoint, Some(vacancy_id), response, StatusCode::CREATED).await?;
        info!("📨 投递已提交: 岗位 {}", vacancy_id);
        Ok(())
    }
}

/// 状态码必须严格等于 `expected`，否则读取响应体并分类
async fn ensure_status(
    endpoint: &str,
    vacancy_id: Option<&str>,
    response: Response,
    expected: StatusCode,
) -> Result<Response, PortalError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!("{} 返回 {}: {}", endpoint, status, body);
    Err(classify_failure(endpoint, vacancy_id, status.as_u16(), &body))
}
