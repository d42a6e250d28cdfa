use std::time::Duration;

use async_openai::error::OpenAIError;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 招聘平台 API 错误
    #[error("招聘平台错误: {0}")]
    Portal(#[from] PortalError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 批量编排错误（整批失败）
    #[error("编排错误: {0}")]
    Orchestrator(#[from] OrchestratorError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 招聘平台（hh.ru）API 错误
#[derive(Debug, Error)]
pub enum PortalError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 调用超时
    #[error("API请求超时 ({endpoint}), 限时 {elapsed:?}")]
    Timeout { endpoint: String, elapsed: Duration },
    /// 响应体解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 访问令牌无效或过期
    #[error("访问令牌无效或已过期 ({endpoint})")]
    Unauthorized { endpoint: String },
    /// 资源不存在
    #[error("资源不存在 ({endpoint})")]
    NotFound { endpoint: String },
    /// 平台报告已投递过该岗位
    #[error("已投递过该岗位: {vacancy_id}")]
    AlreadyApplied { vacancy_id: String },
    /// 平台报告该岗位需要先完成测试
    #[error("岗位需要完成测试: {vacancy_id}")]
    TestRequired { vacancy_id: String },
    /// 请求频率限制
    #[error("API请求频率限制 ({endpoint})")]
    RateLimited { endpoint: String },
    /// 其他错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
}

impl PortalError {
    /// 是否为平台报告的重复投递
    pub fn is_duplicate(&self) -> bool {
        matches!(self, PortalError::AlreadyApplied { .. })
    }
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 调用超时
    #[error("LLM调用超时, 限时 {elapsed:?}")]
    Timeout { elapsed: Duration },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填项为空
    #[error("配置项 {field} 不能为空")]
    MissingValue { field: &'static str },
    /// 数值不合法
    #[error("配置项 {field} 的值 {value} 不合法: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 整批失败的错误，返回时不附带任何部分结果
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// 获取简历失败
    #[error("获取简历 {resume_id} 失败: {source}")]
    ResumeFetch {
        resume_id: String,
        #[source]
        source: PortalError,
    },
    /// 获取候选岗位失败
    #[error("获取候选岗位失败 (简历 {resume_id}): {source}")]
    CandidateFetch {
        resume_id: String,
        #[source]
        source: PortalError,
    },
    /// 没有候选岗位（仅用于求职信预览）
    #[error("没有找到候选岗位 (简历 {resume_id})")]
    NoCandidates { resume_id: String },
    /// 按ID获取岗位失败（仅用于求职信预览）
    #[error("获取岗位 {vacancy_id} 失败: {source}")]
    VacancyFetch {
        vacancy_id: String,
        #[source]
        source: PortalError,
    },
    /// 求职信生成失败（仅用于求职信预览）
    #[error("求职信生成失败 (岗位 {vacancy_id}): {source}")]
    LetterGeneration {
        vacancy_id: String,
        #[source]
        source: LlmError,
    },
    /// 单岗位模式没有产生结果
    #[error("岗位 {vacancy_id} 没有产生处理结果")]
    MissingOutcome { vacancy_id: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
