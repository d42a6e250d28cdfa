use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 招聘平台配置 ---
    pub hh_api_base_url: String,
    /// OAuth 访问令牌，由外部的认证流程提供
    pub hh_access_token: String,
    pub hh_user_agent: String,
    // --- 投递任务 ---
    /// 要使用的简历ID
    pub resume_id: String,
    /// 本批最多处理的岗位数
    pub apply_limit: usize,
    /// 单岗位模式：设置后只处理这一个岗位
    pub vacancy_id: Option<String>,
    /// 同时处理的岗位数量
    pub max_concurrent_applications: usize,
    /// 每个时间窗口内最多提交的投递数
    pub rate_limit_max_submissions: usize,
    /// 限流时间窗口（秒）
    pub rate_limit_window_secs: u64,
    /// 每次外部调用的超时时间（秒）
    pub call_timeout_secs: u64,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub cover_letter_max_tokens: u32,
    // --- 日志 ---
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hh_api_base_url: "https://api.hh.ru".to_string(),
            hh_access_token: String::new(),
            hh_user_agent: "hh-auto-apply/0.1 (auto-apply@localhost)".to_string(),
            resume_id: String::new(),
            apply_limit: 10,
            vacancy_id: None,
            max_concurrent_applications: 3,
            rate_limit_max_submissions: 10,
            rate_limit_window_secs: 60,
            call_timeout_secs: 30,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.deepseek.com/v1".to_string(),
            llm_model_name: "deepseek-chat".to_string(),
            cover_letter_max_tokens: 2048,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn merge_env(self) -> Self {
        Self {
            hh_api_base_url: std::env::var("HH_API_BASE_URL").unwrap_or(self.hh_api_base_url),
            hh_access_token: std::env::var("HH_ACCESS_TOKEN").unwrap_or(self.hh_access_token),
            hh_user_agent: std::env::var("HH_USER_AGENT").unwrap_or(self.hh_user_agent),
            resume_id: std::env::var("RESUME_ID").unwrap_or(self.resume_id),
            apply_limit: env_or("APPLY_LIMIT", self.apply_limit),
            vacancy_id: std::env::var("VACANCY_ID")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(self.vacancy_id),
            max_concurrent_applications: env_or(
                "MAX_CONCURRENT_APPLICATIONS",
                self.max_concurrent_applications,
            ),
            rate_limit_max_submissions: env_or(
                "RATE_LIMIT_MAX_SUBMISSIONS",
                self.rate_limit_max_submissions,
            ),
            rate_limit_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", self.rate_limit_window_secs),
            call_timeout_secs: env_or("CALL_TIMEOUT_SECS", self.call_timeout_secs),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            cover_letter_max_tokens: env_or("COVER_LETTER_MAX_TOKENS", self.cover_letter_max_tokens),
            verbose_logging: env_or("VERBOSE_LOGGING", self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }

    /// 检查运行前必须满足的配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hh_access_token.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                field: "hh_access_token",
            });
        }
        if self.resume_id.trim().is_empty() {
            return Err(ConfigError::MissingValue { field: "resume_id" });
        }
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                field: "llm_api_key",
            });
        }
        positive("max_concurrent_applications", self.max_concurrent_applications as u64)?;
        positive("rate_limit_max_submissions", self.rate_limit_max_submissions as u64)?;
        positive("rate_limit_window_secs", self.rate_limit_window_secs)?;
        positive("call_timeout_secs", self.call_timeout_secs)?;
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "必须大于 0",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            hh_access_token: "token".to_string(),
            resume_id: "R1".to_string(),
            llm_api_key: "key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_needs_credentials() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingValue {
                field: "hh_access_token"
            }
        ));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = Config {
            max_concurrent_applications: 0,
            ..valid_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_concurrent_applications",
                ..
            }
        ));
    }

    #[test]
    fn test_toml_partial_override() {
        let config = Config::from_toml_str(
            r#"
            resume_id = "abc123"
            apply_limit = 25
            max_concurrent_applications = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.resume_id, "abc123");
        assert_eq!(config.apply_limit, 25);
        assert_eq!(config.max_concurrent_applications, 5);
        // 未出现的字段保持默认值
        assert_eq!(config.hh_api_base_url, "https://api.hh.ru");
        assert_eq!(config.call_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
