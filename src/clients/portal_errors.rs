//! 平台错误响应分类
//!
//! hh.ru 的错误体形如
//! `{"errors":[{"type":"negotiations","value":"already_applied"}],"request_id":"..."}`，
//! 这里把它翻译成 [`PortalError`]。

use phf::phf_map;
use serde::Deserialize;

use crate::error::PortalError;

/// 平台拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyApplied,
    TestRequired,
    Unauthorized,
    NotFound,
    LimitExceeded,
}

static REJECTIONS: phf::Map<&'static str, Rejection> = phf_map! {
    "already_applied" => Rejection::AlreadyApplied,
    "test_required" => Rejection::TestRequired,
    "token_expired" => Rejection::Unauthorized,
    "token_revoked" => Rejection::Unauthorized,
    "bad_authorization" => Rejection::Unauthorized,
    "not_found" => Rejection::NotFound,
    "vacancy_not_found" => Rejection::NotFound,
    "resume_not_found" => Rejection::NotFound,
    "limit_exceeded" => Rejection::LimitExceeded,
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    value: Option<String>,
}

/// 在错误体中查找第一个已知的拒绝原因
pub fn find_rejection(body: &str) -> Option<Rejection> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .iter()
        .filter_map(|item| item.value.as_deref())
        .find_map(|value| REJECTIONS.get(value).copied())
}

/// 把非成功响应转换为平台错误
///
/// # 参数
/// - `endpoint`: 请求路径
/// - `vacancy_id`: 投递请求时的岗位ID
/// - `status`: HTTP 状态码
/// - `body`: 响应体原文
pub fn classify_failure(
    endpoint: &str,
    vacancy_id: Option<&str>,
    status: u16,
    body: &str,
) -> PortalError {
    let endpoint = endpoint.to_string();
    match (find_rejection(body), vacancy_id) {
        (Some(Rejection::AlreadyApplied), Some(id)) => {
            return PortalError::AlreadyApplied {
                vacancy_id: id.to_string(),
            }
        }
        (Some(Rejection::TestRequired), Some(id)) => {
            return PortalError::TestRequired {
                vacancy_id: id.to_string(),
            }
        }
        (Some(Rejection::Unauthorized), _) => return PortalError::Unauthorized { endpoint },
        (Some(Rejection::NotFound), _) => return PortalError::NotFound { endpoint },
        (Some(Rejection::LimitExceeded), _) => return PortalError::RateLimited { endpoint },
        _ => {}
    }

    match status {
        401 => PortalError::Unauthorized { endpoint },
        404 => PortalError::NotFound { endpoint },
        429 => PortalError::RateLimited { endpoint },
        _ => PortalError::BadResponse {
            endpoint,
            status,
            body: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_applied_on_submit() {
        let body = r#"{"errors":[{"type":"negotiations","value":"already_applied"}]}"#;
        let err = classify_failure("/negotiations", Some("V1"), 403, body);
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_test_required_on_submit() {
        let body = r#"{"errors":[{"type":"negotiations","value":"test_required"}]}"#;
        let err = classify_failure("/negotiations", Some("V2"), 403, body);
        assert!(matches!(err, PortalError::TestRequired { vacancy_id } if vacancy_id == "V2"));
    }

    #[test]
    fn test_expired_token() {
        let body = r#"{"errors":[{"type":"oauth","value":"token_expired"}]}"#;
        let err = classify_failure("/resumes/R1", None, 403, body);
        assert!(matches!(err, PortalError::Unauthorized { .. }));
    }

    #[test]
    fn test_status_fallback() {
        assert!(matches!(
            classify_failure("/vacancies/9", None, 404, "not json"),
            PortalError::NotFound { .. }
        ));
        assert!(matches!(
            classify_failure("/negotiations", Some("V1"), 429, ""),
            PortalError::RateLimited { .. }
        ));
        assert!(matches!(
            classify_failure("/negotiations", Some("V1"), 400, "{}"),
            PortalError::BadResponse { status: 400, .. }
        ));
    }

    #[test]
    fn test_unknown_values_ignored() {
        let body = r#"{"errors":[{"type":"negotiations","value":"archived"}]}"#;
        assert_eq!(find_rejection(body), None);
    }
}
