//! 岗位模型

use serde::{Deserialize, Serialize};

use super::resume::HhNamed;
use crate::utils::html::strip_html;

/// 候选岗位
///
/// 由平台适配器生成，编排层只读使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyCandidate {
    /// 岗位ID
    pub id: String,
    /// 岗位名称
    pub name: String,
    /// 是否需要先完成测试
    pub requires_test: bool,
    /// 是否必须附带求职信
    pub requires_cover_letter: bool,
    /// 供 LLM 使用的规范化文本
    pub text: String,
}

impl VacancyCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requires_test: false,
            requires_cover_letter: false,
            text: String::new(),
        }
    }

    pub fn with_test_required(mut self, required: bool) -> Self {
        self.requires_test = required;
        self
    }

    pub fn with_cover_letter_required(mut self, required: bool) -> Self {
        self.requires_cover_letter = required;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

// ========== 平台原始结构 ==========

/// 平台分页响应
#[derive(Debug, Clone, Deserialize)]
pub struct HhPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub found: usize,
    #[serde(default)]
    pub pages: usize,
}

/// `GET /vacancies/{id}` 与相似岗位列表中的岗位
#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancy {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub employer: Option<HhNamed>,
    #[serde(default)]
    pub area: Option<HhNamed>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub snippet: Option<HhSnippet>,
    #[serde(default)]
    pub key_skills: Vec<HhNamed>,
    #[serde(default)]
    pub has_test: bool,
    #[serde(default)]
    pub test: Option<HhTest>,
    #[serde(default)]
    pub response_letter_required: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSnippet {
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub responsibility: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhTest {
    #[serde(default)]
    pub required: bool,
}

impl From<HhVacancy> for VacancyCandidate {
    fn from(raw: HhVacancy) -> Self {
        // 列表接口只有 has_test，详情接口还带 test.required
        let requires_test = raw.has_test || raw.test.as_ref().is_some_and(|t| t.required);

        let mut lines = vec![format!("Название: {}", raw.name)];
        if let Some(employer) = &raw.employer {
            lines.push(format!("Компания: {}", employer.name));
        }
        if let Some(area) = &raw.area {
            lines.push(format!("Локация: {}", area.name));
        }
        match raw.description.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(description) => lines.push(format!("Описание: {}", strip_html(description))),
            None => {
                if let Some(snippet) = &raw.snippet {
                    if let Some(requirement) = &snippet.requirement {
                        lines.push(format!("Требования: {}", strip_html(requirement)));
                    }
                    if let Some(responsibility) = &snippet.responsibility {
                        lines.push(format!("Обязанности: {}", strip_html(responsibility)));
                    }
                }
            }
        }
        if !raw.key_skills.is_empty() {
            let skills: Vec<&str> = raw.key_skills.iter().map(|s| s.name.as_str()).collect();
            lines.push(format!("Требуемые навыки: {}", skills.join(", ")));
        }

        Self {
            id: raw.id,
            name: raw.name,
            requires_test,
            requires_cover_letter: raw.response_letter_required,
            text: lines.join("\n"),
        }
    }
}
