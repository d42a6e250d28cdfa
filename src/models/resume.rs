//! 简历模型
//!
//! `HhResume` 对应平台原始 JSON，`ResumeSummary` 是编排层使用的统一投影。

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 简历摘要
///
/// 一次批量运行中只获取一次，之后只读。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeSummary {
    /// 简历ID
    pub id: String,
    /// 简历标题（显示用）
    pub title: String,
    /// 供 LLM 使用的规范化文本（工作经历、技能、联系方式）
    pub text: String,
    /// 联系方式
    pub contacts: Vec<ContactKind>,
}

impl ResumeSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            contacts: Vec::new(),
        }
    }
}

/// 联系方式
///
/// 平台返回的 `value` 字段对电话是对象、对邮箱是字符串，
/// 在边界处解析一次，下游不再重新解释。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContactKind {
    Phone {
        formatted: String,
        preferred: bool,
    },
    Email {
        address: String,
        preferred: bool,
    },
    Other {
        type_id: String,
        value: String,
    },
}

impl ContactKind {
    fn from_wire(contact: &HhContact) -> Option<Self> {
        let preferred = contact.preferred;
        match (contact.kind.id.as_str(), &contact.value) {
            ("email", JsonValue::String(address)) => Some(ContactKind::Email {
                address: address.clone(),
                preferred,
            }),
            (_, JsonValue::Object(_)) => {
                let phone: HhPhoneValue = serde_json::from_value(contact.value.clone()).ok()?;
                Some(ContactKind::Phone {
                    formatted: phone.display(),
                    preferred,
                })
            }
            (type_id, JsonValue::String(value)) => Some(ContactKind::Other {
                type_id: type_id.to_string(),
                value: value.clone(),
            }),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            ContactKind::Phone { formatted, .. } => format!("телефон: {}", formatted),
            ContactKind::Email { address, .. } => format!("email: {}", address),
            ContactKind::Other { type_id, value } => format!("{}: {}", type_id, value),
        }
    }
}

/// 简历列表中的简要信息（`GET /resumes/mine`）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResumeBrief {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

// ========== 平台原始结构 ==========

/// `GET /resumes/{id}` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct HhResume {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub area: Option<HhNamed>,
    #[serde(default)]
    pub total_experience: Option<HhTotalExperience>,
    #[serde(default)]
    pub skill_set: Vec<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Vec<HhWorkExperience>,
    #[serde(default)]
    pub contact: Vec<HhContact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhNamed {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhTotalExperience {
    #[serde(default)]
    pub months: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhWorkExperience {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhContact {
    #[serde(rename = "type")]
    pub kind: HhNamed,
    #[serde(default)]
    pub value: JsonValue,
    #[serde(default)]
    pub preferred: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct HhPhoneValue {
    #[serde(default)]
    formatted: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    number: Option<String>,
}

impl HhPhoneValue {
    fn display(&self) -> String {
        if let Some(formatted) = self.formatted.as_deref().filter(|f| !f.is_empty()) {
            return formatted.to_string();
        }
        format!(
            "+{} ({}) {}",
            self.country.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.number.as_deref().unwrap_or_default()
        )
    }
}

/// 最多带入 LLM 文本的工作经历条数
const MAX_EXPERIENCE_ENTRIES: usize = 3;

impl From<HhResume> for ResumeSummary {
    fn from(raw: HhResume) -> Self {
        let contacts: Vec<ContactKind> = raw.contact.iter().filter_map(ContactKind::from_wire).collect();

        let mut lines = Vec::new();
        let full_name = [raw.first_name.as_deref(), raw.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !full_name.is_empty() {
            lines.push(format!("Имя: {}", full_name));
        }
        lines.push(format!("Желаемая должность: {}", raw.title));
        if let Some(area) = &raw.area {
            lines.push(format!("Локация: {}", area.name));
        }
        if let Some(total) = &raw.total_experience {
            lines.push(format!("Опыт работы: {} лет", total.months / 12));
        }
        if !raw.skill_set.is_empty() {
            lines.push(format!("Навыки: {}", raw.skill_set.join(", ")));
        }
        if let Some(about) = raw.skills.as_deref().filter(|s| !s.trim().is_empty()) {
            lines.push(format!("О себе: {}", crate::utils::html::strip_html(about)));
        }
        for job in raw.experience.iter().take(MAX_EXPERIENCE_ENTRIES) {
            lines.push(format!(
                "- {} в {} ({} — {}): {}",
                job.position.as_deref().unwrap_or("?"),
                job.company.as_deref().unwrap_or("?"),
                job.start.as_deref().unwrap_or("?"),
                job.end.as_deref().unwrap_or("по настоящее время"),
                job.description
                    .as_deref()
                    .map(crate::utils::html::strip_html)
                    .unwrap_or_default()
            ));
        }
        if !contacts.is_empty() {
            let described: Vec<String> = contacts.iter().map(ContactKind::describe).collect();
            lines.push(format!("Контакты: {}", described.join("; ")));
        }

        Self {
            id: raw.id,
            title: raw.title,
            text: lines.join("\n"),
            contacts,
        }
    }
}
