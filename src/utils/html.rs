//! 岗位描述的 HTML 清理

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("合法的正则"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("合法的正则"));

/// 平台描述里常见的 HTML 实体
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&laquo;", "«"),
    ("&raquo;", "»"),
    ("&mdash;", "—"),
    ("&ndash;", "–"),
    ("&amp;", "&"),
];

/// 去掉标签、还原常见实体并压缩空白
pub fn strip_html(input: &str) -> String {
    let mut text = TAG_RE.replace_all(input, " ").into_owned();
    // &amp; 放在最后，避免二次解码
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    SPACE_RE.replace_all(text.trim(), " ").into_owned()
}
