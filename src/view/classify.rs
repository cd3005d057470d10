//! 单条记录的展示分类：名称、类型、大小、耗时以及行的强调样式
//!
//! 这里的函数都是纯函数，只依赖一条记录自身的字段。

use std::fmt;
use std::str::FromStr;

use crate::har::Entry;
use crate::{HarviewError, Result};
use serde::{Deserialize, Serialize};

/// 行的粗粒度内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Xhr,
    Js,
    Css,
    Img,
    Doc,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Xhr,
        Category::Js,
        Category::Css,
        Category::Img,
        Category::Doc,
        Category::Other,
    ];

    /// 按优先级匹配 MIME 类型，区分大小写
    pub fn from_mime(mime: &str) -> Self {
        if mime == "application/json" {
            Category::Xhr
        } else if mime == "text/javascript" {
            Category::Js
        } else if mime == "text/css" {
            Category::Css
        } else if has_subtype(mime, "image/") {
            Category::Img
        } else if has_subtype(mime, "text/") {
            Category::Doc
        } else {
            Category::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Xhr => "XHR",
            Category::Js => "JS",
            Category::Css => "CSS",
            Category::Img => "Img",
            Category::Doc => "Doc",
            Category::Other => "Other",
        }
    }
}

/// `image/` 这种只有前缀没有子类型的不算
fn has_subtype(mime: &str, prefix: &str) -> bool {
    mime.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前生效的过滤条件，`All` 只是过滤值，不是某一行能拥有的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    pub const CHOICES: [Filter; 7] = [
        Filter::All,
        Filter::Only(Category::Xhr),
        Filter::Only(Category::Js),
        Filter::Only(Category::Css),
        Filter::Only(Category::Img),
        Filter::Only(Category::Doc),
        Filter::Only(Category::Other),
    ];

    pub fn matches(&self, category: Category) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(c) => *c == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Only(c) => c.as_str(),
        }
    }
}

impl FromStr for Filter {
    type Err = HarviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .map(|c| Filter::Only(*c))
            .ok_or_else(|| {
                HarviewError::InvalidArgument(format!(
                    "unknown filter '{}', expected one of All, XHR, JS, CSS, Img, Doc, Other",
                    s
                ))
            })
    }
}

impl TryFrom<String> for Filter {
    type Error = HarviewError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL 的最后一段；以 `/` 结尾时取倒数第二段并补上 `/`
pub fn display_name(url: &str) -> String {
    let parts: Vec<&str> = url.split('/').collect();
    let last = parts[parts.len() - 1];
    if !last.is_empty() {
        return last.to_string();
    }
    let parent = parts.len().checked_sub(2).map(|i| parts[i]).unwrap_or("");
    format!("{}/", parent)
}

const SIZE_UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// 以 1000 为进制的可读大小，保留一位小数
pub fn size_label(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    // 999.95 kB 四舍五入后会变成 1000.0 kB
    if (value * 10.0).round() / 10.0 >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{:.1} {}", value, SIZE_UNITS[unit])
}

/// 截断到整数毫秒
pub fn time_label(elapsed_ms: f64) -> String {
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return "0".to_string();
    }
    format!("{}", elapsed_ms.trunc() as u64)
}

/// 4xx 或 5xx
pub fn is_error(status: i64) -> bool {
    (400..=599).contains(&status)
}

/// OPTIONS 预检、状态码 0 或 1xx
pub fn is_muted(method: &str, status: i64) -> bool {
    method == "OPTIONS" || status == 0 || (100..=199).contains(&status)
}

/// 行的强调样式，两个标记相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emphasis {
    pub error: bool,
    pub muted: bool,
}

impl Emphasis {
    pub fn of(method: &str, status: i64) -> Self {
        Self {
            error: is_error(status),
            muted: is_muted(method, status),
        }
    }
}

/// 一条记录的全部展示字段
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub name: String,
    pub category: Category,
    pub size: String,
    pub time: String,
    pub emphasis: Emphasis,
}

pub fn classify(entry: &Entry) -> Classification {
    Classification {
        name: display_name(&entry.request.url),
        category: Category::from_mime(&entry.response.content.mime_type),
        size: size_label(entry.response.content.size_bytes()),
        time: time_label(entry.elapsed_ms()),
        emphasis: Emphasis::of(&entry.request.method, entry.response.status),
    }
}

/// 状态码的标准描述，HAR 中没有 statusText 时使用
pub fn reason_phrase(status: i64) -> &'static str {
    match status {
        0 => "(failed)",
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unknown",
    }
}
