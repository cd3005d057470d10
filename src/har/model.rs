use serde::{Deserialize, Deserializer, Serialize};

/// 解析后的 HAR 文档
///
/// 只有 `log.entries` 是必需的，其余字段缺失时都按“不显示”处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    pub log: Log,
}

impl Archive {
    /// 按原始顺序返回所有条目
    pub fn entries(&self) -> &[Entry] {
        &self.log.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.log.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.log.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.entries.is_empty()
    }

    /// 一行摘要：HAR 版本、生成工具、页面数和条目数
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(version) = self.log.version.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("HAR {}", version));
        }
        if let Some(creator) = self.log.creator.as_ref().filter(|c| !c.name.is_empty()) {
            if creator.version.is_empty() {
                parts.push(format!("created by {}", creator.name));
            } else {
                parts.push(format!("created by {} {}", creator.name, creator.version));
            }
        }
        let pages = self.log.pages.as_ref().map_or(0, Vec::len);
        parts.push(format!("{} page{}", pages, if pages == 1 { "" } else { "s" }));
        let entries = self.len();
        parts.push(format!(
            "{} {}",
            entries,
            if entries == 1 { "entry" } else { "entries" }
        ));
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub pages: Option<Vec<Page>>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub started_date_time: Option<String>,
}

/// 一次请求/响应记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub started_date_time: Option<String>,
    /// 总耗时（毫秒），可能是小数、负数或缺失
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: Request,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: Response,
    #[serde(default, rename = "serverIPAddress")]
    pub server_ip_address: Option<String>,
}

impl Entry {
    /// 非负且有限的耗时，否则视为 0
    pub fn elapsed_ms(&self) -> f64 {
        match self.time {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub http_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Vec<Header>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string: Vec<QueryParam>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cookies: Vec<Cookie>,
    #[serde(default)]
    pub post_data: Option<PostData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub http_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Vec<Header>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cookies: Vec<Cookie>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Content,
    #[serde(default, rename = "redirectURL")]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// 请求体，原始文本或者表单参数列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub params: Option<Vec<PostParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostParam {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// 响应内容块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 字节数，HAR 用 -1 表示未知；有些工具会写成小数
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl Content {
    /// 非负的字节数，未知时为 0
    pub fn size_bytes(&self) -> u64 {
        match self.size {
            Some(s) if s.is_finite() && s > 0.0 => s as u64,
            _ => 0,
        }
    }
}

/// 导出工具常把缺失的字段写成 `null`，按缺省值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
