use crate::config::DisplayConfig;
use crate::har::{Entry, PostData, Request};
use crate::preview::{PreviewOutput, render_preview};
use crate::session::DetailTab;
use crate::view::classify::size_label;
use crate::view::printer::status_line;
use colored::*;
use url::Url;

/// 非文本响应的 Response 标签内容
pub const NO_RESPONSE_DATA: &str = "This request has no response data available.";

/// 详情面板的文本渲染
pub struct DetailFormatter {
    color: bool,
    json_expand_depth: usize,
    data_uri_preview_chars: usize,
}

impl DetailFormatter {
    pub fn new(color: bool) -> Self {
        let defaults = DisplayConfig::default();
        Self {
            color,
            json_expand_depth: defaults.json_expand_depth,
            data_uri_preview_chars: defaults.data_uri_preview_chars,
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            color: display.color,
            json_expand_depth: display.json_expand_depth,
            data_uri_preview_chars: display.data_uri_preview_chars,
        }
    }

    pub fn format(&self, entry: &Entry, tab: DetailTab) -> String {
        match tab {
            DetailTab::Headers => self.format_headers(entry),
            DetailTab::Preview => self.format_preview(entry),
            DetailTab::Response => self.format_response(entry),
        }
    }

    /// 三个标签依次输出，用于非交互的 `show --tab all`
    pub fn format_all(&self, entry: &Entry) -> String {
        [DetailTab::Headers, DetailTab::Preview, DetailTab::Response]
            .into_iter()
            .map(|tab| format!("{}\n{}", self.banner(tab), self.format(entry, tab)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_headers(&self, entry: &Entry) -> String {
        let mut output = Vec::new();

        output.push(self.title("General"));
        output.push(self.pair("Request URL", &entry.request.url));
        output.push(self.pair("Request Method", &entry.request.method));
        let status = status_line(
            entry.response.status,
            entry.response.status_text.as_deref(),
        );
        output.push(format!("   Status Code: {}", self.paint_status(entry.response.status, status)));
        if let Some(addr) = &entry.server_ip_address {
            output.push(self.pair("Remote Address", addr));
        }

        output.push(String::new());
        output.push(self.title("Response Headers"));
        for (name, value) in sorted_pairs(
            entry
                .response
                .headers
                .iter()
                .map(|h| (h.name.clone(), h.value.clone())),
        ) {
            output.push(self.pair(&name, &value));
        }

        output.push(String::new());
        output.push(self.title("Request Headers"));
        for (name, value) in sorted_pairs(
            entry
                .request
                .headers
                .iter()
                .map(|h| (h.name.clone(), h.value.clone())),
        ) {
            output.push(self.pair(&name, &value));
        }

        if let Some(post) = &entry.request.post_data {
            output.push(String::new());
            output.push(self.title("Request Payload"));
            for (name, value) in payload_items(post) {
                output.push(self.pair(&name, &value));
            }
        }

        let query = query_params(&entry.request);
        if !query.is_empty() {
            output.push(String::new());
            output.push(self.title("Query String Parameters"));
            for (name, value) in query {
                output.push(self.pair(&name, &value));
            }
        }

        output.join("\n")
    }

    fn format_preview(&self, entry: &Entry) -> String {
        match render_preview(&entry.response.content) {
            PreviewOutput::Text { body, notice } => match notice {
                Some(notice) => format!("{}\n\n{}", self.warning(&notice), body),
                None => body,
            },
            PreviewOutput::Image(image) => {
                let mut output = vec![self.pair("Image", &image.mime)];
                if let Some(len) = image.decoded_len {
                    output.push(self.pair("Size", &size_label(len as u64)));
                }
                output.push(self.pair(
                    "Source",
                    &image.uri_preview(self.data_uri_preview_chars),
                ));
                output.join("\n")
            }
            PreviewOutput::Json(tree) => tree.render(self.json_expand_depth),
            PreviewOutput::JsonError(message) => self.warning(&message),
            PreviewOutput::Empty => String::new(),
        }
    }

    fn format_response(&self, entry: &Entry) -> String {
        let content = &entry.response.content;
        if content.mime_type.starts_with("text") {
            content.text.clone().unwrap_or_default()
        } else if self.color {
            NO_RESPONSE_DATA.dimmed().to_string()
        } else {
            NO_RESPONSE_DATA.to_string()
        }
    }

    fn banner(&self, tab: DetailTab) -> String {
        let line = format!("== {} ==", tab);
        if self.color {
            line.magenta().bold().to_string()
        } else {
            line
        }
    }

    fn title(&self, title: &str) -> String {
        if self.color {
            title.blue().bold().to_string()
        } else {
            title.to_string()
        }
    }

    fn pair(&self, name: &str, value: &str) -> String {
        if self.color {
            format!("   {}: {}", name.cyan(), value)
        } else {
            format!("   {}: {}", name, value)
        }
    }

    fn warning(&self, message: &str) -> String {
        if self.color {
            message.yellow().to_string()
        } else {
            message.to_string()
        }
    }

    fn paint_status(&self, status: i64, line: String) -> String {
        if !self.color {
            return line;
        }
        match status {
            200..=399 => line.green().to_string(),
            400..=499 => line.yellow().to_string(),
            0 | 100..=199 => line.dimmed().to_string(),
            _ => line.red().to_string(),
        }
    }
}

/// 按名称排序（不区分大小写，稳定）
pub fn sorted_pairs<I>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut pairs: Vec<_> = pairs.into_iter().collect();
    pairs.sort_by_key(|(name, _)| name.to_lowercase());
    pairs
}

/// 请求体的显示项：有 params 时列出参数，否则以 mimeType 为键显示原文
pub fn payload_items(post: &PostData) -> Vec<(String, String)> {
    match &post.params {
        Some(params) => sorted_pairs(params.iter().map(|p| {
            let value = match (&p.value, &p.file_name) {
                (Some(v), _) => v.clone(),
                (None, Some(file)) => format!("({})", file),
                (None, None) => String::new(),
            };
            (p.name.clone(), value)
        })),
        None => vec![(
            post.mime_type.clone().unwrap_or_default(),
            post.text.clone().unwrap_or_default(),
        )],
    }
}

/// 查询参数；HAR 里没有 queryString 时从 URL 解析
pub fn query_params(request: &Request) -> Vec<(String, String)> {
    if !request.query_string.is_empty() {
        return sorted_pairs(
            request
                .query_string
                .iter()
                .map(|q| (q.name.clone(), q.value.clone())),
        );
    }
    match Url::parse(&request.url) {
        Ok(url) => sorted_pairs(url.query_pairs().into_owned()),
        Err(_) => Vec::new(),
    }
}
