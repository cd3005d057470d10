use crate::har::Content;
use crate::preview::format::Dialect;

/// 预览模式，四种互斥
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewMode<'a> {
    /// `text/*`，带方言的先重排版再显示
    Text {
        dialect: Option<Dialect>,
        text: &'a str,
    },
    /// `image/*`，内联图片
    Image {
        mime: &'a str,
        encoding: Option<&'a str>,
        data: &'a str,
    },
    /// `application/json`，结构化树
    Json { text: &'a str },
    /// 其它类型不预览
    Empty,
}

/// 根据 MIME 类型选择预览模式，不区分大小写
pub fn detect(content: &Content) -> PreviewMode<'_> {
    let mime = content.mime_type.trim().to_ascii_lowercase();
    let text = content.text.as_deref().unwrap_or("");

    if is_family(&mime, "text/") {
        let dialect = if mime.starts_with("text/html") {
            Some(Dialect::Html)
        } else if mime.starts_with("text/javascript") {
            Some(Dialect::Js)
        } else if mime.starts_with("text/css") {
            Some(Dialect::Css)
        } else {
            None
        };
        PreviewMode::Text { dialect, text }
    } else if is_family(&mime, "image/") {
        PreviewMode::Image {
            mime: content.mime_type.trim(),
            encoding: content.encoding.as_deref().filter(|e| !e.is_empty()),
            data: text,
        }
    } else if mime == "application/json" {
        PreviewMode::Json { text }
    } else {
        PreviewMode::Empty
    }
}

fn is_family(mime: &str, prefix: &str) -> bool {
    mime.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty())
}
