pub mod format;
pub mod image;
pub mod json_tree;
pub mod mode;

use crate::har::Content;
use tracing::warn;

pub use format::{Dialect, FormatError};
pub use image::InlineImage;
pub use json_tree::JsonTree;
pub use mode::{PreviewMode, detect};

/// 预览面板的渲染结果
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutput {
    /// 文本；重排版失败时 `notice` 给出原因，`body` 是原文
    Text {
        body: String,
        notice: Option<String>,
    },
    Image(InlineImage),
    Json(JsonTree),
    /// 声明为 JSON 但无法解析
    JsonError(String),
    Empty,
}

/// 选择预览模式并完成必要的重排版，不会失败
pub fn render_preview(content: &Content) -> PreviewOutput {
    match detect(content) {
        PreviewMode::Text {
            dialect: Some(dialect),
            text,
        } => match dialect.format(text) {
            Ok(body) => PreviewOutput::Text { body, notice: None },
            Err(e) => {
                warn!("Cannot format {} preview, showing raw text: {}", dialect, e);
                PreviewOutput::Text {
                    body: text.to_string(),
                    notice: Some(format!("cannot format: {}", e)),
                }
            }
        },
        PreviewMode::Text {
            dialect: None,
            text,
        } => PreviewOutput::Text {
            body: text.to_string(),
            notice: None,
        },
        PreviewMode::Image {
            mime,
            encoding,
            data,
        } => PreviewOutput::Image(InlineImage::new(mime, encoding, data)),
        PreviewMode::Json { text } => match JsonTree::parse(Some(text)) {
            Ok(tree) => PreviewOutput::Json(tree),
            Err(e) => {
                warn!("Response declared as JSON could not be parsed: {}", e);
                PreviewOutput::JsonError(format!("invalid JSON: {}", e))
            }
        },
        PreviewMode::Empty => PreviewOutput::Empty,
    }
}
