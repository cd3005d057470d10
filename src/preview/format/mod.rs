//! 源码重排版：HTML、CSS 和 JavaScript
//!
//! 三个格式化器都只做缩进和换行，不改写 token 本身。输入不完整（括号不配对、
//! 字符串或注释没有结束）时返回 `FormatError`，由调用方决定是否回退到原文。

pub mod css;
pub mod html;
pub mod js;

use std::fmt;
use thiserror::Error;

pub use css::format_css;
pub use html::format_html;
pub use js::format_js;

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unexpected '{found}' at offset {offset}")]
    Unbalanced { found: char, offset: usize },

    #[error("'{open}' opened at offset {offset} is never closed")]
    Unclosed { open: char, offset: usize },

    #[error("unterminated {what} starting at offset {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("closing tag </{found}> does not match any open element")]
    MismatchedTag { found: String },
}

/// 源码方言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Html,
    Js,
    Css,
}

impl Dialect {
    pub fn format(&self, source: &str) -> Result<String, FormatError> {
        match self {
            Dialect::Html => format_html(source),
            Dialect::Js => format_js(source),
            Dialect::Css => format_css(source),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Html => "html",
            Dialect::Js => "babel",
            Dialect::Css => "css",
        })
    }
}

/// 按缩进层级输出一行，空行跳过
fn push_line(out: &mut String, depth: usize, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

/// 跳过一个带引号的字符串，返回结束引号的位置
fn scan_quoted(chars: &[char], start: usize) -> Result<usize, FormatError> {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return Ok(i),
            _ => i += 1,
        }
    }
    Err(FormatError::Unterminated {
        what: "string",
        offset: start,
    })
}

/// 查找 `needle` 第一次出现的位置
fn find_seq(chars: &[char], from: usize, needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() || from >= chars.len() {
        return None;
    }
    chars[from..]
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .map(|p| p + from)
}

/// 把连续空白压成一个空格
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finish(mut out: String) -> String {
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
