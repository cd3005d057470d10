use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::HarviewError;
use crate::view::Filter;

/// 详情面板的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Headers,
    Preview,
    Response,
}

impl DetailTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailTab::Headers => "Headers",
            DetailTab::Preview => "Preview",
            DetailTab::Response => "Response",
        }
    }
}

impl FromStr for DetailTab {
    type Err = HarviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headers" | "h" => Ok(DetailTab::Headers),
            "preview" | "p" => Ok(DetailTab::Preview),
            "response" | "r" => Ok(DetailTab::Response),
            _ => Err(HarviewError::InvalidArgument(format!(
                "unknown tab '{}', expected headers, preview or response",
                s
            ))),
        }
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 会话能处理的所有用户/文件事件
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 从打开对话框选中一个文件
    Open(PathBuf),
    /// 拖入一批文件
    Drop(Vec<PathBuf>),
    /// 第 n 新的历史记录（从 1 开始）
    HistoryShortcut(usize),
    SelectHistory(String),
    ClearHistory,
    SetFilter(Filter),
    /// 按 Entry 下标切换选中
    ToggleRow(usize),
    SelectTab(DetailTab),
    DismissDetail,
}

/// 一次待完成的加载；代数落后的结果会被丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub path: PathBuf,
}

/// `Session::complete_load` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// 已有更新的加载请求，本次结果被丢弃
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_parse() {
        assert_eq!("preview".parse::<DetailTab>().unwrap(), DetailTab::Preview);
        assert_eq!("R".parse::<DetailTab>().unwrap(), DetailTab::Response);
        assert!("cookies".parse::<DetailTab>().is_err());
    }
}
