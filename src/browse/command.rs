use std::path::PathBuf;
use std::str::FromStr;

use crate::HarviewError;
use crate::Result;
use crate::session::DetailTab;
use crate::view::Filter;

/// 交互模式下一行输入对应的命令
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    /// 空行：重新显示当前视图
    Refresh,
    /// `o [path]`，无路径时弹出输入框
    Open(Option<PathBuf>),
    Drop(Vec<PathBuf>),
    Filter(Filter),
    /// 可见行序号，从 1 开始
    Toggle(usize),
    Tab(DetailTab),
    Dismiss,
    History,
    /// `@n`
    Shortcut(usize),
    PickHistory,
    ClearHistory,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head {
            "" => BrowseCommand::Refresh,
            "o" | "open" => BrowseCommand::Open((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "drop" => {
                if rest.is_empty() {
                    return Err(invalid("drop needs at least one path"));
                }
                BrowseCommand::Drop(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "f" | "filter" => {
                if rest.is_empty() {
                    let choices: Vec<&str> = Filter::CHOICES.iter().map(|f| f.as_str()).collect();
                    return Err(invalid(&format!(
                        "filter needs one of: {}",
                        choices.join(", ")
                    )));
                }
                BrowseCommand::Filter(rest.parse()?)
            }
            "t" | "tab" => BrowseCommand::Tab(rest.parse()?),
            "x" | "esc" => BrowseCommand::Dismiss,
            "h" | "history" => BrowseCommand::History,
            "hs" => BrowseCommand::PickHistory,
            "clear" => BrowseCommand::ClearHistory,
            "?" | "help" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            shortcut if shortcut.starts_with('@') => {
                BrowseCommand::Shortcut(parse_position(&shortcut[1..])?)
            }
            number if number.chars().all(|c| c.is_ascii_digit()) => {
                BrowseCommand::Toggle(parse_position(number)?)
            }
            other => return Err(invalid(&format!("unknown command '{}', try 'help'", other))),
        };

        Ok(command)
    }
}

impl FromStr for BrowseCommand {
    type Err = HarviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub const HELP: &str = "\
Commands:
   o [path]        open a HAR file (prompts when no path)
   drop <paths..>  open dropped files, only *.har are kept
   f <filter>      All, XHR, JS, CSS, Img, Doc, Other
   <n>             select / deselect visible row n
   t <tab>         headers, preview, response
   x | esc         close the detail view
   h               show history
   @<n>            reopen the n-th most recent file
   hs              pick from history
   clear           clear history
   q               quit";

fn parse_position(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(&format!("expected a number starting at 1, got '{}'", s))),
    }
}

fn invalid(message: &str) -> HarviewError {
    HarviewError::InvalidArgument(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Category;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(BrowseCommand::parse("").unwrap(), BrowseCommand::Refresh);
        assert_eq!(BrowseCommand::parse("  q ").unwrap(), BrowseCommand::Quit);
        assert_eq!(BrowseCommand::parse("esc").unwrap(), BrowseCommand::Dismiss);
        assert_eq!(BrowseCommand::parse("hs").unwrap(), BrowseCommand::PickHistory);
        assert_eq!(BrowseCommand::parse("clear").unwrap(), BrowseCommand::ClearHistory);
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(BrowseCommand::parse("o").unwrap(), BrowseCommand::Open(None));
        assert_eq!(
            BrowseCommand::parse("o /tmp/my capture.har").unwrap(),
            BrowseCommand::Open(Some(PathBuf::from("/tmp/my capture.har")))
        );
    }

    #[test]
    fn test_parse_drop() {
        assert_eq!(
            BrowseCommand::parse("drop a.har b.txt").unwrap(),
            BrowseCommand::Drop(vec![PathBuf::from("a.har"), PathBuf::from("b.txt")])
        );
        assert!(BrowseCommand::parse("drop").is_err());
    }

    #[test]
    fn test_parse_filter_and_tab() {
        assert_eq!(
            BrowseCommand::parse("f xhr").unwrap(),
            BrowseCommand::Filter(Filter::Only(Category::Xhr))
        );
        assert_eq!(BrowseCommand::parse("f ALL").unwrap(), BrowseCommand::Filter(Filter::All));
        assert!(BrowseCommand::parse("f fonts").is_err());
        assert!(BrowseCommand::parse("f").is_err());
        assert_eq!(
            BrowseCommand::parse("t p").unwrap(),
            BrowseCommand::Tab(DetailTab::Preview)
        );
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(BrowseCommand::parse("3").unwrap(), BrowseCommand::Toggle(3));
        assert_eq!(BrowseCommand::parse("@2").unwrap(), BrowseCommand::Shortcut(2));
        assert!(BrowseCommand::parse("0").is_err());
        assert!(BrowseCommand::parse("@").is_err());
        assert!(BrowseCommand::parse("@x").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = BrowseCommand::parse("frobnicate").unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }
}
