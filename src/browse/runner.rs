use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use colored::*;
use inquire::validator::Validation;
use inquire::{InquireError, Text};
use tracing::{debug, info};

use crate::browse::command::{BrowseCommand, HELP};
use crate::config::ViewerConfig;
use crate::history::{SHORTCUT_SLOTS, SelectionStrategy, render_history, select_entry};
use crate::session::{Session, SessionEvent, is_har_path};
use crate::utils::DetailFormatter;
use crate::view::RowPrinter;
use crate::{HarviewError, Result};

/// 交互式浏览：读一行命令，转换成会话事件，再把当前视图打印出来
pub struct BrowseRunner {
    session: Session,
    rows: RowPrinter,
    detail: DetailFormatter,
    color: bool,
    page_size: usize,
}

impl BrowseRunner {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            session: Session::new(config.display.default_filter),
            rows: RowPrinter::new(config.display.color),
            detail: DetailFormatter::from_config(&config.display),
            color: config.display.color,
            page_size: config.browse.page_size,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 命令行上给出的文件：一个时直接打开，多个时按拖入处理
    pub async fn open_initial(&mut self, mut files: Vec<PathBuf>) -> Result<()> {
        let event = match files.len() {
            0 => return Ok(()),
            1 => SessionEvent::Open(files.remove(0)),
            _ => SessionEvent::Drop(files),
        };
        self.session.dispatch(event).await
    }

    pub async fn run(&mut self, files: Vec<PathBuf>) -> Result<()> {
        if let Err(e) = self.open_initial(files).await {
            self.report(&e);
        }
        println!("{}", self.render());

        loop {
            let line = match Text::new("harview>")
                .with_help_message("'help' for commands, 'q' to quit")
                .prompt()
            {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e.into()),
            };

            let command = match BrowseCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.report(&e);
                    continue;
                }
            };

            match self.handle(command).await {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(Some(text))) => println!("{}", text),
                Ok(ControlFlow::Continue(None)) => println!("{}", self.render()),
                Err(e) => self.report(&e),
            }
        }

        info!("Browse session finished");
        Ok(())
    }

    /// 执行一条命令
    ///
    /// `Continue(Some(text))` 表示只显示这段文字，`Continue(None)` 表示重绘当前视图
    pub async fn handle(&mut self, command: BrowseCommand) -> Result<ControlFlow<(), Option<String>>> {
        debug!("Browse command: {:?}", command);
        let event = match command {
            BrowseCommand::Quit => return Ok(ControlFlow::Break(())),
            BrowseCommand::Refresh => return Ok(ControlFlow::Continue(None)),
            BrowseCommand::Help => return Ok(ControlFlow::Continue(Some(HELP.to_string()))),
            BrowseCommand::History => {
                return Ok(ControlFlow::Continue(Some(render_history(
                    self.session.history(),
                    self.session.selected_history(),
                    self.color,
                ))));
            }
            BrowseCommand::Open(Some(path)) => SessionEvent::Open(path),
            BrowseCommand::Open(None) => match prompt_har_path()? {
                Some(path) => SessionEvent::Open(path),
                None => return Ok(ControlFlow::Continue(None)),
            },
            BrowseCommand::Drop(paths) => SessionEvent::Drop(paths),
            BrowseCommand::Filter(filter) => SessionEvent::SetFilter(filter),
            BrowseCommand::Toggle(n) => {
                let row = n
                    .checked_sub(1)
                    .and_then(|i| self.session.table().visible_at(i))
                    .ok_or_else(|| {
                        HarviewError::InvalidArgument(format!(
                            "no row {}, {} rows visible",
                            n,
                            self.session.table().visible_count()
                        ))
                    })?;
                SessionEvent::ToggleRow(row.entry_index)
            }
            BrowseCommand::Tab(tab) => {
                if self.session.selected().is_none() {
                    return Err(HarviewError::InvalidArgument(
                        "select a row before switching tabs".to_string(),
                    ));
                }
                SessionEvent::SelectTab(tab)
            }
            BrowseCommand::Dismiss => SessionEvent::DismissDetail,
            BrowseCommand::Shortcut(n) => {
                if n > SHORTCUT_SLOTS || self.session.history().nth_recent(n).is_none() {
                    return Err(HarviewError::InvalidArgument(format!(
                        "no history entry @{}",
                        n
                    )));
                }
                SessionEvent::HistoryShortcut(n)
            }
            BrowseCommand::PickHistory => {
                let strategy = SelectionStrategy::Interactive {
                    page_size: self.page_size,
                };
                match select_entry(self.session.history(), strategy)? {
                    Some(entry) => SessionEvent::SelectHistory(entry.id),
                    None => return Ok(ControlFlow::Continue(None)),
                }
            }
            BrowseCommand::ClearHistory => SessionEvent::ClearHistory,
        };

        self.session.dispatch(event).await?;
        Ok(ControlFlow::Continue(None))
    }

    /// 当前视图：标题、请求表格，以及选中行的详情
    pub fn render(&self) -> String {
        let Some(path) = self.session.path() else {
            return "No file open. Use 'o <path>' or 'drop <paths..>'.".to_string();
        };

        let table = self.session.table();
        let title = format!(
            "{} ({} of {} requests, filter: {})",
            path.display(),
            table.visible_count(),
            table.rows().len(),
            table.filter()
        );
        let mut output = vec![if self.color {
            title.bold().to_string()
        } else {
            title
        }];

        if self.session.archive().is_some() {
            output.push(self.rows.render(table));
        }

        if let Some((row, entry)) = self.session.selected() {
            let tab = self.session.tab();
            let heading = format!("{} [{}]", row.name, tab);
            output.push(String::new());
            output.push(if self.color {
                heading.magenta().bold().to_string()
            } else {
                heading
            });
            output.push(self.detail.format(entry, tab));
        }

        output.join("\n")
    }

    fn report(&self, error: &HarviewError) {
        let message = format!("{}: {}", error.kind(), error);
        if self.color {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{}", message);
        }
    }
}

/// 打开对话框：只接受 `.har` 文件，Esc 返回 `None`
fn prompt_har_path() -> Result<Option<PathBuf>> {
    let answer = Text::new("HAR file:")
        .with_validator(|input: &str| {
            if is_har_path(Path::new(input.trim())) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("expected a *.har file".into()))
            }
        })
        .prompt_skippable()?;

    Ok(answer.map(|s| PathBuf::from(s.trim())))
}
