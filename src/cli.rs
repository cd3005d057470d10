use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use harview::browse::BrowseRunner;
use harview::config::{ConfigLoader, ViewerConfig};
use harview::har::HarLoader;
use harview::session::DetailTab;
use harview::utils::DetailFormatter;
use harview::view::{Filter, RowPrinter, RowTable};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 配置文件路径，默认在当前目录及其父目录查找 harview.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 关闭颜色输出
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列出 HAR 文件中的请求
    List {
        file: PathBuf,
        #[arg(long, short)]
        filter: Option<Filter>,
    },
    /// 显示某一行的详情
    Show {
        file: PathBuf,
        /// 过滤后的行号，从 1 开始
        row: usize,
        #[arg(long, short)]
        filter: Option<Filter>,
        #[arg(long, short, value_enum, default_value_t = TabArg::Headers)]
        tab: TabArg,
    },
    /// 交互式浏览
    Browse { files: Vec<PathBuf> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Headers,
    Preview,
    Response,
    All,
}

struct CliRunner {
    config: ViewerConfig,
}

impl CliRunner {
    fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    fn load_table(&self, file: &Path, filter: Option<Filter>) -> Result<(RowTable, harview::har::Archive)> {
        let archive = HarLoader::load_blocking(Some(file))?
            .ok_or_else(|| anyhow::anyhow!("No archive loaded from {}", file.display()))?;
        let mut table = RowTable::new(filter.unwrap_or(self.config.display.default_filter));
        table.rebuild(Some(&archive));
        Ok((table, archive))
    }

    fn list(&self, file: &Path, filter: Option<Filter>) -> Result<String> {
        let (table, archive) = self.load_table(file, filter)?;
        Ok(format!(
            "{}\n{}",
            archive.summary(),
            RowPrinter::new(self.config.display.color).render(&table)
        ))
    }

    fn show(&self, file: &Path, row: usize, filter: Option<Filter>, tab: TabArg) -> Result<String> {
        let (mut table, archive) = self.load_table(file, filter)?;
        let index = row
            .checked_sub(1)
            .and_then(|n| table.visible_at(n))
            .map(|r| r.entry_index)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Row {} is out of range, {} rows visible",
                    row,
                    table.visible_count()
                )
            })?;
        table.toggle(index);

        let (selected, entry) = table
            .selected()
            .zip(archive.entry(index))
            .ok_or_else(|| anyhow::anyhow!("Row {} has no entry", row))?;
        let formatter = DetailFormatter::from_config(&self.config.display);
        let body = match tab {
            TabArg::Headers => formatter.format(entry, DetailTab::Headers),
            TabArg::Preview => formatter.format(entry, DetailTab::Preview),
            TabArg::Response => formatter.format(entry, DetailTab::Response),
            TabArg::All => formatter.format_all(entry),
        };
        Ok(format!("{} {}\n\n{}", selected.method, selected.url, body))
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
    if cli.no_color {
        config.display.color = false;
    }
    if !config.display.color {
        colored::control::set_override(false);
    }

    let runner = CliRunner::new(config);
    match cli.command {
        Commands::List { file, filter } => println!("{}", runner.list(&file, filter)?),
        Commands::Show {
            file,
            row,
            filter,
            tab,
        } => println!("{}", runner.show(&file, row, filter, tab)?),
        Commands::Browse { files } => BrowseRunner::new(&runner.config).run(files).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use harview::view::Category;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn har_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"log":{"entries":[
                {"request":{"method":"GET","url":"https://a.com/"},"response":{"status":200,"content":{"mimeType":"text/html","size":2048}},"time":12.9},
                {"request":{"method":"POST","url":"https://a.com/api/login"},"response":{"status":401,"content":{"mimeType":"application/json","text":"{\"ok\":false}"}}}
            ]}}"#,
        )
        .unwrap();
        file
    }

    fn runner() -> CliRunner {
        let mut config = ViewerConfig::default();
        config.display.color = false;
        CliRunner::new(config)
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["harview", "--no-color", "list", "a.har", "-f", "xhr"]).unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::List { file, filter } => {
                assert_eq!(file, PathBuf::from("a.har"));
                assert_eq!(filter, Some(Filter::Only(Category::Xhr)));
            }
            _ => panic!("expected list"),
        }

        let cli = Cli::try_parse_from(["harview", "show", "a.har", "2", "--tab", "all"]).unwrap();
        match cli.command {
            Commands::Show { row, tab, .. } => {
                assert_eq!(row, 2);
                assert_eq!(tab, TabArg::All);
            }
            _ => panic!("expected show"),
        }

        assert!(Cli::try_parse_from(["harview", "list", "a.har", "-f", "fonts"]).is_err());
        assert!(Cli::try_parse_from(["harview"]).is_err());
    }

    #[test]
    fn test_list_output() {
        let file = har_file();
        let out = runner().list(file.path(), None).unwrap();
        assert!(out.contains("a.com/"));
        assert!(out.contains("login"));
        assert!(out.contains("2.0 kB"));
        assert!(out.contains("12 ms"));

        let xhr = runner()
            .list(file.path(), Some(Filter::Only(Category::Xhr)))
            .unwrap();
        assert!(xhr.contains("login"));
        assert!(!xhr.contains("a.com/"));
    }

    #[test]
    fn test_show_row() {
        let file = har_file();
        let out = runner()
            .show(file.path(), 2, None, TabArg::Headers)
            .unwrap();
        assert!(out.starts_with("POST https://a.com/api/login\n"));
        assert!(out.contains("Status Code: 401 Unauthorized"));

        let filtered = runner()
            .show(file.path(), 1, Some(Filter::Only(Category::Xhr)), TabArg::Response)
            .unwrap();
        assert!(filtered.ends_with("This request has no response data available."));

        assert!(runner().show(file.path(), 0, None, TabArg::Headers).is_err());
        assert!(runner().show(file.path(), 3, None, TabArg::Headers).is_err());
    }

    #[test]
    fn test_list_starts_with_summary() {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.har");
        let out = runner().list(&fixture, None).unwrap();
        assert!(out.starts_with("HAR 1.2, created by WebInspector 537.36, 1 page, 9 entries\n"));
    }

    #[test]
    fn test_list_missing_file() {
        assert!(runner().list(Path::new("/no/such/file.har"), None).is_err());
    }
}
