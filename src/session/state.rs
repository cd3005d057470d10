use std::path::{Path, PathBuf};

use crate::Result;
use crate::har::{Archive, Entry, HarLoader};
use crate::history::{HistoryStore, SHORTCUT_SLOTS};
use crate::session::dropped::accept_dropped;
use crate::session::event::{DetailTab, LoadOutcome, LoadRequest, SessionEvent};
use crate::view::{Filter, Row, RowTable};
use tracing::{debug, info, warn};

/// 单文档会话：当前文件、行表、选中状态和打开历史
///
/// 所有状态只在这里修改，事件经 `apply` 进入；需要读文件时返回
/// `LoadRequest`，由调用方加载后交回 `complete_load`。
#[derive(Debug, Default)]
pub struct Session {
    path: Option<PathBuf>,
    archive: Option<Archive>,
    table: RowTable,
    tab: DetailTab,
    history: HistoryStore,
    selected_history: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new(filter: Filter) -> Self {
        Self {
            table: RowTable::new(filter),
            ..Default::default()
        }
    }

    /// 处理一个事件，返回需要执行的加载（如果有）
    pub fn apply(&mut self, event: SessionEvent) -> Option<LoadRequest> {
        debug!("Session event: {:?}", event);
        match event {
            SessionEvent::Open(path) => {
                let id = self.history.push(path.clone());
                self.selected_history = Some(id);
                Some(self.request_load(path))
            }
            SessionEvent::Drop(paths) => {
                let accepted = accept_dropped(&paths);
                let first = accepted.first().cloned()?;
                let ids = self.history.push_batch(accepted);
                self.selected_history = ids.into_iter().next();
                Some(self.request_load(first))
            }
            SessionEvent::HistoryShortcut(n) => {
                if n > SHORTCUT_SLOTS {
                    return None;
                }
                let entry = self.history.nth_recent(n)?;
                let (id, path) = (entry.id.clone(), entry.path.clone());
                self.selected_history = Some(id);
                Some(self.request_load(path))
            }
            SessionEvent::SelectHistory(id) => {
                let path = self.history.get(&id)?.path.clone();
                self.selected_history = Some(id);
                Some(self.request_load(path))
            }
            SessionEvent::ClearHistory => {
                self.history.clear();
                self.selected_history = None;
                None
            }
            SessionEvent::SetFilter(filter) => {
                self.table.set_filter(filter);
                None
            }
            SessionEvent::ToggleRow(index) => {
                let before = self.table.selected_index();
                let after = self.table.toggle(index);
                if after.is_some() && after != before {
                    self.tab = DetailTab::Headers;
                }
                None
            }
            SessionEvent::SelectTab(tab) => {
                if self.table.selected_index().is_some() {
                    self.tab = tab;
                }
                None
            }
            SessionEvent::DismissDetail => {
                self.table.clear_selection();
                None
            }
        }
    }

    fn request_load(&mut self, path: PathBuf) -> LoadRequest {
        self.generation += 1;
        self.path = Some(path.clone());
        LoadRequest {
            generation: self.generation,
            path,
        }
    }

    /// 交回加载结果
    ///
    /// 过期的结果直接丢弃；失败时清空当前文档并把错误返回给调用方显示
    pub fn complete_load(
        &mut self,
        request: &LoadRequest,
        result: Result<Option<Archive>>,
    ) -> Result<LoadOutcome> {
        if request.generation != self.generation {
            debug!(
                "Discarding stale load of {} (generation {} < {})",
                request.path.display(),
                request.generation,
                self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        self.tab = DetailTab::Headers;
        match result {
            Ok(archive) => {
                self.table.rebuild(archive.as_ref());
                self.archive = archive;
                info!(
                    "Showing {} rows from {}",
                    self.table.rows().len(),
                    request.path.display()
                );
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", request.path.display(), e);
                self.archive = None;
                self.table.rebuild(None);
                Err(e)
            }
        }
    }

    /// 处理事件并在需要时加载文件
    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<()> {
        if let Some(request) = self.apply(event) {
            let result = HarLoader::load(Some(&request.path)).await;
            self.complete_load(&request, result)?;
        }
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn archive(&self) -> Option<&Archive> {
        self.archive.as_ref()
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn filter(&self) -> Filter {
        self.table.filter()
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn selected_history(&self) -> Option<&str> {
        self.selected_history.as_deref()
    }

    /// 当前选中的行和对应的 Entry
    pub fn selected(&self) -> Option<(&Row, &Entry)> {
        let row = self.table.selected()?;
        let entry = self.archive.as_ref()?.entry(row.entry_index)?;
        Some((row, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HarviewError;
    use crate::view::Category;

    fn archive(urls: &[&str]) -> Archive {
        let entries: Vec<String> = urls
            .iter()
            .map(|u| {
                format!(
                    r#"{{"request":{{"method":"GET","url":"{}"}},"response":{{"status":200,"content":{{"mimeType":"text/css"}}}}}}"#,
                    u
                )
            })
            .collect();
        HarLoader::parse(&format!(r#"{{"log":{{"entries":[{}]}}}}"#, entries.join(","))).unwrap()
    }

    #[test]
    fn test_open_records_history_and_requests_load() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();

        assert_eq!(req.generation, 1);
        assert_eq!(req.path, PathBuf::from("/a.har"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(
            session.selected_history(),
            Some(session.history().entries()[0].id.as_str())
        );
        assert_eq!(session.path(), Some(Path::new("/a.har")));
    }

    #[test]
    fn test_complete_load_rebuilds_rows() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();
        let outcome = session
            .complete_load(&req, Ok(Some(archive(&["https://x/a.css", "https://x/b.css"]))))
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(session.table().rows().len(), 2);
        assert!(session.archive().is_some());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut session = Session::new(Filter::All);
        let first = session.apply(SessionEvent::Open("/slow.har".into())).unwrap();
        let second = session.apply(SessionEvent::Open("/fast.har".into())).unwrap();

        session
            .complete_load(&second, Ok(Some(archive(&["https://x/fast.css"]))))
            .unwrap();
        let outcome = session
            .complete_load(&first, Ok(Some(archive(&["https://x/1", "https://x/2"]))))
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(session.table().rows().len(), 1);
        assert_eq!(session.table().rows()[0].name, "fast.css");
    }

    #[test]
    fn test_failed_load_clears_archive() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();
        session
            .complete_load(&req, Ok(Some(archive(&["https://x/a.css"]))))
            .unwrap();
        session.apply(SessionEvent::ToggleRow(0));

        let req = session.apply(SessionEvent::Open("/broken.har".into())).unwrap();
        let err = session
            .complete_load(&req, Err(HarviewError::Other("boom".into())))
            .unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert!(session.archive().is_none());
        assert!(session.table().rows().is_empty());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_drop_filters_and_opens_first() {
        let mut session = Session::new(Filter::All);
        session.apply(SessionEvent::Open("/older.har".into()));

        let req = session
            .apply(SessionEvent::Drop(vec![
                "a.txt".into(),
                "b.HAR".into(),
                "c.har".into(),
            ]))
            .unwrap();

        assert_eq!(req.path, PathBuf::from("b.HAR"));
        let paths: Vec<_> = session
            .history()
            .entries()
            .iter()
            .map(|e| e.path.clone())
            .collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("b.HAR"),
                PathBuf::from("c.har"),
                PathBuf::from("/older.har")
            ]
        );
        assert_eq!(
            session.selected_history(),
            Some(session.history().entries()[0].id.as_str())
        );
    }

    #[test]
    fn test_drop_without_har_is_ignored() {
        let mut session = Session::new(Filter::All);
        assert!(session.apply(SessionEvent::Drop(vec!["a.txt".into()])).is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.path(), None);
    }

    #[test]
    fn test_history_shortcut_does_not_grow_history() {
        let mut session = Session::new(Filter::All);
        session.apply(SessionEvent::Open("/y.har".into()));
        session.apply(SessionEvent::Open("/x.har".into()));

        let req = session.apply(SessionEvent::HistoryShortcut(2)).unwrap();
        assert_eq!(req.path, PathBuf::from("/y.har"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(
            session.selected_history(),
            Some(session.history().entries()[1].id.as_str())
        );

        assert!(session.apply(SessionEvent::HistoryShortcut(3)).is_none());

        for i in 0..10 {
            session.apply(SessionEvent::Open(format!("/{}.har", i).into()));
        }
        assert!(session.apply(SessionEvent::HistoryShortcut(10)).is_none());
        assert!(session.apply(SessionEvent::HistoryShortcut(9)).is_some());
    }

    #[test]
    fn test_clear_history_keeps_archive() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();
        session
            .complete_load(&req, Ok(Some(archive(&["https://x/a.css"]))))
            .unwrap();

        session.apply(SessionEvent::ClearHistory);
        assert!(session.history().is_empty());
        assert!(session.selected_history().is_none());
        assert!(session.archive().is_some());
    }

    #[test]
    fn test_toggle_and_tabs() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();
        session
            .complete_load(&req, Ok(Some(archive(&["https://x/a.css", "https://x/b.css"]))))
            .unwrap();

        // 没有选中时不能切换标签
        session.apply(SessionEvent::SelectTab(DetailTab::Preview));
        assert_eq!(session.tab(), DetailTab::Headers);

        session.apply(SessionEvent::ToggleRow(0));
        session.apply(SessionEvent::SelectTab(DetailTab::Preview));
        assert_eq!(session.tab(), DetailTab::Preview);

        // 换一行回到 Headers
        session.apply(SessionEvent::ToggleRow(1));
        assert_eq!(session.tab(), DetailTab::Headers);
        assert_eq!(session.selected().unwrap().0.name, "b.css");

        session.apply(SessionEvent::ToggleRow(1));
        assert!(session.selected().is_none());

        session.apply(SessionEvent::ToggleRow(0));
        session.apply(SessionEvent::DismissDetail);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_filter_does_not_touch_rows() {
        let mut session = Session::new(Filter::All);
        let req = session.apply(SessionEvent::Open("/a.har".into())).unwrap();
        session
            .complete_load(&req, Ok(Some(archive(&["https://x/a.css"]))))
            .unwrap();
        let before = session.table().rows().to_vec();

        session.apply(SessionEvent::SetFilter(Filter::Only(Category::Js)));
        assert_eq!(session.table().visible_count(), 0);
        assert_eq!(session.table().rows(), before.as_slice());
        assert_eq!(session.filter(), Filter::Only(Category::Js));
    }
}
