use super::model::HistoryEntry;
use std::path::PathBuf;
use tracing::debug;

/// 快捷键可直达的历史条数
pub const SHORTCUT_SLOTS: usize = 9;

/// 内存中的打开历史，最新的在前
///
/// 只在用户清空时缩减，不落盘。
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次打开，返回新条目的 ID
    pub fn push(&mut self, path: impl Into<PathBuf>) -> String {
        let entry = HistoryEntry::new(path);
        let id = entry.id.clone();
        debug!("History += {}", entry.path.display());
        self.entries.insert(0, entry);
        id
    }

    /// 一次记录多条，第一条成为最新
    pub fn push_batch<I, P>(&mut self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let batch: Vec<HistoryEntry> = paths.into_iter().map(HistoryEntry::new).collect();
        let ids = batch.iter().map(|e| e.id.clone()).collect();
        self.entries.splice(0..0, batch);
        ids
    }

    /// 第 n 新的条目（从 1 开始）
    pub fn nth_recent(&self, n: usize) -> Option<&HistoryEntry> {
        n.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
