use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 最近打开的文件记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 唯一 ID (UUID)
    pub id: String,

    /// 文件路径
    pub path: PathBuf,

    /// 打开时间
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            path: path.into(),
            timestamp: Utc::now(),
        }
    }

    /// 文件名，用于列表显示
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry() {
        let a = HistoryEntry::new("/tmp/captures/site.har");
        let b = HistoryEntry::new("/tmp/captures/site.har");
        assert_ne!(a.id, b.id);
        assert_eq!(a.file_name(), "site.har");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(HistoryEntry::new("/").file_name(), "/");
    }
}
