use crate::Result;
use crate::history::model::HistoryEntry;
use crate::history::store::HistoryStore;
use inquire::Select;

/// Selection strategy for history entries
pub enum SelectionStrategy {
    Interactive { page_size: usize },
    /// 1-based position, most recent first
    Shortcut(usize),
}

/// Pick one history entry. `Ok(None)` means nothing matched or the user backed out.
pub fn select_entry(
    store: &HistoryStore,
    strategy: SelectionStrategy,
) -> Result<Option<HistoryEntry>> {
    match strategy {
        SelectionStrategy::Interactive { page_size } => select_interactive(store, page_size),
        SelectionStrategy::Shortcut(n) => Ok(store.nth_recent(n).cloned()),
    }
}

/// Interactively select a history entry using a TUI
fn select_interactive(store: &HistoryStore, page_size: usize) -> Result<Option<HistoryEntry>> {
    let entries = store.entries();
    if entries.is_empty() {
        return Ok(None);
    }

    #[derive(Clone)]
    struct EntryWrapper {
        index: usize,
        display: String,
    }

    impl std::fmt::Display for EntryWrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.display)
        }
    }

    let options: Vec<EntryWrapper> = entries
        .iter()
        .enumerate()
        .map(|(index, e)| EntryWrapper {
            index,
            display: format_entry_for_display(index, e),
        })
        .collect();

    let picked = Select::new("Open from history:", options)
        .with_page_size(page_size)
        .with_help_message("Enter to open, Esc to cancel, type to filter")
        .prompt_skippable()?;

    Ok(picked.map(|w| entries[w.index].clone()))
}

fn format_entry_for_display(index: usize, e: &HistoryEntry) -> String {
    let time = e.timestamp.format("%Y-%m-%d %H:%M:%S");
    let name = e.file_name();
    let path = e.path.display();
    format!("{:>2}. {name} ({path}, {time})", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display() {
        let entry = HistoryEntry::new("/captures/login.har");
        let display = format_entry_for_display(0, &entry);
        assert!(display.starts_with(" 1. login.har (/captures/login.har, "));
    }

    #[test]
    fn test_select_shortcut() {
        let mut store = HistoryStore::new();
        store.push("/1.har");
        store.push("/2.har");
        store.push("/3.har");

        let picked = select_entry(&store, SelectionStrategy::Shortcut(2)).unwrap();
        assert_eq!(picked.unwrap().path, std::path::PathBuf::from("/2.har"));

        let none = select_entry(&store, SelectionStrategy::Shortcut(9)).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_interactive_on_empty_store() {
        let store = HistoryStore::new();
        let picked =
            select_entry(&store, SelectionStrategy::Interactive { page_size: 10 }).unwrap();
        assert!(picked.is_none());
    }
}
