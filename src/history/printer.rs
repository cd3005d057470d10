use super::store::{HistoryStore, SHORTCUT_SLOTS};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, Color, Table};

pub fn render_history(store: &HistoryStore, selected: Option<&str>, color: bool) -> String {
    if store.is_empty() {
        return "No history yet".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(if color { UTF8_FULL } else { ASCII_FULL })
        .set_header(vec!["Key", "Name", "Path", "Opened"]);

    for (i, entry) in store.entries().iter().enumerate() {
        let key = if i < SHORTCUT_SLOTS {
            format!("@{}", i + 1)
        } else {
            String::new()
        };
        let is_selected = selected == Some(entry.id.as_str());
        let mut name = Cell::new(entry.file_name());
        if is_selected {
            name = if color {
                name.fg(Color::Magenta).add_attribute(Attribute::Bold)
            } else {
                Cell::new(format!("{} *", entry.file_name()))
            };
        }

        table.add_row(vec![
            Cell::new(key),
            name,
            Cell::new(entry.path.display()).add_attribute(Attribute::Dim),
            Cell::new(entry.timestamp.format("%H:%M:%S")),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_history(&HistoryStore::new(), None, false), "No history yet");
    }

    #[test]
    fn test_render_marks_selected() {
        let mut store = HistoryStore::new();
        store.push("/tmp/a.har");
        let id = store.push("/tmp/b.har");

        let out = render_history(&store, Some(&id), false);
        assert!(out.contains("@1"));
        assert!(out.contains("@2"));
        assert!(out.contains("b.har *"));
        assert!(!out.contains("a.har *"));
    }
}
