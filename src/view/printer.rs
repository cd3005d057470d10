use crate::view::classify::reason_phrase;
use crate::view::rows::{Row, RowTable};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

/// 请求列表的表格渲染
pub struct RowPrinter {
    color: bool,
}

impl RowPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// 渲染当前过滤条件下的可见行，第一列是可见序号（从 1 开始）
    pub fn render(&self, table: &RowTable) -> String {
        let mut out = Table::new();
        out.load_preset(if self.color { UTF8_FULL } else { ASCII_FULL })
            .set_header(vec!["#", "Name", "Method", "Status", "Type", "Size", "Time"]);

        let selected = table.selected_index();
        for (position, row) in table.visible().enumerate() {
            let marker = if selected == Some(row.entry_index) {
                format!("{}*", position + 1)
            } else {
                (position + 1).to_string()
            };
            out.add_row(vec![
                Cell::new(marker),
                self.name_cell(row),
                Cell::new(&row.method),
                Cell::new(row.status),
                Cell::new(row.category),
                Cell::new(&row.size).set_alignment(CellAlignment::Right),
                Cell::new(format!("{} ms", row.time)).set_alignment(CellAlignment::Right),
            ]);
        }

        out.to_string()
    }

    // error 优先于 muted
    fn name_cell(&self, row: &Row) -> Cell {
        let cell = Cell::new(&row.name);
        if !self.color {
            return cell;
        }
        if row.emphasis.error {
            cell.fg(Color::Red)
        } else if row.emphasis.muted {
            cell.fg(Color::Grey).add_attribute(Attribute::Dim)
        } else {
            cell
        }
    }
}

/// 状态码加描述，例如 `404 Not Found`
pub fn status_line(status: i64, status_text: Option<&str>) -> String {
    let text = status_text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| reason_phrase(status));
    format!("{} {}", status, text)
}
