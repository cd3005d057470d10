use crate::har::{Archive, Entry};
use crate::view::classify::{Category, Emphasis, Filter, classify};

/// 表格中的一行，由 Entry 派生，不单独持久化
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 对应 Entry 在 Archive 中的下标
    pub entry_index: usize,
    pub url: String,
    pub name: String,
    pub method: String,
    pub status: i64,
    pub category: Category,
    pub size: String,
    pub time: String,
    pub emphasis: Emphasis,
}

impl Row {
    pub fn from_entry(entry_index: usize, entry: &Entry) -> Self {
        let c = classify(entry);
        Self {
            entry_index,
            url: entry.request.url.clone(),
            name: c.name,
            method: entry.request.method.clone(),
            status: entry.response.status,
            category: c.category,
            size: c.size,
            time: c.time,
            emphasis: c.emphasis,
        }
    }
}

/// 按 Archive 原始顺序生成全部行
pub fn project_rows(archive: Option<&Archive>) -> Vec<Row> {
    archive
        .map(|a| {
            a.entries()
                .iter()
                .enumerate()
                .map(|(i, e)| Row::from_entry(i, e))
                .collect()
        })
        .unwrap_or_default()
}

/// 行列表 + 当前过滤条件 + 当前选中行
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    rows: Vec<Row>,
    filter: Filter,
    selected: Option<usize>,
}

impl RowTable {
    pub fn new(filter: Filter) -> Self {
        Self {
            rows: Vec::new(),
            filter,
            selected: None,
        }
    }

    /// Archive 变化时整体重建，同时清空选中
    pub fn rebuild(&mut self, archive: Option<&Archive>) {
        self.rows = project_rows(archive);
        self.selected = None;
    }

    /// 只改变可见性，不动行数据
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn visible(&self) -> impl Iterator<Item = &Row> {
        let filter = self.filter;
        self.rows.iter().filter(move |r| filter.matches(r.category))
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// 第 n 个可见行（从 0 开始）
    pub fn visible_at(&self, n: usize) -> Option<&Row> {
        self.visible().nth(n)
    }

    /// 选中同一行会取消选中，选中其它行则替换
    pub fn toggle(&mut self, entry_index: usize) -> Option<usize> {
        if entry_index >= self.rows.len() {
            return self.selected;
        }
        self.selected = if self.selected == Some(entry_index) {
            None
        } else {
            Some(entry_index)
        };
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Row> {
        self.selected.and_then(|i| self.rows.get(i))
    }
}
