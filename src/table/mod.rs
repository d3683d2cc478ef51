//! Filter, sort and paginate a fetched snapshot of records.
//!
//! The whole list is fetched on every view; table state lives in the query string
//! (`q`, `sort`, `dir`, `page`), so every link is a plain GET.

mod cells;
mod rows;

use serde::Deserialize;
use url::form_urlencoded;

pub use cells::{badge_preview, format_date, priority_class};

pub const PAGE_SIZE: usize = 10;

/// Table state as it appears in the URL. `page` is 1-based there.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableQuery {
    pub q: String,
    pub sort: String,
    pub dir: String,
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorting {
    pub column: &'static str,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
}

/// Comparable value of one cell. A column always yields the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Count(usize),
    Rank(u8),
}

impl SortKey {
    /// Case-insensitive text key.
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

/// A record that can be listed in a table.
pub trait TableRow {
    const COLUMNS: &'static [ColumnDef];

    fn row_id(&self) -> &str;

    /// Text the filter box matches against (the title column).
    fn filter_value(&self) -> &str;

    fn sort_key(&self, column: &str) -> SortKey;
}

/// Validated table state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub filter: String,
    pub sorting: Option<Sorting>,
    /// Zero-based; clamped once the row count is known.
    pub page_index: usize,
}

/// One page of filtered, sorted rows.
#[derive(Debug)]
pub struct Page<'r, T> {
    pub rows: Vec<&'r T>,
    /// Row count after filtering, before paging.
    pub total: usize,
    pub page_index: usize,
    pub page_count: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

impl TableState {
    /// Unknown or unsortable columns drop the sort rather than failing the request.
    pub fn from_query<T: TableRow>(query: &TableQuery) -> Self {
        let sorting = T::COLUMNS
            .iter()
            .find(|c| c.sortable && c.key == query.sort)
            .map(|c| Sorting {
                column: c.key,
                direction: if query.dir == "desc" {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            });

        Self {
            filter: query.q.trim().to_string(),
            sorting,
            page_index: query.page.saturating_sub(1),
        }
    }

    pub fn paginate<'r, T: TableRow>(&self, rows: &'r [T]) -> Page<'r, T> {
        let needle = self.filter.to_lowercase();
        let mut filtered: Vec<&T> = rows
            .iter()
            .filter(|r| needle.is_empty() || r.filter_value().to_lowercase().contains(&needle))
            .collect();

        if let Some(sorting) = self.sorting {
            filtered.sort_by(|a, b| {
                let ord = a.sort_key(sorting.column).cmp(&b.sort_key(sorting.column));
                match sorting.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = filtered.len();
        let page_count = total.div_ceil(PAGE_SIZE).max(1);
        let page_index = self.page_index.min(page_count - 1);
        let rows = filtered
            .into_iter()
            .skip(page_index * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Page {
            rows,
            total,
            page_index,
            page_count,
        }
    }

    /// Next state of `column` in the cycle ascending, descending, unsorted.
    pub fn next_sorting(&self, column: &'static str) -> Option<Sorting> {
        match self.sorting {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Asc => Some(Sorting {
                    column,
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(Sorting {
                column,
                direction: SortDirection::Asc,
            }),
        }
    }

    /// Arrow shown beside a sorted header.
    pub fn indicator(&self, column: &str) -> &'static str {
        match self.sorting {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Asc => "▲",
                SortDirection::Desc => "▼",
            },
            _ => "",
        }
    }

    /// Header link; resets to the first page.
    pub fn sort_href(&self, base: &str, column: &'static str) -> String {
        self.href(base, self.next_sorting(column), 0)
    }

    pub fn page_href(&self, base: &str, page_index: usize) -> String {
        self.href(base, self.sorting, page_index)
    }

    fn href(&self, base: &str, sorting: Option<Sorting>, page_index: usize) -> String {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        if !self.filter.is_empty() {
            qs.append_pair("q", &self.filter);
        }
        if let Some(s) = sorting {
            qs.append_pair("sort", s.column);
            qs.append_pair("dir", s.direction.as_str());
        }
        if page_index > 0 {
            qs.append_pair("page", &(page_index + 1).to_string());
        }
        let qs = qs.finish();
        if qs.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{qs}")
        }
    }
}
