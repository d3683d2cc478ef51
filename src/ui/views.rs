use askama::Template;
use folio_schema::{Blog, BlogInput, Experience, ExperienceInput, Project, ProjectInput};

use super::Shell;
use super::pages::{
    BlogFormPage, CellView, ExperienceFormPage, FormChrome, HeaderView, ListPage,
    ProjectFormPage, RowView, priority_options,
};
use crate::entity::Entity;
use crate::forms::FormState;
use crate::table::{TableRow, TableState, badge_preview, format_date, priority_class};

/// How a record shows up in its table and form.
pub trait EntityView: Entity + TableRow {
    /// Cells in `COLUMNS` order.
    fn cells(&self) -> Vec<CellView>;

    fn live_href(&self) -> Option<&str> {
        None
    }

    fn render_form(
        shell: Shell,
        chrome: FormChrome,
        state: FormState<Self::Input>,
    ) -> askama::Result<String>;
}

fn title_cell(title: &str) -> CellView {
    CellView {
        text: title.to_string(),
        strong: true,
        ..CellView::default()
    }
}

fn text_cell(text: impl Into<String>) -> CellView {
    CellView {
        text: text.into(),
        ..CellView::default()
    }
}

fn badges_cell(items: &[String]) -> CellView {
    let (shown, more) = badge_preview(items);
    CellView {
        badges: shown.to_vec(),
        more: if more > 0 { format!("+{more}") } else { String::new() },
        ..CellView::default()
    }
}

impl EntityView for Project {
    fn cells(&self) -> Vec<CellView> {
        vec![
            title_cell(&self.title),
            badges_cell(&self.technologies),
            CellView {
                text: self.priority.as_str().to_string(),
                badge_class: priority_class(self.priority).to_string(),
                ..CellView::default()
            },
            text_cell(format_date(self.deadline.as_deref().unwrap_or_default())),
        ]
    }

    fn live_href(&self) -> Option<&str> {
        self.live.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn render_form(
        shell: Shell,
        chrome: FormChrome,
        state: FormState<ProjectInput>,
    ) -> askama::Result<String> {
        ProjectFormPage {
            shell,
            chrome,
            priorities: priority_options(state.values.priority),
            state,
        }
        .render()
    }
}

impl EntityView for Blog {
    fn cells(&self) -> Vec<CellView> {
        vec![
            title_cell(&self.title),
            badges_cell(&self.tags),
            text_cell(format_date(self.created_at.as_deref().unwrap_or_default())),
        ]
    }

    fn render_form(
        shell: Shell,
        chrome: FormChrome,
        state: FormState<BlogInput>,
    ) -> askama::Result<String> {
        BlogFormPage {
            shell,
            chrome,
            state,
        }
        .render()
    }
}

impl EntityView for Experience {
    fn cells(&self) -> Vec<CellView> {
        vec![
            title_cell(&self.title),
            text_cell(self.company.as_str()),
            text_cell(self.period.as_str()),
            badges_cell(&self.technologies),
        ]
    }

    fn render_form(
        shell: Shell,
        chrome: FormChrome,
        state: FormState<ExperienceInput>,
    ) -> askama::Result<String> {
        ExperienceFormPage {
            shell,
            chrome,
            state,
        }
        .render()
    }
}

/// Builds the table page for one snapshot of records.
pub fn list_page<E: EntityView>(shell: Shell, records: &[E], table: &TableState) -> ListPage {
    let kind = E::KIND;
    let base = kind.href();
    let page = table.paginate(records);

    let headers = E::COLUMNS
        .iter()
        .map(|c| HeaderView {
            header: c.header,
            sortable: c.sortable,
            href: if c.sortable {
                table.sort_href(base, c.key)
            } else {
                String::new()
            },
            indicator: table.indicator(c.key),
        })
        .collect();

    let rows = page
        .rows
        .iter()
        .map(|r| RowView {
            cells: r.cells(),
            edit_href: format!("{base}/{}", r.row_id()),
            delete_href: format!("{base}/{}/delete", r.row_id()),
            live_href: r.live_href().unwrap_or_default().to_string(),
        })
        .collect();

    ListPage {
        shell,
        description: kind.description(),
        new_href: format!("{base}/new"),
        new_label: format!("Add {}", kind.label()),
        base_href: base,
        filter: table.filter.clone(),
        filter_placeholder: kind.filter_placeholder(),
        headers,
        rows,
        colspan: E::COLUMNS.len() + 1,
        empty_message: kind.empty_message(),
        total_label: format!("{} {} total", page.total, kind.count_label()),
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        previous_href: table.page_href(base, page.page_index.saturating_sub(1)),
        next_href: table.page_href(base, page.page_index + 1),
        page_label: format!("Page {} of {}", page.page_index + 1, page.page_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableQuery;

    fn projects(n: usize) -> Vec<Project> {
        (0..n)
            .map(|i| {
                let live = if i == 0 { "https://example.com" } else { "" };
                serde_json::from_value(serde_json::json!({
                    "_id": format!("p{i}"),
                    "title": format!("Project {i:02}"),
                    "technologies": ["Rust", "Axum", "Tokio"],
                    "priority": "high",
                    "live": live,
                }))
                .expect("valid project")
            })
            .collect()
    }

    #[test]
    fn project_rows_preview_badges_and_live_link() {
        let data = projects(1);
        let page = list_page(Shell::default(), &data, &TableState::default());
        let row = &page.rows[0];

        assert_eq!(row.edit_href, "/projects/p0");
        assert_eq!(row.delete_href, "/projects/p0/delete");
        assert_eq!(row.live_href, "https://example.com");
        assert_eq!(row.cells[1].badges, ["Rust", "Axum"]);
        assert_eq!(row.cells[1].more, "+1");
        assert_eq!(row.cells[2].badge_class, "badge badge-high");
        assert_eq!(page.total_label, "1 project(s) total");
    }

    #[test]
    fn footer_links_follow_the_clamped_page() {
        let data = projects(12);
        let state = TableState::from_query::<Project>(&TableQuery {
            page: 7,
            ..TableQuery::default()
        });
        let page = list_page(Shell::default(), &data, &state);

        assert_eq!(page.rows.len(), 2);
        assert!(page.has_previous);
        assert!(!page.has_next);
        assert_eq!(page.previous_href, "/projects");
        assert_eq!(page.page_label, "Page 2 of 2");
        assert_eq!(page.total_label, "12 project(s) total");
    }

    #[test]
    fn empty_snapshot_renders_the_empty_message() {
        let data: Vec<Project> = Vec::new();
        let html = list_page(Shell::default(), &data, &TableState::default())
            .render()
            .expect("renders");
        assert!(html.contains("No projects found."));
        assert!(html.contains("0 project(s) total"));
    }
}
