use folio_schema::{Blog, Experience, Priority, Project};

use super::{ColumnDef, SortKey, TableRow};

const fn column(key: &'static str, header: &'static str, sortable: bool) -> ColumnDef {
    ColumnDef {
        key,
        header,
        sortable,
    }
}

fn priority_rank(p: Priority) -> u8 {
    match p {
        Priority::Low => 0,
        Priority::Medium => 1,
        Priority::High => 2,
    }
}

impl TableRow for Project {
    const COLUMNS: &'static [ColumnDef] = &[
        column("title", "Title", true),
        column("technologies", "Technologies", false),
        column("priority", "Priority", true),
        column("deadline", "Deadline", true),
    ];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn filter_value(&self) -> &str {
        &self.title
    }

    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "priority" => SortKey::Rank(priority_rank(self.priority)),
            "deadline" => SortKey::text(self.deadline.as_deref().unwrap_or_default()),
            _ => SortKey::text(&self.title),
        }
    }
}

impl TableRow for Blog {
    const COLUMNS: &'static [ColumnDef] = &[
        column("title", "Title", true),
        column("tags", "Tags", false),
        column("createdAt", "Created At", true),
    ];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn filter_value(&self) -> &str {
        &self.title
    }

    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "createdAt" => SortKey::text(self.created_at.as_deref().unwrap_or_default()),
            _ => SortKey::text(&self.title),
        }
    }
}

impl TableRow for Experience {
    const COLUMNS: &'static [ColumnDef] = &[
        column("title", "Title", true),
        column("company", "Company", true),
        column("period", "Period", true),
        column("technologies", "Technologies", false),
    ];

    fn row_id(&self) -> &str {
        &self.id
    }

    fn filter_value(&self) -> &str {
        &self.title
    }

    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "company" => SortKey::text(&self.company),
            "period" => SortKey::text(&self.period),
            _ => SortKey::text(&self.title),
        }
    }
}
