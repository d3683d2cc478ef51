use chrono::{DateTime, Local, NaiveDate};
use folio_schema::Priority;

const BADGE_PREVIEW: usize = 2;

/// First two items of a list plus how many were left out.
pub fn badge_preview(items: &[String]) -> (&[String], usize) {
    let shown = items.len().min(BADGE_PREVIEW);
    (&items[..shown], items.len() - shown)
}

/// Renders an API date as a local `YYYY-MM-DD`; unparseable input is shown verbatim.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "badge badge-high",
        Priority::Medium => "badge badge-medium",
        Priority::Low => "badge badge-low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_shows_two_and_counts_the_rest() {
        let items: Vec<String> = ["Rust", "Axum", "Tokio", "Serde"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let (shown, more) = badge_preview(&items);
        assert_eq!(shown, ["Rust", "Axum"]);
        assert_eq!(more, 2);

        let (shown, more) = badge_preview(&items[..1]);
        assert_eq!(shown.len(), 1);
        assert_eq!(more, 0);
    }

    #[test]
    fn dates_render_as_calendar_days() {
        assert_eq!(format_date("2025-06-30"), "2025-06-30");
        assert_eq!(format_date("next sprint"), "next sprint");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2024-03-01T12:00:00Z").len(), 10);
    }
}
