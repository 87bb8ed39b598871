// src/ports/table.rs
use crate::constants::{DEFAULT_DATE_FORMAT, TABLE_HEADERS};
use crate::domain::{DayBoundary, NoteRecord};
use crate::util::text::{normalize_cell, truncate};
use tracing::instrument;

const COLUMN_GAP: &str = "  ";

/// Plain-text rendering of the visible rows for a terminal.
///
/// Column order follows the on-screen table: query key, quantity,
/// description, note, date.
#[derive(Debug, Clone)]
pub struct TablePresenter {
    boundary: DayBoundary,
    date_format: String,
    max_column_width: usize,
}

impl TablePresenter {
    pub fn new(boundary: DayBoundary) -> Self {
        Self {
            boundary,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_column_width: 40,
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width.max(4);
        self
    }

    fn cells(&self, record: &NoteRecord) -> [String; 5] {
        [
            record.query_key.clone(),
            record.quantity.to_string(),
            record.description.clone(),
            record.note.clone(),
            record.display_date(&self.boundary, &self.date_format),
        ]
        .map(|cell| truncate(&normalize_cell(&cell), self.max_column_width))
    }

    #[instrument(level = "trace", skip_all, fields(rows = records.len()))]
    pub fn render(&self, records: &[NoteRecord]) -> String {
        let rows: Vec<[String; 5]> = records.iter().map(|r| self.cells(r)).collect();

        let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_line(&TABLE_HEADERS.map(String::from), &widths));
        out.push_str(&format_line(&widths.map(|w| "-".repeat(w)), &widths));
        if rows.is_empty() {
            out.push_str("(no records)\n");
        }
        for row in &rows {
            out.push_str(&format_line(row, &widths));
        }
        out
    }
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::record;

    fn presenter() -> TablePresenter {
        TablePresenter::new(DayBoundary::utc())
    }

    #[test]
    fn given_records_when_rendering_then_uses_screen_column_order() {
        // Arrange
        let records = vec![record("100.100.6SN6.R", 3, "Bracket", "checked", "2024-01-05T10:00:00Z")];

        // Act
        let text = presenter().render(&records);

        // Assert
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let header = lines[0];
        let order: Vec<usize> = ["QR Code Data", "Quantity", "Description", "Note", "Date"]
            .iter()
            .map(|h| header.find(h).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        let row = lines[2];
        assert!(row.find("checked").unwrap() < row.find("1/5/2024").unwrap());
        assert!(row.starts_with("100.100.6SN6.R"));
    }

    #[test]
    fn given_no_records_when_rendering_then_shows_placeholder() {
        let text = presenter().render(&[]);

        assert!(text.starts_with("QR Code Data"));
        assert!(text.contains("(no records)"));
    }

    #[test]
    fn given_multiline_note_when_rendering_then_row_stays_on_one_line() {
        let records = vec![record("A", 1, "Bolt", "line one\nline two", "2024-01-05")];

        let text = presenter().render(&records);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("line one line two"));
    }

    #[test]
    fn given_long_description_when_rendering_then_truncates_to_column_width() {
        let long = "x".repeat(100);
        let records = vec![record("A", 1, &long, "", "2024-01-05")];

        let text = presenter().with_max_column_width(10).render(&records);

        assert!(text.contains("xxxxxxxxx…"));
        assert!(!text.contains(&"x".repeat(11)));
    }

    #[test]
    fn given_custom_date_format_when_rendering_then_formats_dates() {
        let records = vec![record("A", 1, "Bolt", "", "2024-01-05T10:00:00Z")];

        let text = presenter().with_date_format("%Y-%m-%d").render(&records);

        assert!(text.contains("2024-01-05"));
    }
}
