// src/ports/pdf.rs
use crate::constants::{DEFAULT_DATE_FORMAT, EXPORT_HEADERS};
use crate::domain::{DayBoundary, DomainError, NoteRecord};
use crate::util::text::{truncate, wrap};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};
use tracing::{debug, instrument, warn};

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance relative to the font size.
const AVG_GLYPH_EM: f32 = 0.55;

/// The export table: header plus one row of display strings per record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Rows in export column order: query key, quantity, description, date, note.
    pub fn from_records(records: &[NoteRecord], boundary: &DayBoundary, date_format: &str) -> Self {
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.query_key.clone(),
                    r.quantity.to_string(),
                    r.description.clone(),
                    r.display_date(boundary, date_format),
                    r.note.clone(),
                ]
            })
            .collect();
        Self {
            header: EXPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

/// Characters the built-in Helvetica font can draw under WinAnsi encoding.
/// Anything else comes out as a blank.
fn is_win_ansi(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}')
        || "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".contains(c)
}

/// Number of cells (header included) holding characters the PDF font cannot draw.
pub fn unencodable_cells(table: &ReportTable) -> usize {
    table
        .rows
        .iter()
        .flatten()
        .chain(table.header.iter())
        .filter(|cell| !cell.chars().all(is_win_ansi))
        .count()
}

/// A table row after wrapping: the lines of each cell and the row height in mm.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutRow {
    pub cells: Vec<Vec<String>>,
    pub height: f32,
}

/// Rows placed on one page; the header row is repeated on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub header: LaidOutRow,
    pub rows: Vec<LaidOutRow>,
}

#[derive(Debug, Clone)]
pub struct PdfPresenter {
    title: String,
    page_width: f32,
    page_height: f32,
    margin: f32,
    font_size: f32,
    line_height: f32,
    cell_padding: f32,
    column_weights: [f32; 5],
}

impl PdfPresenter {
    /// A4 portrait, 9pt Helvetica.
    pub fn new() -> Self {
        Self {
            title: "checkout_data".to_string(),
            page_width: 210.0,
            page_height: 297.0,
            margin: 14.0,
            font_size: 9.0,
            line_height: 4.2,
            cell_padding: 1.8,
            // query key, quantity, description, date, note
            column_weights: [0.22, 0.11, 0.25, 0.14, 0.28],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_page_size(mut self, width_mm: f32, height_mm: f32) -> Self {
        self.page_width = width_mm;
        self.page_height = height_mm;
        self
    }

    pub fn column_widths(&self) -> [f32; 5] {
        let usable = self.page_width - 2.0 * self.margin;
        let total: f32 = self.column_weights.iter().sum();
        self.column_weights.map(|w| usable * w / total)
    }

    fn chars_per_line(&self, column_width: f32) -> usize {
        let glyph = self.font_size * PT_TO_MM * AVG_GLYPH_EM;
        (((column_width - 2.0 * self.cell_padding) / glyph).floor() as usize).max(1)
    }

    /// Vertical space available for body rows below the header on one page.
    fn body_height(&self, header: &LaidOutRow) -> f32 {
        self.page_height - 2.0 * self.margin - header.height
    }

    fn lay_out_row(&self, cells: &[String], max_lines: usize) -> LaidOutRow {
        let widths = self.column_widths();
        let cells: Vec<Vec<String>> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let per_line = self.chars_per_line(*width);
                let mut lines = wrap(cell, per_line);
                if lines.len() > max_lines {
                    lines.truncate(max_lines);
                    if let Some(last) = lines.last_mut() {
                        *last = truncate(&format!("{last}…"), per_line);
                    }
                }
                lines
            })
            .collect();
        let line_count = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        LaidOutRow {
            cells,
            height: line_count as f32 * self.line_height + 2.0 * self.cell_padding,
        }
    }

    /// Wrap every cell and break the rows into pages.
    ///
    /// Always yields at least one page, so an empty table still carries its header.
    pub fn layout(&self, table: &ReportTable) -> Vec<PageLayout> {
        let header = self.lay_out_row(&table.header, usize::MAX);
        let available = self.body_height(&header);
        let max_lines =
            (((available - 2.0 * self.cell_padding) / self.line_height).floor() as usize).max(1);

        let mut pages = vec![PageLayout {
            header: header.clone(),
            rows: vec![],
        }];
        let mut used = 0.0;

        for row in &table.rows {
            let laid = self.lay_out_row(row, max_lines);
            let current_has_rows = pages.last().is_some_and(|p| !p.rows.is_empty());
            if current_has_rows && used + laid.height > available {
                pages.push(PageLayout {
                    header: header.clone(),
                    rows: vec![],
                });
                used = 0.0;
            }
            used += laid.height;
            if let Some(page) = pages.last_mut() {
                page.rows.push(laid);
            }
        }
        pages
    }

    #[instrument(level = "debug", skip_all, fields(rows = table.rows.len()))]
    pub fn render(&self, table: &ReportTable) -> Result<Vec<u8>, DomainError> {
        let pages = self.layout(table);
        debug!(pages = pages.len(), "Laid out export table");
        let lossy = unencodable_cells(table);
        if lossy > 0 {
            warn!(cells = lossy, "Cells contain characters Helvetica cannot draw; they render as blanks");
        }

        let (doc, first_page, first_layer) = PdfDocument::new(
            &self.title,
            Mm(self.page_width),
            Mm(self.page_height),
            "Table",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DomainError::Export(format!("Failed to load font: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DomainError::Export(format!("Failed to load font: {e}")))?;

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) =
                    doc.add_page(Mm(self.page_width), Mm(self.page_height), "Table");
                doc.get_page(page_index).get_layer(layer_index)
            };

            let mut top = self.margin;
            self.draw_row(&layer, &page.header, top, &bold);
            top += page.header.height;
            self.draw_rule(&layer, top);
            for row in &page.rows {
                self.draw_row(&layer, row, top, &regular);
                top += row.height;
                self.draw_rule(&layer, top);
            }
        }

        doc.save_to_bytes()
            .map_err(|e| DomainError::Export(format!("Failed to serialize PDF: {e}")))
    }

    /// `top` is measured in mm from the top edge; PDF coordinates grow upwards.
    fn draw_row(&self, layer: &PdfLayerReference, row: &LaidOutRow, top: f32, font: &IndirectFontRef) {
        let ascent = self.font_size * PT_TO_MM * 0.8;
        let mut x = self.margin;
        for (lines, width) in row.cells.iter().zip(self.column_widths()) {
            for (i, line) in lines.iter().enumerate().filter(|(_, line)| !line.is_empty()) {
                let baseline = top + self.cell_padding + ascent + i as f32 * self.line_height;
                layer.use_text(
                    line.clone(),
                    self.font_size,
                    Mm(x + self.cell_padding),
                    Mm(self.page_height - baseline),
                    font,
                );
            }
            x += width;
        }
    }

    fn draw_rule(&self, layer: &PdfLayerReference, top: f32) {
        let y = Mm(self.page_height - top);
        layer.set_outline_thickness(0.3);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(self.margin), y), false),
                (Point::new(Mm(self.page_width - self.margin), y), false),
            ],
            is_closed: false,
        });
    }
}

impl Default for PdfPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for the common path: records straight to PDF bytes.
pub fn render_records(
    presenter: &PdfPresenter,
    records: &[NoteRecord],
    boundary: &DayBoundary,
    date_format: Option<&str>,
) -> Result<Vec<u8>, DomainError> {
    let table = ReportTable::from_records(records, boundary, date_format.unwrap_or(DEFAULT_DATE_FORMAT));
    presenter.render(&table)
}
