mod helpers;

use anyhow::Result;
use helpers::{mount_notes, sample_payload, sample_records, source_for, KEY};
use notedash::application::{NoteTableController, ViewExporter};
use notedash::domain::DayBoundary;
use notedash::infrastructure::PdfFileExporter;
use notedash::util::testing::pdf_text_runs;
use tempfile::TempDir;

const HEADER: [&str; 5] = ["QR CodeData", "Quantity", "Description", "Date", "Note"];

fn exporter_in(dir: &TempDir) -> PdfFileExporter {
    PdfFileExporter::new(dir.path().join("checkout_data.pdf"), DayBoundary::utc(), "%-m/%-d/%Y")
}

#[test]
fn given_records_when_exporting_then_writes_pdf_file() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let mut exporter = exporter_in(&dir);

    // Act
    let saved = exporter.export(&sample_records())?;

    // Assert
    assert_eq!(saved, dir.path().join("checkout_data.pdf"));
    let bytes = std::fs::read(&saved)?;
    assert!(bytes.starts_with(b"%PDF-"));
    let runs = pdf_text_runs(&bytes);
    assert_eq!(runs[..5], HEADER);
    let notes: Vec<&str> = runs
        .iter()
        .map(String::as_str)
        .filter(|r| ["checked out to line 3", "returned damaged", "restocked"].contains(r))
        .collect();
    assert_eq!(notes, ["checked out to line 3", "returned damaged", "restocked"]);
    Ok(())
}

#[test]
fn given_empty_view_when_exporting_then_still_writes_valid_document() -> Result<()> {
    let dir = TempDir::new()?;
    let mut exporter = exporter_in(&dir);

    let saved = exporter.export(&[])?;

    let bytes = std::fs::read(saved)?;
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf_text_runs(&bytes), HEADER);
    Ok(())
}

#[test]
fn given_existing_export_when_exporting_again_then_overwrites() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("checkout_data.pdf");
    std::fs::write(&path, b"stale")?;
    let mut exporter = exporter_in(&dir);

    exporter.export(&sample_records())?;

    assert!(std::fs::read(&path)?.starts_with(b"%PDF-"));
    Ok(())
}

#[tokio::test]
async fn given_filtered_table_when_exporting_then_only_visible_rows_are_rendered() -> Result<()> {
    // Arrange
    let server = wiremock::MockServer::start().await;
    mount_notes(&server, 200, sample_payload()).await;
    let mut table = NoteTableController::new(source_for(&server), KEY)
        .with_day_boundary(DayBoundary::utc());
    table.find().await;
    table.select_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 6));
    table.apply_filter();

    struct Counting(usize);
    impl ViewExporter for Counting {
        fn export(&mut self, records: &[notedash::domain::NoteRecord]) -> Result<std::path::PathBuf> {
            self.0 = records.len();
            Ok("counted.pdf".into())
        }
    }
    let mut counting = Counting(0);
    let dir = TempDir::new()?;
    let mut pdf = exporter_in(&dir);

    // Act
    table.export_current_view(&mut counting)?;
    let saved = table.export_current_view(&mut pdf)?;

    // Assert
    assert_eq!(counting.0, 1);
    let runs = pdf_text_runs(&std::fs::read(saved)?);
    assert_eq!(runs, HEADER.into_iter().chain([KEY, "5", "Hinge bracket", "1/6/2024", "restocked"]).collect::<Vec<_>>());
    Ok(())
}
