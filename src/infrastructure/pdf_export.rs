// src/infrastructure/pdf_export.rs
use crate::application::ViewExporter;
use crate::domain::{DayBoundary, NoteRecord};
use crate::infrastructure::opener::open_with_default_app;
use crate::ports::pdf::render_records;
use crate::ports::PdfPresenter;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Renders the visible rows as a PDF table and saves it to `output`.
#[derive(Debug)]
pub struct PdfFileExporter {
    presenter: PdfPresenter,
    boundary: DayBoundary,
    date_format: String,
    output: PathBuf,
    open_after_save: bool,
}

impl PdfFileExporter {
    pub fn new(output: impl Into<PathBuf>, boundary: DayBoundary, date_format: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            presenter: titled(PdfPresenter::new(), &output),
            boundary,
            date_format: date_format.into(),
            output,
            open_after_save: false,
        }
    }

    pub fn with_presenter(mut self, presenter: PdfPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn open_after_save(mut self, open: bool) -> Self {
        self.open_after_save = open;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Point subsequent exports somewhere else.
    pub fn set_output(&mut self, output: impl Into<PathBuf>) {
        self.output = output.into();
        self.presenter = titled(std::mem::take(&mut self.presenter), &self.output);
    }

    pub fn presenter(&self) -> &PdfPresenter {
        &self.presenter
    }
}

/// Document title follows the file name.
fn titled(presenter: PdfPresenter, output: &Path) -> PdfPresenter {
    match output.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => presenter.with_title(stem),
        None => presenter,
    }
}

impl ViewExporter for PdfFileExporter {
    fn export(&mut self, records: &[NoteRecord]) -> Result<PathBuf> {
        let bytes = render_records(&self.presenter, records, &self.boundary, Some(&self.date_format))
            .context("Failed to render PDF")?;
        save_atomically(&self.output, &bytes)?;
        info!(path = %self.output.display(), rows = records.len(), "Saved PDF export");

        if self.open_after_save {
            open_with_default_app(&self.output)?;
        }
        Ok(self.output.clone())
    }
}

/// Write through a temp file in the target directory, then rename over `path`.
pub fn save_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(bytes)
        .context("Failed to write export to temporary file")?;
    temp.persist(path)
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}
