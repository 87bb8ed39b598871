// src/application/note_source.rs
use crate::domain::{DomainError, NoteRecord};
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait NoteSource: Send + Sync {
    /// Fetch every note record stored under `query_key`, in source order.
    async fn fetch_notes(&self, query_key: &str) -> Result<Vec<NoteRecord>, DomainError>;
}

/// Writes a rendered view of records somewhere the user can pick it up.
pub trait ViewExporter {
    /// Returns the location of the written document.
    fn export(&mut self, records: &[NoteRecord]) -> anyhow::Result<PathBuf>;
}
