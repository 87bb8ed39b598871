// src/application/note_table.rs
use crate::application::{NoteSource, ViewExporter};
use crate::domain::{DayBoundary, DomainError, NoteRecord};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// Handle for one issued fetch. Only the most recently issued ticket may
/// replace the loaded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query_key: String,
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// Records replaced, filter reset.
    Applied { seq: u64, count: usize },
    /// Blank query key; nothing was requested.
    Skipped,
    /// A newer fetch was issued after this one; response discarded.
    Stale { seq: u64 },
    Failed(DomainError),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// State behind the note table: query key, selected day, the last fetched
/// records and the subset currently shown.
pub struct NoteTableController<S: NoteSource> {
    source: S,
    boundary: DayBoundary,
    query_key: String,
    selected_date: Option<NaiveDate>,
    all_records: Vec<NoteRecord>,
    visible_records: Vec<NoteRecord>,
    last_issued: u64,
    loaded: bool,
}

impl<S: NoteSource> NoteTableController<S> {
    pub fn new(source: S, query_key: impl Into<String>) -> Self {
        Self {
            source,
            boundary: DayBoundary::default(),
            query_key: query_key.into(),
            selected_date: None,
            all_records: Vec::new(),
            visible_records: Vec::new(),
            last_issued: 0,
            loaded: false,
        }
    }

    pub fn with_day_boundary(mut self, boundary: DayBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query_key(&self) -> &str {
        &self.query_key
    }

    /// Edits the key only; the table keeps its rows until the next fetch.
    pub fn set_query_key(&mut self, query_key: impl Into<String>) {
        self.query_key = query_key.into();
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Records the day to filter by. Takes effect on the next `apply_filter`.
    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        debug!(?date, "Selected filter date");
        self.selected_date = date;
    }

    pub fn all_records(&self) -> &[NoteRecord] {
        &self.all_records
    }

    pub fn visible_records(&self) -> &[NoteRecord] {
        &self.visible_records
    }

    /// False until a fetch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Issue a sequence number for a fetch of the current key, or `None` when
    /// the key is blank and no request must be made.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.query_key.trim().is_empty() {
            debug!("Blank query key, skipping fetch");
            return None;
        }
        self.last_issued += 1;
        Some(FetchTicket {
            seq: self.last_issued,
            query_key: self.query_key.clone(),
        })
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<NoteRecord>, DomainError>,
    ) -> FetchOutcome {
        match result {
            Err(e) => {
                error!(seq = ticket.seq, query_key = %ticket.query_key, error = %e, "Error fetching table data");
                FetchOutcome::Failed(e)
            }
            Ok(_) if ticket.seq != self.last_issued => {
                warn!(
                    seq = ticket.seq,
                    latest = self.last_issued,
                    "Discarding response superseded by a newer fetch"
                );
                FetchOutcome::Stale { seq: ticket.seq }
            }
            Ok(records) => {
                let count = records.len();
                self.visible_records = records.clone();
                self.all_records = records;
                self.loaded = true;
                info!(seq = ticket.seq, query_key = %ticket.query_key, count, "Loaded note records");
                FetchOutcome::Applied {
                    seq: ticket.seq,
                    count,
                }
            }
        }
    }

    /// The "Find" action.
    #[instrument(level = "debug", skip(self), fields(query_key = %self.query_key))]
    pub async fn find(&mut self) -> FetchOutcome {
        let Some(ticket) = self.begin_fetch() else {
            return FetchOutcome::Skipped;
        };
        let result = self.source.fetch_notes(&ticket.query_key).await;
        self.complete_fetch(ticket, result)
    }

    /// The "Filter" action: recompute the visible rows from the selected day.
    pub fn apply_filter(&mut self) -> &[NoteRecord] {
        self.visible_records = filter_by_day(&self.all_records, self.selected_date, &self.boundary);
        debug!(
            selected = ?self.selected_date,
            visible = self.visible_records.len(),
            total = self.all_records.len(),
            "Applied date filter"
        );
        &self.visible_records
    }

    /// Hand the visible rows to `exporter`. Never fetches.
    pub fn export_current_view<E: ViewExporter>(&self, exporter: &mut E) -> anyhow::Result<PathBuf> {
        info!(rows = self.visible_records.len(), "Exporting current view");
        exporter.export(&self.visible_records)
    }
}

/// Records whose timestamp falls on `day` in `boundary`'s zone, order kept.
/// `None` selects everything.
pub fn filter_by_day(
    records: &[NoteRecord],
    day: Option<NaiveDate>,
    boundary: &DayBoundary,
) -> Vec<NoteRecord> {
    match day {
        None => records.to_vec(),
        Some(day) => records
            .iter()
            .filter(|r| r.calendar_date(boundary) == day)
            .cloned()
            .collect(),
    }
}
