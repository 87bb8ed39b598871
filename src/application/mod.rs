// src/application/mod.rs
pub mod note_source;
pub mod note_table;

pub use note_source::{NoteSource, ViewExporter};
pub use note_table::{filter_by_day, FetchOutcome, FetchTicket, NoteTableController};
