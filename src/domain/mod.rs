// src/domain/mod.rs
pub mod calendar;
pub mod error;
pub mod record;

pub use calendar::DayBoundary;
pub use error::DomainError;
pub use record::NoteRecord;
