// src/ports/mod.rs
pub mod pdf;
pub mod table;

pub use pdf::{PdfPresenter, ReportTable};
pub use table::TablePresenter;
