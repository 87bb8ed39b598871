// src/infrastructure/mod.rs
pub mod config;
pub mod credentials;
pub mod http_source;
pub mod opener;
pub mod pdf_export;

pub use config::Config;
pub use credentials::{CookieToken, CredentialChain, CredentialProvider, EnvToken, StaticToken};
pub use http_source::HttpNoteSource;
pub use pdf_export::PdfFileExporter;
