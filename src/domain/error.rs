// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No session token available: {0}")]
    MissingCredential(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Note endpoint returned {status}: {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("Malformed note data: {0}")]
    Decode(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
