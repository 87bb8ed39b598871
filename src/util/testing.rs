// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteSource;
use crate::domain::record::parse_timestamp;
use crate::domain::{DomainError, NoteRecord};

enum FetchBehavior {
    Records(Vec<NoteRecord>),
    Status(u16),
    MissingCredential,
}

/// Shared in-memory note source for testing the table controller
///
/// Unknown keys answer with an empty record set. Every call is logged so
/// tests can assert that no request was made.
///
/// # Examples
///
/// ```
/// use notedash::util::testing::{record, MockNoteSource};
///
/// let source = MockNoteSource::builder()
///     .with_records("A", vec![record("A", 1, "Bolt", "", "2024-01-05")])
///     .with_status("B", 500)
///     .build();
/// assert!(source.calls().is_empty());
/// ```
pub struct MockNoteSource {
    behaviors: HashMap<String, FetchBehavior>,
    calls: Mutex<Vec<String>>,
}

impl MockNoteSource {
    pub fn builder() -> MockNoteSourceBuilder {
        MockNoteSourceBuilder::new()
    }

    /// Query keys requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NoteSource for MockNoteSource {
    async fn fetch_notes(&self, query_key: &str) -> Result<Vec<NoteRecord>, DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query_key.to_string());
        }
        match self.behaviors.get(query_key) {
            Some(FetchBehavior::Records(records)) => Ok(records.clone()),
            Some(FetchBehavior::Status(status)) => Err(DomainError::HttpStatus {
                status: *status,
                reason: "Mock failure".to_string(),
            }),
            Some(FetchBehavior::MissingCredential) => Err(DomainError::MissingCredential(
                "no token configured".to_string(),
            )),
            None => Ok(vec![]),
        }
    }
}

/// Strings shown by hex `Tj` operators in an uncompressed PDF, in drawing order.
///
/// Each byte is read as Latin-1, which covers the ASCII test data.
pub fn pdf_text_runs(bytes: &[u8]) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"<([0-9A-Fa-f]*)>\s*Tj").expect("static Tj pattern"));
    let content = String::from_utf8_lossy(bytes);
    re.captures_iter(&content)
        .map(|caps| {
            let hex = caps[1].as_bytes();
            hex.chunks(2)
                .filter_map(|pair| std::str::from_utf8(pair).ok())
                .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
                .map(char::from)
                .collect()
        })
        .collect()
}

/// Builder for MockNoteSource
pub struct MockNoteSourceBuilder {
    behaviors: HashMap<String, FetchBehavior>,
}

impl MockNoteSourceBuilder {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    /// Answer `query_key` with these records
    pub fn with_records(mut self, query_key: &str, records: Vec<NoteRecord>) -> Self {
        self.behaviors
            .insert(query_key.to_string(), FetchBehavior::Records(records));
        self
    }

    /// Fail `query_key` with a non-success HTTP status
    pub fn with_status(mut self, query_key: &str, status: u16) -> Self {
        self.behaviors
            .insert(query_key.to_string(), FetchBehavior::Status(status));
        self
    }

    pub fn with_missing_credential(mut self, query_key: &str) -> Self {
        self.behaviors
            .insert(query_key.to_string(), FetchBehavior::MissingCredential);
        self
    }

    pub fn build(self) -> MockNoteSource {
        MockNoteSource {
            behaviors: self.behaviors,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MockNoteSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a record; `date` accepts any form the endpoint may send.
///
/// Panics on an unparseable date, test input only.
pub fn record(query_key: &str, quantity: i64, description: &str, note: &str, date: &str) -> NoteRecord {
    NoteRecord {
        query_key: query_key.to_string(),
        quantity: quantity.into(),
        description: description.to_string(),
        note: note.to_string(),
        date: parse_timestamp(date).unwrap_or_else(|| panic!("bad test date: {date}")),
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
