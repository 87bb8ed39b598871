// src/infrastructure/http_source.rs
use crate::application::NoteSource;
use crate::constants::{AUTH_HEADER, NOTE_DATA_PATH, QUERY_KEY_PARAM};
use crate::domain::{DomainError, NoteRecord};
use crate::infrastructure::CredentialProvider;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Note records served by the dashboard API.
pub struct HttpNoteSource<C: CredentialProvider> {
    client: Client,
    base_url: String,
    credentials: C,
}

impl<C: CredentialProvider> HttpNoteSource<C> {
    pub fn new(base_url: impl Into<String>, credentials: C) -> Result<Self, DomainError> {
        Self::with_timeout(base_url, credentials, None)
    }

    /// `timeout` bounds each whole request; `None` waits indefinitely.
    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: C,
        timeout: Option<Duration>,
    ) -> Result<Self, DomainError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(%base_url, ?timeout, "Initializing note source");
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, NOTE_DATA_PATH)
    }
}

#[async_trait]
impl<C: CredentialProvider> NoteSource for HttpNoteSource<C> {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_notes(&self, query_key: &str) -> Result<Vec<NoteRecord>, DomainError> {
        // No request goes out without a token.
        let token = self.credentials.token()?;
        let start = Instant::now();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[(QUERY_KEY_PARAM, query_key)])
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, token)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Note endpoint responded");
        if !status.is_success() {
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let records: Vec<NoteRecord> = response
            .json()
            .await
            .map_err(|e| DomainError::Decode(format!("Failed to parse response: {}", e)))?;

        debug!(
            count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched note records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StaticToken;

    #[test]
    fn given_trailing_slash_when_building_endpoint_then_joins_cleanly() {
        let source = HttpNoteSource::new("https://example.test/", StaticToken::new("t")).unwrap();

        assert_eq!(source.endpoint(), "https://example.test/api/dashboard/qritemdata");
    }
}
