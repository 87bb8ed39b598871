// src/infrastructure/credentials.rs
use crate::constants::TOKEN_COOKIE;
use crate::domain::DomainError;
use std::env;
use tracing::trace;

/// Supplies the session token sent with every note request.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Result<String, DomainError>;
}

/// A token handed in directly, e.g. from `--token`.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Result<String, DomainError> {
        non_empty(self.0.trim(), "static token is empty")
    }
}

/// Token read from an environment variable at request time.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn token(&self) -> Result<String, DomainError> {
        let value = env::var(&self.var).map_err(|_| {
            DomainError::MissingCredential(format!("environment variable {} is not set", self.var))
        })?;
        non_empty(value.trim(), &format!("environment variable {} is empty", self.var))
    }
}

/// Token taken from a browser-style cookie string (`a=1; token=xyz`).
#[derive(Debug, Clone)]
pub struct CookieToken {
    cookies: String,
    name: String,
}

impl CookieToken {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: cookies.into(),
            name: TOKEN_COOKIE.to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl CredentialProvider for CookieToken {
    fn token(&self) -> Result<String, DomainError> {
        let prefix = format!("{}=", self.name);
        let value = self
            .cookies
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            .ok_or_else(|| {
                DomainError::MissingCredential(format!("no '{}' cookie present", self.name))
            })?;
        non_empty(value.trim(), &format!("'{}' cookie is empty", self.name))
    }
}

/// Tries each provider in order; the first non-empty token wins.
#[derive(Default)]
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl CredentialProvider for CredentialChain {
    fn token(&self) -> Result<String, DomainError> {
        let mut reasons = Vec::new();
        for provider in &self.providers {
            match provider.token() {
                Ok(token) => return Ok(token),
                Err(e) => {
                    trace!(error = %e, "Credential provider declined");
                    reasons.push(e.to_string());
                }
            }
        }
        if reasons.is_empty() {
            reasons.push("no credential source configured".to_string());
        }
        Err(DomainError::MissingCredential(reasons.join("; ")))
    }
}

fn non_empty(value: &str, reason: &str) -> Result<String, DomainError> {
    if value.is_empty() {
        Err(DomainError::MissingCredential(reason.to_string()))
    } else {
        Ok(value.to_string())
    }
}
