//! Records and error conditions exchanged with the directory service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An account on the directory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric account id
    pub id: u64,
    /// Login name
    pub login: String,
    /// Profile page
    #[serde(default)]
    pub html_url: String,
}

/// A repository on the directory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub html_url: String,
}

/// Details of a rate-limit rejection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// When the quota resets, if the service said so
    pub reset_at: Option<DateTime<Utc>>,
}

/// Conditions raised by the directory service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The credential was refused
    #[error("bad credentials")]
    InvalidCredentials,

    /// The request quota is exhausted
    #[error("API rate limit exceeded")]
    RateLimited(RateLimit),

    /// The requested resource does not exist
    #[error("not found")]
    NotFound,

    /// Any other error response
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be understood
    #[error("unexpected response: {0}")]
    Decode(String),
}
