//! Persisted credential record and the stores that hold it.
//!
//! The record is method-tagged JSON, e.g. `{"method":"token","token":"..."}`.
//! It is written once per configure, read once per authenticate and deleted
//! whenever the directory service rejects it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Secret material used to authenticate against the directory service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Credential {
    /// Personal access token (the only method github.com still accepts)
    Token { token: String },
    /// Login and password, for self-hosted instances with basic auth enabled
    Login { login: String, password: String },
}

impl Credential {
    /// Method tag as stored in the record
    pub fn method(&self) -> &'static str {
        match self {
            Self::Token { .. } => "token",
            Self::Login { .. } => "login",
        }
    }
}

// Secrets never reach logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { .. } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .finish(),
            Self::Login { login, .. } => f
                .debug_struct("Login")
                .field("login", login)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Errors raised while accessing a credential store
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No record has been configured
    #[error("no credential record configured")]
    Missing,

    /// The record exists but cannot be parsed
    #[error("malformed credential record {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading, writing or deleting the record failed
    #[error("credential record I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Storage for the single credential record.
///
/// The storage format is the implementation's business; callers only see
/// whole [`Credential`] values.
pub trait CredentialStore: Send + Sync {
    /// Whether a record is currently stored
    fn exists(&self) -> bool;

    /// Read the stored record
    fn read(&self) -> Result<Credential, CredentialError>;

    /// Replace the stored record
    fn write(&self, credential: &Credential) -> Result<(), CredentialError>;

    /// Remove the stored record. Removing a missing record succeeds.
    fn delete(&self) -> Result<(), CredentialError>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn read(&self) -> Result<Credential, CredentialError> {
        (**self).read()
    }

    fn write(&self, credential: &Credential) -> Result<(), CredentialError> {
        (**self).write(credential)
    }

    fn delete(&self) -> Result<(), CredentialError> {
        (**self).delete()
    }
}

/// Source of freshly entered credentials, used by the configure flow only
pub trait CredentialPrompt {
    /// Ask the user for a credential
    fn prompt(&self) -> anyhow::Result<Credential>;
}

/// Credential record stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<Credential, CredentialError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(CredentialError::Missing),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&content).map_err(|source| CredentialError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, credential: &Credential) -> Result<(), CredentialError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string(credential).map_err(|source| {
            CredentialError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        debug!("Wrote {} credential to {:?}", credential.method(), self.path);
        Ok(())
    }

    fn delete(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed credential record {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Credential record held in memory
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `credential`
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            record: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn exists(&self) -> bool {
        self.record.lock().is_some()
    }

    fn read(&self) -> Result<Credential, CredentialError> {
        self.record.lock().clone().ok_or(CredentialError::Missing)
    }

    fn write(&self, credential: &Credential) -> Result<(), CredentialError> {
        *self.record.lock() = Some(credential.clone());
        Ok(())
    }

    fn delete(&self) -> Result<(), CredentialError> {
        self.record.lock().take();
        Ok(())
    }
}
