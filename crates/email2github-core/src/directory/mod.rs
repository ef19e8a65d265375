//! Remote code-directory service abstraction.
//!
//! A [`DirectoryClient`] turns a credential into an authenticated
//! [`DirectoryConnection`]; the connection carries every remote capability the
//! session needs. [`GitHubClient`] is the production implementation.

mod github;
mod types;

use std::future::Future;

pub use github::{GitHubClient, GitHubConfig, GitHubConnection};
pub use types::{Account, RateLimit, Repository, ServiceError};

use crate::credentials::Credential;

/// Factory for authenticated connections
pub trait DirectoryClient: Send + Sync {
    /// Connection type produced by [`connect`](Self::connect)
    type Connection: DirectoryConnection;

    /// Build a connection that authenticates with `credential`.
    ///
    /// Implementations may defer validation to the first request; the
    /// session always confirms the credential through
    /// [`DirectoryConnection::principal`].
    fn connect(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Self::Connection, ServiceError>> + Send;
}

/// Operations available on an authenticated connection
pub trait DirectoryConnection: Send + Sync + 'static {
    /// The account the credential belongs to
    fn principal(&self) -> impl Future<Output = Result<Account, ServiceError>> + Send;

    /// Search accounts with a service-specific query, best match first
    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Account>, ServiceError>> + Send;

    /// Search commits and return the linked authors, best match first.
    /// Commits without a linked account are skipped.
    fn search_commit_authors(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Account>, ServiceError>> + Send;

    /// Create a repository owned by the principal
    fn create_repository(
        &self,
        name: &str,
        private: bool,
    ) -> impl Future<Output = Result<Repository, ServiceError>> + Send;

    /// Fetch `owner/name`
    fn get_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> impl Future<Output = Result<Repository, ServiceError>> + Send;
}
