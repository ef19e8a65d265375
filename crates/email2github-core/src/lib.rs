//! Core library for email2github.
//!
//! Resolves email addresses to accounts on a hosted code-directory service
//! (GitHub) by running an ordered chain of lookup techniques over a shared,
//! lazily authenticated [`Session`].

pub mod credentials;
pub mod directory;
pub mod identity;
pub mod resolve;
pub mod session;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{
    Credential, CredentialError, CredentialPrompt, CredentialStore, FileCredentialStore,
    MemoryCredentialStore,
};
pub use directory::{
    Account, DirectoryClient, DirectoryConnection, GitHubClient, GitHubConfig, GitHubConnection,
    RateLimit, Repository, ServiceError,
};
pub use identity::Identity;
pub use resolve::{
    build_resolver, EmailSearch, PassOutcome, ResolutionPipeline, ResolveError, Resolver,
    SearchScope, TECHNIQUES,
};
pub use session::{
    establish, CredentialState, LookupOutcome, RecoveryPolicy, Session, SessionError,
};
pub use status::{MemoryReporter, Outcome, StatusLine, StatusReporter, TracingReporter};
