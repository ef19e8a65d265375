//! Resolution techniques and the pipeline that chains them.
//!
//! A [`Resolver`] receives the identities still unresolved when its turn
//! comes and resolves what it can in place. [`ResolutionPipeline`] runs the
//! resolvers in order and hands each one the shrinking remainder.

mod pipeline;
mod search;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;

pub use pipeline::ResolutionPipeline;
pub use search::{EmailSearch, SearchScope};

use crate::credentials::CredentialStore;
use crate::directory::DirectoryClient;
use crate::identity::Identity;
use crate::session::Session;
use crate::status::StatusReporter;

/// Names accepted by [`build_resolver`], in default order
pub const TECHNIQUES: &[&str] = &["users_search", "commits_search"];

/// How a resolver pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every identity in the batch was looked up
    Completed { resolved: usize },
    /// The pass stopped early (rate limit or service error); identities
    /// resolved before the interruption stay resolved
    Interrupted { resolved: usize, reason: String },
}

impl PassOutcome {
    /// Identities resolved during the pass
    pub fn resolved(&self) -> usize {
        match self {
            Self::Completed { resolved } | Self::Interrupted { resolved, .. } => *resolved,
        }
    }
}

/// Conditions that abort the whole resolution run
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The session could not authenticate, so no technique can progress
    #[error("authentication with the directory service failed")]
    SessionUnavailable,
}

/// A lookup technique
pub trait Resolver: Send + Sync {
    /// Technique name, as used in settings
    fn name(&self) -> &str;

    /// Resolve as many identities of `batch` as possible by setting their
    /// account. Every identity in `batch` is unresolved on entry.
    fn resolve<'a>(
        &'a self,
        batch: Vec<&'a mut Identity>,
    ) -> BoxFuture<'a, Result<PassOutcome, ResolveError>>;
}

/// Build the technique called `name`, sharing `session`
pub fn build_resolver<C, S>(
    name: &str,
    session: Arc<Session<C, S>>,
    reporter: Arc<dyn StatusReporter>,
) -> Option<Box<dyn Resolver>>
where
    C: DirectoryClient + 'static,
    S: CredentialStore + 'static,
{
    let scope = match name {
        "users_search" => SearchScope::Users,
        "commits_search" => SearchScope::Commits,
        _ => return None,
    };
    Some(Box::new(EmailSearch::new(scope, session, reporter)))
}
