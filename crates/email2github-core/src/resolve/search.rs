//! Email search techniques backed by the directory's search API.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use super::{PassOutcome, ResolveError, Resolver};
use crate::credentials::CredentialStore;
use crate::directory::DirectoryClient;
use crate::identity::Identity;
use crate::session::{LookupOutcome, Session, SessionError};
use crate::status::{StatusLine, StatusReporter};

const RATE_LIMIT_REASON: &str = "Github API rate limit";

/// What an [`EmailSearch`] searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Accounts whose public profile email matches
    Users,
    /// Accounts linked to public commits authored with the email
    Commits,
}

impl SearchScope {
    /// Technique name
    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users_search",
            Self::Commits => "commits_search",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Users => "Searching email addresses:",
            Self::Commits => "Searching commit authors:",
        }
    }
}

/// Looks up each identity, one request at a time, through the shared session
pub struct EmailSearch<C: DirectoryClient, S: CredentialStore> {
    scope: SearchScope,
    session: Arc<Session<C, S>>,
    reporter: Arc<dyn StatusReporter>,
}

impl<C: DirectoryClient, S: CredentialStore> EmailSearch<C, S> {
    pub fn new(
        scope: SearchScope,
        session: Arc<Session<C, S>>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            scope,
            session,
            reporter,
        }
    }

    async fn lookup(&self, address: &str) -> Result<LookupOutcome, SessionError> {
        match self.scope {
            SearchScope::Users => self.session.lookup_account_by_email(address).await,
            SearchScope::Commits => self.session.lookup_commit_author(address).await,
        }
    }

    async fn run(&self, batch: Vec<&mut Identity>) -> Result<PassOutcome, ResolveError> {
        let label = self.scope.label();
        let mut resolved = 0;

        for identity in batch {
            let outcome = match self.lookup(identity.address()).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_fatal() => return Err(ResolveError::SessionUnavailable),
                Err(e) => {
                    warn!("{} lookup failed for {}: {}", self.scope.name(), identity.address(), e);
                    let reason = e.to_string();
                    self.reporter.report(StatusLine::fail(label, Some(reason.clone())));
                    return Ok(PassOutcome::Interrupted { resolved, reason });
                }
            };

            match outcome {
                LookupOutcome::Found(account) => {
                    debug!("{} -> {}", identity.address(), account.login);
                    if identity.resolve(account) {
                        resolved += 1;
                    }
                }
                LookupOutcome::NotFound => debug!("{}: no match", identity.address()),
                LookupOutcome::RateLimited(limit) => {
                    match limit.reset_at {
                        Some(reset) => warn!("Rate limited until {}", reset),
                        None => warn!("Rate limited"),
                    }
                    self.reporter.report(StatusLine::fail(
                        label,
                        Some(RATE_LIMIT_REASON.to_string()),
                    ));
                    return Ok(PassOutcome::Interrupted {
                        resolved,
                        reason: RATE_LIMIT_REASON.to_string(),
                    });
                }
            }
        }

        self.reporter.report(StatusLine::done(label));
        Ok(PassOutcome::Completed { resolved })
    }
}

impl<C, S> Resolver for EmailSearch<C, S>
where
    C: DirectoryClient + 'static,
    S: CredentialStore + 'static,
{
    fn name(&self) -> &str {
        self.scope.name()
    }

    fn resolve<'a>(
        &'a self,
        batch: Vec<&'a mut Identity>,
    ) -> BoxFuture<'a, Result<PassOutcome, ResolveError>> {
        Box::pin(self.run(batch))
    }
}
