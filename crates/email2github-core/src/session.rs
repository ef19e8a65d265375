//! Authenticated session with the directory service.
//!
//! The session owns the only connection to the service and gates every remote
//! operation behind a lazy, memoized authentication:
//!
//! ```text
//! Unconfigured --configure--> Configured --authenticate ok--> Authenticated
//!                                  |
//!                                  +--rejected--> Rejected (credential record deleted)
//! ```
//!
//! `Authenticated` and `Rejected` are terminal for a session instance. After a
//! rejection the caller configures a new credential and builds a new session.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::credentials::{Credential, CredentialError, CredentialPrompt, CredentialStore};
use crate::directory::{
    Account, DirectoryClient, DirectoryConnection, RateLimit, Repository, ServiceError,
};
use crate::status::{StatusLine, StatusReporter};

const SIGN_IN_LABEL: &str = "Signing in to Github:";
const CLEANUP_LABEL: &str = "Cleaning the cached authentication file:";

/// Credential lifecycle state of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// No credential record exists
    Unconfigured,
    /// A credential record exists but has not been used yet
    Configured,
    /// Signed in; the principal is known
    Authenticated,
    /// The service refused the credential and the record was deleted
    Rejected,
}

/// What to do with the credential record when sign-in fails for a reason
/// other than a recognized credential rejection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Delete the record on any sign-in error
    #[default]
    WipeOnAnyError,
    /// Delete the record only when the service rejects the credential;
    /// keep it (and stay `Configured`) on transport or service errors
    WipeOnRejectionOnly,
}

/// Result of a single account lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// First matching account
    Found(Account),
    /// No account matches
    NotFound,
    /// The service refused the query because the quota is exhausted
    RateLimited(RateLimit),
}

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication failed, so no remote operation can proceed
    #[error("not authenticated with the directory service")]
    NotAuthenticated,

    /// The credential was rejected earlier in this session
    #[error("credential was rejected; configure a new one")]
    Rejected,

    /// The session is already signed in
    #[error("session is already authenticated")]
    AlreadyAuthenticated,

    /// The credential store failed
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// The remote service failed
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SessionError {
    /// Whether the whole run must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

enum State<T> {
    Unconfigured,
    Configured,
    Authenticated {
        connection: Arc<T>,
        principal: Account,
    },
    Rejected,
}

impl<T> State<T> {
    fn credential_state(&self) -> CredentialState {
        match self {
            Self::Unconfigured => CredentialState::Unconfigured,
            Self::Configured => CredentialState::Configured,
            Self::Authenticated { .. } => CredentialState::Authenticated,
            Self::Rejected => CredentialState::Rejected,
        }
    }
}

/// Session with the directory service, shared by every resolver of a run
pub struct Session<C: DirectoryClient, S: CredentialStore> {
    client: C,
    store: S,
    policy: RecoveryPolicy,
    reporter: Arc<dyn StatusReporter>,
    state: RwLock<State<C::Connection>>,
    /// Serializes sign-in so the reject-and-wipe transition happens once
    gate: tokio::sync::Mutex<()>,
}

impl<C: DirectoryClient, S: CredentialStore> Session<C, S> {
    /// Create a session. The initial state is `Configured` when the store
    /// already holds a record, `Unconfigured` otherwise.
    pub fn new(
        client: C,
        store: S,
        policy: RecoveryPolicy,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        let state = if store.exists() {
            State::Configured
        } else {
            State::Unconfigured
        };
        Self {
            client,
            store,
            policy,
            reporter,
            state: RwLock::new(state),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Whether a credential record exists. Never touches the network.
    pub fn is_configured(&self) -> bool {
        self.store.exists()
    }

    /// Whether the session is signed in
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), State::Authenticated { .. })
    }

    /// Current credential state
    pub fn state(&self) -> CredentialState {
        self.state.read().credential_state()
    }

    /// The signed-in account, once authenticated
    pub fn principal(&self) -> Option<Account> {
        match &*self.state.read() {
            State::Authenticated { principal, .. } => Some(principal.clone()),
            _ => None,
        }
    }

    /// Store a new credential record.
    ///
    /// Only valid before authentication; a rejected session stays rejected.
    pub fn configure(&self, credential: &Credential) -> Result<(), SessionError> {
        let mut state = self.state.write();
        match *state {
            State::Rejected => return Err(SessionError::Rejected),
            State::Authenticated { .. } => return Err(SessionError::AlreadyAuthenticated),
            State::Unconfigured | State::Configured => {}
        }
        self.store.write(credential)?;
        *state = State::Configured;
        info!("Configured {} credential", credential.method());
        Ok(())
    }

    /// Sign in with the stored credential.
    ///
    /// Returns `true` if the session is (or already was) authenticated. Every
    /// failure is reported on the status channel and answered with `false`:
    /// a rejected or unreadable credential is deleted and the session becomes
    /// `Rejected`; other service errors follow the [`RecoveryPolicy`].
    ///
    /// If the record cannot be deleted the session still becomes `Rejected`.
    /// The cleanup line reports the failure, and [`is_configured`] keeps
    /// returning `true` until the record is removed.
    ///
    /// [`is_configured`]: Self::is_configured
    pub async fn authenticate(&self) -> bool {
        let _gate = self.gate.lock().await;

        match self.state() {
            CredentialState::Authenticated => return true,
            CredentialState::Rejected => {
                debug!("Session was rejected; not retrying sign-in");
                return false;
            }
            CredentialState::Unconfigured | CredentialState::Configured => {}
        }

        if !self.is_configured() {
            debug!("No credential record; cannot authenticate");
            return false;
        }

        let credential = match self.store.read() {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Unreadable credential record: {}", e);
                self.reporter.report(StatusLine::error(e.to_string()));
                self.reject();
                return false;
            }
        };

        match self.sign_in(&credential).await {
            Ok((connection, principal)) => {
                info!("Authenticated as {}", principal.login);
                self.reporter.report(StatusLine::done(SIGN_IN_LABEL));
                *self.state.write() = State::Authenticated {
                    connection: Arc::new(connection),
                    principal,
                };
                true
            }
            Err(ServiceError::InvalidCredentials) => {
                warn!("Credential rejected by the directory service");
                self.reporter.report(StatusLine::fail(SIGN_IN_LABEL, None));
                self.reject();
                false
            }
            Err(e) => {
                warn!("Sign-in failed: {}", e);
                self.reporter.report(StatusLine::error(e.to_string()));
                match self.policy {
                    RecoveryPolicy::WipeOnAnyError => self.reject(),
                    RecoveryPolicy::WipeOnRejectionOnly => {
                        debug!("Keeping credential record after service error")
                    }
                }
                false
            }
        }
    }

    /// Find the first account whose public email matches `address`
    pub async fn lookup_account_by_email(
        &self,
        address: &str,
    ) -> Result<LookupOutcome, SessionError> {
        let connection = self.ensure_authenticated().await?;
        let query = format!("{} in:email", address);
        first_match(connection.search_users(&query).await)
    }

    /// Find the account linked to the first public commit authored by `address`
    pub async fn lookup_commit_author(
        &self,
        address: &str,
    ) -> Result<LookupOutcome, SessionError> {
        let connection = self.ensure_authenticated().await?;
        let query = format!("author-email:{}", address);
        first_match(connection.search_commit_authors(&query).await)
    }

    /// Create a repository owned by the signed-in account
    pub async fn create_repository(
        &self,
        name: &str,
        private: bool,
    ) -> Result<Repository, SessionError> {
        let connection = self.ensure_authenticated().await?;
        Ok(connection.create_repository(name, private).await?)
    }

    /// Fetch a repository owned by the signed-in account
    pub async fn get_repository(&self, name: &str) -> Result<Repository, SessionError> {
        let connection = self.ensure_authenticated().await?;
        let owner = self
            .principal()
            .map(|p| p.login)
            .ok_or(SessionError::NotAuthenticated)?;
        Ok(connection.get_repository(&owner, name).await?)
    }

    /// Gate for every remote operation: the live connection, authenticating
    /// first if needed. Failure is fatal for the caller.
    async fn ensure_authenticated(&self) -> Result<Arc<C::Connection>, SessionError> {
        if let Some(connection) = self.connection() {
            return Ok(connection);
        }
        if !self.authenticate().await {
            return Err(SessionError::NotAuthenticated);
        }
        self.connection().ok_or(SessionError::NotAuthenticated)
    }

    fn connection(&self) -> Option<Arc<C::Connection>> {
        match &*self.state.read() {
            State::Authenticated { connection, .. } => Some(Arc::clone(connection)),
            _ => None,
        }
    }

    async fn sign_in(
        &self,
        credential: &Credential,
    ) -> Result<(C::Connection, Account), ServiceError> {
        let connection = self.client.connect(credential).await?;
        let principal = connection.principal().await?;
        Ok((connection, principal))
    }

    /// Delete the credential record and enter `Rejected`, even when the
    /// delete fails
    fn reject(&self) {
        match self.store.delete() {
            Ok(()) => self.reporter.report(StatusLine::done(CLEANUP_LABEL)),
            Err(e) => {
                warn!("Failed to delete credential record: {}", e);
                self.reporter.report(StatusLine::fail(CLEANUP_LABEL, Some(e.to_string())));
            }
        }
        *self.state.write() = State::Rejected;
    }
}

/// Build sessions until one authenticates.
///
/// Whenever the store holds no record (first run, or after a rejection wiped
/// it) the user is prompted for a new credential. Gives up after `attempts`
/// sessions.
pub async fn establish<C, S, F>(
    mut new_session: F,
    prompt: &dyn CredentialPrompt,
    attempts: usize,
) -> anyhow::Result<Session<C, S>>
where
    C: DirectoryClient,
    S: CredentialStore,
    F: FnMut() -> Session<C, S>,
{
    for attempt in 1..=attempts {
        let session = new_session();
        if !session.is_configured() {
            let credential = prompt.prompt()?;
            session.configure(&credential)?;
        }
        if session.authenticate().await {
            return Ok(session);
        }
        debug!("Authentication attempt {}/{} failed", attempt, attempts);
    }
    anyhow::bail!("could not authenticate after {} attempts", attempts)
}

fn first_match(result: Result<Vec<Account>, ServiceError>) -> Result<LookupOutcome, SessionError> {
    match result {
        Ok(accounts) => Ok(accounts
            .into_iter()
            .next()
            .map_or(LookupOutcome::NotFound, LookupOutcome::Found)),
        Err(ServiceError::RateLimited(limit)) => Ok(LookupOutcome::RateLimited(limit)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{FileCredentialStore, MemoryCredentialStore};
    use crate::status::{MemoryReporter, Outcome};
    use crate::testing::{account, token, FakeDirectory, GOOD_TOKEN};
    use pretty_assertions::assert_eq;

    fn session_with(
        fake: &FakeDirectory,
        store: MemoryCredentialStore,
        policy: RecoveryPolicy,
    ) -> (Session<FakeDirectory, MemoryCredentialStore>, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let session = Session::new(fake.clone(), store, policy, reporter.clone());
        (session, reporter)
    }

    fn configured(
        fake: &FakeDirectory,
        secret: &str,
    ) -> (Session<FakeDirectory, MemoryCredentialStore>, Arc<MemoryReporter>) {
        session_with(
            fake,
            MemoryCredentialStore::with_credential(token(secret)),
            RecoveryPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_authenticate_unconfigured_makes_no_remote_call() {
        let fake = FakeDirectory::new();
        let (session, _) =
            session_with(&fake, MemoryCredentialStore::new(), RecoveryPolicy::default());

        assert!(!session.is_configured());
        assert!(!session.authenticate().await);
        assert_eq!(session.state(), CredentialState::Unconfigured);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_success_is_memoized() {
        let fake = FakeDirectory::new();
        let (session, reporter) = configured(&fake, GOOD_TOKEN);
        assert_eq!(session.state(), CredentialState::Configured);

        assert!(session.authenticate().await);
        assert!(session.authenticate().await);

        assert!(session.is_authenticated());
        assert_eq!(session.state(), CredentialState::Authenticated);
        assert_eq!(session.principal().map(|p| p.login), Some("tester".to_string()));
        assert_eq!(fake.calls(), vec!["connect", "principal"]);
        assert_eq!(
            reporter.lines(),
            vec![StatusLine::done("Signing in to Github:")]
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials_delete_record() {
        let fake = FakeDirectory::new();
        let (session, reporter) = configured(&fake, "revoked-token");

        assert!(!session.authenticate().await);

        assert!(!session.is_configured());
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), CredentialState::Rejected);
        assert_eq!(
            reporter.lines(),
            vec![
                StatusLine::fail("Signing in to Github:", None),
                StatusLine::done("Cleaning the cached authentication file:"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_session_does_not_retry() {
        let fake = FakeDirectory::new();
        let store = MemoryCredentialStore::with_credential(token("revoked-token"));
        let (session, _) = session_with(&fake, store, RecoveryPolicy::default());
        assert!(!session.authenticate().await);

        assert!(matches!(
            session.configure(&token(GOOD_TOKEN)),
            Err(SessionError::Rejected)
        ));
        assert!(!session.authenticate().await);
        assert_eq!(fake.calls(), vec!["connect"]);
    }

    #[tokio::test]
    async fn test_service_error_deletes_record_by_default() {
        let fake = FakeDirectory::new().with_principal_error(ServiceError::Api {
            status: 500,
            message: "Server Error".to_string(),
        });
        let (session, reporter) = configured(&fake, GOOD_TOKEN);

        assert!(!session.authenticate().await);

        assert!(!session.is_configured());
        assert_eq!(session.state(), CredentialState::Rejected);
        assert_eq!(
            reporter.lines()[0].outcome,
            Outcome::Error("Server Error (HTTP 500)".to_string())
        );
    }

    #[tokio::test]
    async fn test_service_error_keeps_record_when_configured_to() {
        let fake = FakeDirectory::new()
            .with_principal_error(ServiceError::Transport("connection reset".to_string()));
        let (session, _) = session_with(
            &fake,
            MemoryCredentialStore::with_credential(token(GOOD_TOKEN)),
            RecoveryPolicy::WipeOnRejectionOnly,
        );

        assert!(!session.authenticate().await);

        assert!(session.is_configured());
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), CredentialState::Configured);
    }

    #[tokio::test]
    async fn test_rejected_at_sign_in_deletes_record_under_either_policy() {
        for policy in [RecoveryPolicy::WipeOnRejectionOnly, RecoveryPolicy::default()] {
            // GitHub accepts any token at connect time and refuses it on /user
            let fake = FakeDirectory::new().with_principal_error(ServiceError::InvalidCredentials);
            let (session, reporter) = session_with(
                &fake,
                MemoryCredentialStore::with_credential(token(GOOD_TOKEN)),
                policy,
            );

            assert!(!session.authenticate().await);

            assert!(!session.is_configured(), "{:?}", policy);
            assert_eq!(session.state(), CredentialState::Rejected);
            assert_eq!(
                reporter.lines(),
                vec![
                    StatusLine::fail("Signing in to Github:", None),
                    StatusLine::done("Cleaning the cached authentication file:"),
                ]
            );
            assert_eq!(fake.calls(), vec!["connect", "principal"]);
        }
    }

    /// Holds a record that cannot be deleted
    struct UndeletableStore(MemoryCredentialStore);

    impl CredentialStore for UndeletableStore {
        fn exists(&self) -> bool {
            self.0.exists()
        }

        fn read(&self) -> Result<Credential, CredentialError> {
            self.0.read()
        }

        fn write(&self, credential: &Credential) -> Result<(), CredentialError> {
            self.0.write(credential)
        }

        fn delete(&self) -> Result<(), CredentialError> {
            Err(CredentialError::Io {
                path: "auth.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[tokio::test]
    async fn test_failed_cleanup_still_rejects() {
        let fake = FakeDirectory::new();
        let reporter = Arc::new(MemoryReporter::new());
        let session = Session::new(
            fake.clone(),
            UndeletableStore(MemoryCredentialStore::with_credential(token("revoked-token"))),
            RecoveryPolicy::default(),
            reporter.clone(),
        );

        assert!(!session.authenticate().await);

        assert_eq!(session.state(), CredentialState::Rejected);
        assert!(session.is_configured());
        let lines = reporter.lines();
        assert_eq!(lines[1].label, "Cleaning the cached authentication file:");
        assert!(lines[1].is_failure());
        // A rejected session never signs in again, even with the record left behind
        assert!(!session.authenticate().await);
        assert_eq!(fake.calls(), vec!["connect"]);
    }

    #[tokio::test]
    async fn test_malformed_record_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, r#"{"method":"carrier-pigeon"}"#).unwrap();

        let fake = FakeDirectory::new();
        let reporter = Arc::new(MemoryReporter::new());
        let session = Session::new(
            fake.clone(),
            FileCredentialStore::new(&path),
            RecoveryPolicy::default(),
            reporter.clone(),
        );

        assert!(!session.authenticate().await);
        assert!(!path.exists());
        assert_eq!(session.state(), CredentialState::Rejected);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_configure_then_authenticate() {
        let fake = FakeDirectory::new();
        let (session, _) =
            session_with(&fake, MemoryCredentialStore::new(), RecoveryPolicy::default());

        session.configure(&token(GOOD_TOKEN)).unwrap();
        assert_eq!(session.state(), CredentialState::Configured);
        assert!(session.authenticate().await);

        assert!(matches!(
            session.configure(&token("other")),
            Err(SessionError::AlreadyAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_lookup_without_credentials_is_fatal() {
        let fake = FakeDirectory::new();
        let (session, _) =
            session_with(&fake, MemoryCredentialStore::new(), RecoveryPolicy::default());

        let err = session
            .lookup_account_by_email("octo@example.com")
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_authenticates_lazily() {
        let fake = FakeDirectory::new().with_user("octo@example.com", "octocat");
        let (session, _) = configured(&fake, GOOD_TOKEN);

        let outcome = session
            .lookup_account_by_email("octo@example.com")
            .await
            .unwrap();

        assert_eq!(outcome, LookupOutcome::Found(account("octocat")));
        assert!(session.is_authenticated());
        assert_eq!(
            fake.calls(),
            vec!["connect", "principal", "search_users:octo@example.com in:email"]
        );
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_not_found_and_rate_limit() {
        let fake = FakeDirectory::new().with_search_error(
            "busy@example.com",
            ServiceError::RateLimited(RateLimit::default()),
        );
        let (session, _) = configured(&fake, GOOD_TOKEN);

        assert_eq!(
            session.lookup_account_by_email("nobody@example.com").await.unwrap(),
            LookupOutcome::NotFound
        );
        assert_eq!(
            session.lookup_account_by_email("busy@example.com").await.unwrap(),
            LookupOutcome::RateLimited(RateLimit::default())
        );
    }

    #[tokio::test]
    async fn test_lookup_service_error_is_not_fatal() {
        let fake = FakeDirectory::new().with_commit_search_error(
            "broken@example.com",
            ServiceError::Api {
                status: 422,
                message: "Validation Failed".to_string(),
            },
        );
        let (session, _) = configured(&fake, GOOD_TOKEN);

        let err = session
            .lookup_commit_author("broken@example.com")
            .await
            .unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(err, SessionError::Service(ServiceError::Api { status: 422, .. })));
    }

    /// Hands out credentials in order
    struct ScriptedPrompt {
        answers: parking_lot::Mutex<Vec<Credential>>,
        asked: parking_lot::Mutex<usize>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: parking_lot::Mutex::new(answers.iter().rev().map(|a| token(a)).collect()),
                asked: parking_lot::Mutex::new(0),
            }
        }
    }

    impl CredentialPrompt for ScriptedPrompt {
        fn prompt(&self) -> anyhow::Result<Credential> {
            *self.asked.lock() += 1;
            self.answers
                .lock()
                .pop()
                .ok_or_else(|| anyhow::anyhow!("no more answers"))
        }
    }

    #[tokio::test]
    async fn test_establish_prompts_again_after_rejection() {
        let fake = FakeDirectory::new();
        let store = Arc::new(MemoryCredentialStore::new());
        let reporter: Arc<dyn StatusReporter> = Arc::new(MemoryReporter::new());
        let prompt = ScriptedPrompt::new(&["typo-token", GOOD_TOKEN]);

        let session = establish(
            || {
                Session::new(
                    fake.clone(),
                    store.clone(),
                    RecoveryPolicy::default(),
                    reporter.clone(),
                )
            },
            &prompt,
            3,
        )
        .await
        .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(*prompt.asked.lock(), 2);
        assert_eq!(store.read().unwrap(), token(GOOD_TOKEN));
    }

    #[tokio::test]
    async fn test_establish_uses_existing_record_without_prompting() {
        let fake = FakeDirectory::new();
        let store = Arc::new(MemoryCredentialStore::with_credential(token(GOOD_TOKEN)));
        let reporter: Arc<dyn StatusReporter> = Arc::new(MemoryReporter::new());
        let prompt = ScriptedPrompt::new(&[]);

        let session = establish(
            || {
                Session::new(
                    fake.clone(),
                    store.clone(),
                    RecoveryPolicy::default(),
                    reporter.clone(),
                )
            },
            &prompt,
            3,
        )
        .await
        .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(*prompt.asked.lock(), 0);
    }

    #[tokio::test]
    async fn test_establish_gives_up() {
        let fake = FakeDirectory::new();
        let store = Arc::new(MemoryCredentialStore::new());
        let reporter: Arc<dyn StatusReporter> = Arc::new(MemoryReporter::new());
        let prompt = ScriptedPrompt::new(&["a", "b", "c", "d"]);

        let result = establish(
            || {
                Session::new(
                    fake.clone(),
                    store.clone(),
                    RecoveryPolicy::default(),
                    reporter.clone(),
                )
            },
            &prompt,
            3,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(*prompt.asked.lock(), 3);
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn test_repository_operations_use_principal() {
        let fake = FakeDirectory::new();
        let (session, _) = configured(&fake, GOOD_TOKEN);

        let created = session.create_repository("scratch", true).await.unwrap();
        assert_eq!(created.full_name, "tester/scratch");
        assert!(created.private);

        let fetched = session.get_repository("scratch").await.unwrap();
        assert_eq!(fetched.full_name, "tester/scratch");
        assert_eq!(
            fake.calls(),
            vec![
                "connect",
                "principal",
                "create_repository:scratch",
                "get_repository:tester/scratch",
            ]
        );
    }
}
