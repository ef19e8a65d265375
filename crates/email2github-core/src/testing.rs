//! Scripted in-memory directory service for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::credentials::Credential;
use crate::directory::{Account, DirectoryClient, DirectoryConnection, Repository, ServiceError};

/// The only token the fake accepts
pub(crate) const GOOD_TOKEN: &str = "good-token";

pub(crate) fn account(login: &str) -> Account {
    Account {
        id: login.bytes().map(u64::from).sum(),
        login: login.to_string(),
        html_url: format!("https://github.com/{}", login),
    }
}

pub(crate) fn token(value: &str) -> Credential {
    Credential::Token {
        token: value.to_string(),
    }
}

#[derive(Default)]
struct Script {
    principal_error: Option<ServiceError>,
    users: HashMap<String, Account>,
    commit_authors: HashMap<String, Account>,
    user_search_errors: HashMap<String, ServiceError>,
    commit_search_errors: HashMap<String, ServiceError>,
    calls: Vec<String>,
}

impl Script {
    fn search(
        &mut self,
        call: String,
        address: &str,
        commits: bool,
    ) -> Result<Vec<Account>, ServiceError> {
        self.calls.push(call);
        let (errors, table) = if commits {
            (&self.commit_search_errors, &self.commit_authors)
        } else {
            (&self.user_search_errors, &self.users)
        };
        if let Some(err) = errors.get(address) {
            return Err(err.clone());
        }
        Ok(table.get(address).cloned().into_iter().collect())
    }
}

/// Fake directory client; connections share its script and call log
#[derive(Clone, Default)]
pub(crate) struct FakeDirectory {
    script: Arc<Mutex<Script>>,
}

impl FakeDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `address` matches `login` in the user search
    pub(crate) fn with_user(self, address: &str, login: &str) -> Self {
        self.script
            .lock()
            .users
            .insert(address.to_string(), account(login));
        self
    }

    /// `address` matches `login` in the commit search
    pub(crate) fn with_commit_author(self, address: &str, login: &str) -> Self {
        self.script
            .lock()
            .commit_authors
            .insert(address.to_string(), account(login));
        self
    }

    /// User search for `address` fails with `err`
    pub(crate) fn with_search_error(self, address: &str, err: ServiceError) -> Self {
        self.script
            .lock()
            .user_search_errors
            .insert(address.to_string(), err);
        self
    }

    /// Commit search for `address` fails with `err`
    pub(crate) fn with_commit_search_error(self, address: &str, err: ServiceError) -> Self {
        self.script
            .lock()
            .commit_search_errors
            .insert(address.to_string(), err);
        self
    }

    /// Resolving the principal fails with `err`
    pub(crate) fn with_principal_error(self, err: ServiceError) -> Self {
        self.script.lock().principal_error = Some(err);
        self
    }

    /// Remote calls made so far, in order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.script.lock().calls.clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.script.lock().calls.push(call.into());
    }
}

impl DirectoryClient for FakeDirectory {
    type Connection = FakeConnection;

    async fn connect(&self, credential: &Credential) -> Result<FakeConnection, ServiceError> {
        self.record("connect");
        match credential {
            Credential::Token { token } if token == GOOD_TOKEN => Ok(FakeConnection {
                directory: self.clone(),
            }),
            _ => Err(ServiceError::InvalidCredentials),
        }
    }
}

pub(crate) struct FakeConnection {
    directory: FakeDirectory,
}

impl DirectoryConnection for FakeConnection {
    async fn principal(&self) -> Result<Account, ServiceError> {
        let mut script = self.directory.script.lock();
        script.calls.push("principal".to_string());
        match &script.principal_error {
            Some(err) => Err(err.clone()),
            None => Ok(account("tester")),
        }
    }

    async fn search_users(&self, query: &str) -> Result<Vec<Account>, ServiceError> {
        let address = query.trim_end_matches(" in:email");
        self.directory
            .script
            .lock()
            .search(format!("search_users:{}", query), address, false)
    }

    async fn search_commit_authors(&self, query: &str) -> Result<Vec<Account>, ServiceError> {
        let address = query.trim_start_matches("author-email:");
        self.directory
            .script
            .lock()
            .search(format!("search_commits:{}", query), address, true)
    }

    async fn create_repository(
        &self,
        name: &str,
        private: bool,
    ) -> Result<Repository, ServiceError> {
        self.directory.record(format!("create_repository:{}", name));
        Ok(Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("tester/{}", name),
            private,
            html_url: format!("https://github.com/tester/{}", name),
        })
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository, ServiceError> {
        self.directory
            .record(format!("get_repository:{}/{}", owner, name));
        Ok(Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            private: true,
            html_url: format!("https://github.com/{}/{}", owner, name),
        })
    }
}
