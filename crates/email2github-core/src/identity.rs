//! Email identities under resolution.

use serde::Serialize;

use crate::directory::Account;

/// An email address paired with the account it resolved to, if any.
///
/// The address never changes after creation. The account is set at most once;
/// an identity counts as resolved exactly when it holds an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    address: String,
    account: Option<Account>,
}

impl Identity {
    /// Create an unresolved identity for `address`
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            account: None,
        }
    }

    /// The email address being resolved
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The matched account, once resolved
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Whether a matching account has been found
    pub fn is_resolved(&self) -> bool {
        self.account.is_some()
    }

    /// Attach the matched account.
    ///
    /// Returns `false` and leaves the identity untouched if it was already
    /// resolved.
    pub fn resolve(&mut self, account: Account) -> bool {
        if self.account.is_some() {
            return false;
        }
        self.account = Some(account);
        true
    }
}
