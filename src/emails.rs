//! Reading email addresses in and writing resolution results out

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use email2github_core::Identity;

/// Gather addresses from the command line and an optional input file.
///
/// Blank lines and `#` comments are skipped, entries without an `@` are
/// dropped with a warning, and duplicates (compared case-insensitively) keep
/// their first occurrence.
pub fn collect_addresses(args: &[String], input: Option<&Path>) -> Result<Vec<String>> {
    let mut raw: Vec<String> = args.to_vec();
    if let Some(path) = input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?;
        raw.extend(content.lines().map(str::to_string));
    }

    let mut seen = HashSet::new();
    let mut addresses = Vec::new();
    for entry in &raw {
        let entry = entry.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        if !entry.contains('@') {
            warn!("Skipping {:?}: not an email address", entry);
            continue;
        }
        if seen.insert(entry.to_lowercase()) {
            addresses.push(entry.to_string());
        }
    }
    Ok(addresses)
}

/// One unresolved identity per address
pub fn identities(addresses: &[String]) -> Vec<Identity> {
    addresses.iter().map(Identity::new).collect()
}

/// Serialized result for one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub email: String,
    pub login: Option<String>,
    pub url: Option<String>,
}

impl From<&Identity> for ResolutionRecord {
    fn from(identity: &Identity) -> Self {
        let account = identity.account();
        Self {
            email: identity.address().to_string(),
            login: account.map(|a| a.login.clone()),
            url: account.map(|a| a.html_url.clone()),
        }
    }
}

pub fn records(identities: &[Identity]) -> Vec<ResolutionRecord> {
    identities.iter().map(ResolutionRecord::from).collect()
}

/// Write results as a pretty-printed JSON array
pub fn write_results(path: &Path, identities: &[Identity]) -> Result<()> {
    let json = serde_json::to_string_pretty(&records(identities))?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write results to {:?}", path))
}
