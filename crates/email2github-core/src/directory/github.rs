//! GitHub REST API implementation of the directory traits.
//!
//! Requests are made with a blocking `ureq` agent on tokio's blocking pool,
//! one request at a time.

use std::time::Duration;

use base64::Engine;
use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Account, RateLimit, Repository, ServiceError};
use super::{DirectoryClient, DirectoryConnection};
use crate::credentials::Credential;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Connection settings for [`GitHubClient`]
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`
    pub api_url: String,
    /// Overall timeout per request
    pub timeout: Duration,
    /// Value of the `User-Agent` header (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("email2github/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubClient {
    agent: ureq::Agent,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a client from `config`
    pub fn new(config: GitHubConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            // Error statuses are classified from the response itself
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, config }
    }
}

impl DirectoryClient for GitHubClient {
    type Connection = GitHubConnection;

    async fn connect(&self, credential: &Credential) -> Result<GitHubConnection, ServiceError> {
        Ok(GitHubConnection {
            api: Api {
                agent: self.agent.clone(),
                base_url: self.config.api_url.trim_end_matches('/').to_string(),
                authorization: authorization_header(credential),
                user_agent: self.config.user_agent.clone(),
            },
        })
    }
}

/// Authenticated GitHub connection
pub struct GitHubConnection {
    api: Api,
}

impl DirectoryConnection for GitHubConnection {
    async fn principal(&self) -> Result<Account, ServiceError> {
        self.api.get_json("/user", Vec::new()).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<Account>, ServiceError> {
        let page: SearchPage<Account> = self
            .api
            .get_json("/search/users", search_params(query))
            .await?;
        Ok(page.items)
    }

    async fn search_commit_authors(&self, query: &str) -> Result<Vec<Account>, ServiceError> {
        let page: SearchPage<CommitItem> = self
            .api
            .get_json("/search/commits", search_params(query))
            .await?;
        Ok(page.items.into_iter().filter_map(|c| c.author).collect())
    }

    async fn create_repository(
        &self,
        name: &str,
        private: bool,
    ) -> Result<Repository, ServiceError> {
        let body = NewRepository {
            name: name.to_string(),
            private,
        };
        self.api.post_json("/user/repos", body).await
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository, ServiceError> {
        self.api
            .get_json(&format!("/repos/{}/{}", owner, name), Vec::new())
            .await
    }
}

/// Only the first match is ever used
fn search_params(query: &str) -> Vec<(&'static str, String)> {
    vec![("q", query.to_string()), ("per_page", "1".to_string())]
}

fn authorization_header(credential: &Credential) -> String {
    match credential {
        Credential::Token { token } => format!("Bearer {}", token),
        Credential::Login { login, password } => {
            let raw = format!("{}:{}", login, password);
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode(raw)
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    author: Option<Account>,
}

#[derive(Debug, Serialize)]
struct NewRepository {
    name: String,
    private: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Request plumbing shared by every call on a connection
#[derive(Clone)]
struct Api {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
    user_agent: String,
}

impl Api {
    async fn get_json<T>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, ServiceError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let api = self.clone();
        let url = format!("{}{}", self.base_url, path);
        run_blocking(move || {
            debug!("GET {}", url);
            let mut request = api
                .agent
                .get(&url)
                .header("Accept", ACCEPT)
                .header("X-GitHub-Api-Version", API_VERSION)
                .header("User-Agent", api.user_agent.as_str())
                .header("Authorization", api.authorization.as_str());
            for (key, value) in query {
                request = request.query(key, value);
            }
            let response = request
                .call()
                .map_err(|e| ServiceError::Transport(e.to_string()))?;
            decode(response)
        })
        .await
    }

    async fn post_json<B, T>(&self, path: &str, body: B) -> Result<T, ServiceError>
    where
        B: Serialize + Send + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let api = self.clone();
        let url = format!("{}{}", self.base_url, path);
        run_blocking(move || {
            debug!("POST {}", url);
            let response = api
                .agent
                .post(&url)
                .header("Accept", ACCEPT)
                .header("X-GitHub-Api-Version", API_VERSION)
                .header("User-Agent", api.user_agent.as_str())
                .header("Authorization", api.authorization.as_str())
                .send_json(&body)
                .map_err(|e| ServiceError::Transport(e.to_string()))?;
            decode(response)
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Transport(format!("request task failed: {}", e)))?
}

fn decode<T: DeserializeOwned>(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<T, ServiceError> {
    let status = response.status().as_u16();
    if (200..300).contains(&status) {
        return response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| ServiceError::Decode(e.to_string()));
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let remaining = header("x-ratelimit-remaining");
    let reset = header("x-ratelimit-reset");
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Err(classify(status, remaining.as_deref(), reset.as_deref(), &body))
}

/// Map an error response onto a [`ServiceError`]
fn classify(status: u16, remaining: Option<&str>, reset: Option<&str>, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .unwrap_or_default()
        .message
        .unwrap_or_else(|| format!("HTTP {}", status));

    match status {
        401 => ServiceError::InvalidCredentials,
        403 | 429
            if remaining == Some("0") || message.to_lowercase().contains("rate limit") =>
        {
            let reset_at = reset
                .and_then(|r| r.trim().parse::<i64>().ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0));
            ServiceError::RateLimited(RateLimit { reset_at })
        }
        404 => ServiceError::NotFound,
        _ => ServiceError::Api { status, message },
    }
}
