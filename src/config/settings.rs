use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use email2github_core::{GitHubConfig, RecoveryPolicy, TECHNIQUES};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve email addresses to GitHub accounts")]
pub struct Config {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// GitHub API root (e.g. https://ghe.example.com/api/v3)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Location of the stored credential
    #[arg(long, global = true)]
    pub auth_file: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store a GitHub credential and check that it works
    Configure,
    /// Resolve email addresses to GitHub accounts
    Resolve {
        /// Email addresses to resolve
        emails: Vec<String>,

        /// File with one email address per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write results as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Techniques to run, in order (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        techniques: Vec<String>,
    },
    /// Delete the stored credential
    Logout,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubSettings,

    /// Credential storage settings
    #[serde(default)]
    pub credentials: CredentialSettings,

    /// Session recovery settings
    #[serde(default)]
    pub session: SessionSettings,

    /// Resolution settings
    #[serde(default)]
    pub resolve: ResolveSettings,

    /// Console output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// API root URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Credential storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialSettings {
    /// Credential file (default: `<config dir>/email2github/auth.json`)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Offer login/password sign-in (self-hosted instances only;
    /// github.com accepts tokens only)
    #[serde(default)]
    pub allow_login: bool,
}

/// Session recovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Delete the stored credential on any sign-in error, not only when
    /// GitHub rejects it
    #[serde(default = "default_wipe_on_service_error")]
    pub wipe_on_service_error: bool,
}

fn default_wipe_on_service_error() -> bool {
    true
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            wipe_on_service_error: default_wipe_on_service_error(),
        }
    }
}

/// Resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveSettings {
    /// Techniques to run, in order
    #[serde(default = "default_techniques")]
    pub techniques: Vec<String>,
}

fn default_techniques() -> Vec<String> {
    TECHNIQUES.iter().map(|t| t.to_string()).collect()
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            techniques: default_techniques(),
        }
    }
}

/// Console output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable color output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {:?}", p))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", p));
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("email2github/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/email2github/config.toml")),
            dirs::home_dir().map(|p| p.join(".email2github.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path));
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(api_url) = &cli.api_url {
            self.github.api_url = api_url.clone();
        }
        if let Some(auth_file) = &cli.auth_file {
            self.credentials.path = Some(auth_file.clone());
        }
        if let Command::Resolve { techniques, .. } = &cli.command {
            if !techniques.is_empty() {
                self.resolve.techniques = techniques.clone();
            }
        }
    }

    /// Validate and normalize settings values
    ///
    /// Unknown technique names are an error; an empty technique list falls
    /// back to the default order.
    pub fn validate(&mut self) -> Result<()> {
        const MIN_TIMEOUT_SECS: u64 = 1;

        if self.github.timeout_secs < MIN_TIMEOUT_SECS {
            self.github.timeout_secs = MIN_TIMEOUT_SECS;
        }
        if self.resolve.techniques.is_empty() {
            self.resolve.techniques = default_techniques();
        }
        for name in &self.resolve.techniques {
            if !TECHNIQUES.contains(&name.as_str()) {
                anyhow::bail!(
                    "Unknown technique {:?} (available: {})",
                    name,
                    TECHNIQUES.join(", ")
                );
            }
        }
        Ok(())
    }

    /// Where the credential record lives
    pub fn credentials_path(&self) -> PathBuf {
        if let Some(path) = &self.credentials.path {
            return path.clone();
        }
        dirs::config_dir()
            .map(|p| p.join("email2github").join("auth.json"))
            .unwrap_or_else(|| PathBuf::from("tmp/auth.json"))
    }

    /// Client configuration for the GitHub API
    pub fn github_config(&self) -> GitHubConfig {
        let mut config = GitHubConfig {
            api_url: self.github.api_url.clone(),
            timeout: Duration::from_secs(self.github.timeout_secs),
            ..GitHubConfig::default()
        };
        if let Some(user_agent) = &self.github.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }

    /// What to do with the credential after a failed sign-in
    pub fn recovery_policy(&self) -> RecoveryPolicy {
        if self.session.wipe_on_service_error {
            RecoveryPolicy::WipeOnAnyError
        } else {
            RecoveryPolicy::WipeOnRejectionOnly
        }
    }
}
