//! Subcommand dispatch

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use email2github_core::{
    build_resolver, establish, CredentialPrompt, CredentialStore, FileCredentialStore,
    GitHubClient, ResolutionPipeline, Session, StatusLine, StatusReporter, TracingReporter,
};

use crate::config::{Command, Settings};
use crate::console::{render_result, ConsoleReporter};
use crate::emails;
use crate::prompt::TerminalPrompt;

/// How many times a credential is asked for before giving up
const CONFIGURE_ATTEMPTS: usize = 3;

const CLEANUP_LABEL: &str = "Cleaning the cached authentication file:";

type GitHubSession = Session<GitHubClient, FileCredentialStore>;

pub struct App {
    settings: Settings,
    console: ConsoleReporter,
    reporter: Arc<dyn StatusReporter>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        use std::io::IsTerminal;

        let console = ConsoleReporter::new(settings.output.color);
        // Piped stdout carries results only; status goes to the log
        let reporter: Arc<dyn StatusReporter> = if std::io::stdout().is_terminal() {
            Arc::new(console)
        } else {
            Arc::new(TracingReporter)
        };
        Self {
            settings,
            console,
            reporter,
        }
    }

    /// Run one subcommand to completion
    pub async fn run(&self, command: &Command) -> Result<()> {
        match command {
            Command::Configure => self.configure().await,
            Command::Resolve {
                emails,
                input,
                output,
                ..
            } => self.resolve(emails, input.as_ref(), output.as_ref()).await,
            Command::Logout => self.logout(),
        }
    }

    fn store(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.settings.credentials_path())
    }

    fn session(&self) -> GitHubSession {
        Session::new(
            GitHubClient::new(self.settings.github_config()),
            self.store(),
            self.settings.recovery_policy(),
            self.reporter.clone(),
        )
    }

    fn prompt(&self) -> TerminalPrompt {
        TerminalPrompt::new(self.settings.credentials.allow_login)
    }

    /// Replace the stored credential with a freshly entered one
    async fn configure(&self) -> Result<()> {
        let prompt = self.prompt();
        for attempt in 1..=CONFIGURE_ATTEMPTS {
            let session = self.session();
            let credential = prompt.prompt()?;
            session.configure(&credential)?;
            if session.authenticate().await {
                if let Some(principal) = session.principal() {
                    info!("Signed in as {}", principal.login);
                }
                debug!("Credential stored at {:?}", self.store().path());
                return Ok(());
            }
            debug!("Configure attempt {}/{} failed", attempt, CONFIGURE_ATTEMPTS);
        }
        anyhow::bail!("could not authenticate after {} attempts", CONFIGURE_ATTEMPTS)
    }

    async fn resolve(
        &self,
        args: &[String],
        input: Option<&PathBuf>,
        output: Option<&PathBuf>,
    ) -> Result<()> {
        let addresses = emails::collect_addresses(args, input.map(|p| p.as_path()))?;
        if addresses.is_empty() {
            info!("No email addresses to resolve");
            return Ok(());
        }

        let session = Arc::new(
            establish(|| self.session(), &self.prompt(), CONFIGURE_ATTEMPTS).await?,
        );

        let mut resolvers = Vec::new();
        for name in &self.settings.resolve.techniques {
            let resolver = build_resolver(name, session.clone(), self.reporter.clone())
                .with_context(|| format!("Unknown technique {:?}", name))?;
            resolvers.push(resolver);
        }
        let pipeline = ResolutionPipeline::new(resolvers);
        debug!("Techniques: {}", pipeline.techniques().join(", "));

        let mut identities = emails::identities(&addresses);
        let unresolved = pipeline.run(&mut identities).await?.len();
        info!(
            "Resolved {}/{} addresses",
            identities.len() - unresolved,
            identities.len()
        );

        for identity in &identities {
            println!("{}", render_result(identity, self.console.color()));
        }
        if let Some(path) = output {
            emails::write_results(path, &identities)?;
            info!("Wrote results to {:?}", path);
        }
        Ok(())
    }

    /// Delete the stored credential
    fn logout(&self) -> Result<()> {
        let store = self.store();
        match store.delete() {
            Ok(()) => {
                self.reporter.report(StatusLine::done(CLEANUP_LABEL));
                Ok(())
            }
            Err(e) => {
                self.reporter.report(StatusLine::fail(CLEANUP_LABEL, Some(e.to_string())));
                Err(e.into())
            }
        }
    }
}
