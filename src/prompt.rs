//! Interactive credential entry

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use email2github_core::{Credential, CredentialPrompt};

/// Asks for a credential on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt {
    /// Offer login/password in addition to tokens
    pub allow_login: bool,
}

impl TerminalPrompt {
    pub fn new(allow_login: bool) -> Self {
        Self { allow_login }
    }

    fn prompt_token(&self) -> Result<Credential> {
        let token = Password::new()
            .with_prompt("GitHub personal access token")
            .interact()?;
        Ok(Credential::Token {
            token: token.trim().to_string(),
        })
    }

    fn prompt_login(&self) -> Result<Credential> {
        let login: String = Input::new().with_prompt("GitHub login").interact_text()?;
        let password = Password::new().with_prompt("Password").interact()?;
        Ok(Credential::Login {
            login: login.trim().to_string(),
            password,
        })
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn prompt(&self) -> Result<Credential> {
        if !self.allow_login {
            return self.prompt_token();
        }
        let choice = Select::new()
            .with_prompt("Authentication method")
            .items(&["Personal access token", "Login and password"])
            .default(0)
            .interact()?;
        match choice {
            0 => self.prompt_token(),
            _ => self.prompt_login(),
        }
    }
}
