mod settings;

pub use settings::{
    Command, Config, CredentialSettings, GitHubSettings, OutputSettings, ResolveSettings,
    SessionSettings, Settings,
};
