use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use email2github::app::App;
use email2github::config::{Config, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate()?;

    // Run the subcommand
    let app = App::new(settings);
    app.run(&cli.command).await
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("email2github=debug,email2github_core=debug")
    } else {
        EnvFilter::new("email2github=info,email2github_core=info")
    };

    // Status lines and results own stdout
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
