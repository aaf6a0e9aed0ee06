use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Command-line entrypoint for the shelf book catalog service
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty catalog instead of the seed books
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;

    match cli.command {
        Command::Serve {
            host,
            port,
            no_seed,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if no_seed {
                settings.catalog.seed = false;
            }

            shelf_telemetry::init(&settings.telemetry)
                .with_context(|| "failed to initialize telemetry")?;
            tracing::info!(env = ?settings.environment, "shelf serve starting");

            shelf_app::run(settings).await
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
