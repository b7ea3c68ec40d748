use std::sync::Arc;

use anyhow::Context;
use bookfinder_app::library::SystemClock;
use bookfinder_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// BookFinder: books, members and loans over HTTP
#[derive(Debug, Parser)]
#[command(name = "bookfinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi,
    /// Print the effective settings
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings =
        Settings::load().with_context(|| "failed to load BookFinder settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            bookfinder_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "bookfinder serve");
            bookfinder_app::serve(settings).await
        }
        Command::Openapi => {
            let library = bookfinder_app::build_library(&settings, Arc::new(SystemClock));
            let registry = bookfinder_app::build_registry(&library)?;
            let spec = bookfinder_http::openapi::merged_spec(&registry);
            println!("{}", serde_json::to_string_pretty(&spec)?);
            Ok(())
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
