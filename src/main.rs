//! Main entry point for the DeepL CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deepl_client::cli::commands::{self, Commands};
use deepl_client::ClientConfig;

/// DeepL CLI - translate text from the command line
#[derive(Parser, Debug)]
#[command(name = "deepl", version, about, long_about = None)]
struct Args {
    /// DeepL auth key (optional, defaults to DEEPL_AUTH_KEY env var)
    #[arg(long)]
    auth_key: Option<String>,

    /// API base URL (optional, defaults to DEEPL_BASE_URL env var or the pro endpoint)
    #[arg(long)]
    base_url: Option<String>,

    /// Abort the request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Args {
    fn client_config(&self) -> deepl_client::Result<ClientConfig> {
        ClientConfig::resolve(self.auth_key.clone(), self.base_url.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("deepl={},deepl_client={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.client_config();
    let timeout = args.timeout_secs.map(Duration::from_secs);

    match args.command {
        Some(Commands::Translate(translate)) => {
            commands::handle_translate(config?, timeout, translate).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages();
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
