use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod init;
pub mod sample;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Create the catalog database
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
        /// Add a few demo products
        #[arg(long, action, default_value = "false")]
        seed: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Print random products from the catalog
    Sample {
        #[arg(long, default_value = "3")]
        count: usize,
    },
    /// Talk to a running server from the terminal
    Chat {
        /// Base URL of the server, overrides STOREFRONT_API_URL
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db, seed }) => {
            init::run(db, seed, &config).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Sample { count }) => {
            sample::run(count, &config).await?;
        }
        Some(Command::Chat { url }) => {
            let url = url.unwrap_or_else(|| config.api_url.clone());
            chat::run(&url).await?;
        }
        None => {}
    }

    Ok(())
}
