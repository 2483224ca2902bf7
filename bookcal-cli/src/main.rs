mod client;
mod commands;
mod config;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::BooksterClient;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "bookcal")]
#[command(about = "Generate guest-calendar .ics feeds from Bookster bookings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch bookings and write one .ics feed per property
    Generate {
        /// Property id to generate a feed for (repeatable)
        #[arg(short, long = "property", required = true)]
        properties: Vec<String>,

        /// Output directory for the .ics files and the index page
        #[arg(short, long, default_value = "public")]
        out: PathBuf,

        /// One event per occupied day (IN/OUT markers) instead of one per stay
        #[arg(long)]
        split_days: bool,
    },
    /// Fetch one property's bookings and print the feed to stdout
    Preview {
        /// Property id to preview
        #[arg(short, long)]
        property: String,

        /// One event per occupied day (IN/OUT markers) instead of one per stay
        #[arg(long)]
        split_days: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_api_key()?;
    let client = BooksterClient::new(config.api.clone())?;

    match cli.command {
        Commands::Generate {
            properties,
            out,
            split_days,
        } => commands::generate::run(&client, &config, &properties, &out, split_days).await,
        Commands::Preview {
            property,
            split_days,
        } => commands::preview::run(&client, &config, &property, split_days).await,
    }
}
