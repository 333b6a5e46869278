//! Wishbox CLI - Database migrations and seed data.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! wishbox-cli migrate
//!
//! # Seed a demo wishlist for a fresh random owner
//! wishbox-cli seed
//!
//! # Seed a demo wishlist for a specific owner
//! wishbox-cli seed --owner 7cf1f4f2-5be4-4f26-9b2e-2f0e6f8b1a11
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert a demo wishlist with a few items

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "wishbox-cli")]
#[command(author, version, about = "Wishbox CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed a demo wishlist
    Seed {
        /// Owner UUID the wishlist belongs to; random when omitted
        #[arg(short, long)]
        owner: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { owner } => {
            commands::seed::demo(owner.unwrap_or_else(Uuid::new_v4)).await?;
        }
    }
    Ok(())
}
