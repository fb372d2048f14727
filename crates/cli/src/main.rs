//! Driftline CLI - Database migrations and demo-data tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! dl-cli migrate
//!
//! # Replace demo data (counts optional)
//! dl-cli demo seed --users 3 --orders 5 --reviews 8
//!
//! # Show demo row counts
//! dl-cli demo stats
//!
//! # Mint a bearer token for manual API testing
//! dl-cli token issue -u demo-user-1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `demo seed` / `demo stats` - Manage synthetic data
//! - `token issue` - Sign a bearer token for a user id

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dl-cli")]
#[command(author, version, about = "Driftline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage demo data
    Demo {
        #[command(subcommand)]
        action: DemoAction,
    },
    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum DemoAction {
    /// Replace demo data with a freshly generated batch
    Seed {
        /// Number of demo users to create
        #[arg(long, default_value_t = 3)]
        users: u32,

        /// Number of demo orders to create
        #[arg(long, default_value_t = 5)]
        orders: u32,

        /// Number of demo reviews to create
        #[arg(long, default_value_t = 8)]
        reviews: u32,

        /// Skip creating the admin account
        #[arg(long)]
        no_admin: bool,
    },
    /// Show counts of demo rows and the last reset time
    Stats,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a bearer token for a user id
    Issue {
        /// User id to authenticate
        #[arg(short, long)]
        user_id: String,

        /// Token lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
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
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Demo { action } => match action {
            DemoAction::Seed {
                users,
                orders,
                reviews,
                no_admin,
            } => {
                commands::demo::seed(users, orders, reviews, !no_admin).await?;
            }
            DemoAction::Stats => commands::demo::stats().await?,
        },
        Commands::Token { action } => match action {
            TokenAction::Issue { user_id, ttl_hours } => {
                commands::token::issue(&user_id, ttl_hours)?;
            }
        },
    }
    Ok(())
}
