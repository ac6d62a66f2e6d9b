//! housesadda CLI - run the Houses Adda listings API and manage the admin
//! account.
//!
//! Subcommands:
//! - `serve` — run migrations and start the HTTP API
//! - `migrate` — run migrations and exit
//! - `admin-init` — create the admin user or reset its password

use anyhow::Result;
use clap::{Parser, Subcommand};

mod admin;
mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "housesadda",
    author,
    version,
    about = "Houses Adda listings API server and admin tooling"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run database migrations and start the HTTP API
    Serve(serve::ServeArgs),
    /// Run database migrations and exit
    Migrate,
    /// Create the admin user, or reset its password if it already exists
    AdminInit(admin::AdminInitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Migrate => serve::migrate().await,
        Commands::AdminInit(args) => admin::run(args).await,
    }
}
