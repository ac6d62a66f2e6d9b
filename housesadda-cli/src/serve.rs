//! `serve` and `migrate` subcommands

use anyhow::{Context, Result};
use clap::Parser;

use housesadda_core::{AppConfig, JwtManager};
use housesadda_server::db::{create_pool, migrations};
use housesadda_server::{AppState, ServerConfig, UploadStore};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override the port from configuration
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let pool = create_pool(&config.database_url)
        .await
        .context("could not connect to database")?;
    migrations::run(&pool).await.context("migrations failed")?;

    let mut bind_addr = config.bind_addr;
    if let Some(port) = args.port {
        bind_addr.set_port(port);
    }

    let state = AppState {
        pool,
        jwt: JwtManager::new(&config.jwt_secret, config.token_ttl_secs),
        uploads: UploadStore::new(&config.upload_root),
    };

    housesadda_server::run_server(state, ServerConfig { bind_addr }).await?;
    Ok(())
}

pub async fn migrate() -> Result<()> {
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

    let pool = create_pool(&database_url)
        .await
        .context("could not connect to database")?;
    migrations::run(&pool).await.context("migrations failed")?;

    tracing::info!("migrations applied");
    Ok(())
}
