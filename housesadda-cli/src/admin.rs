//! `admin-init` subcommand
//!
//! Bootstraps the back-office: creates the admin account, or resets its
//! password when the username already exists.

use anyhow::{Context, Result};
use clap::Parser;

use housesadda_core::hash_password;
use housesadda_server::db::repos::AdminUserRepo;
use housesadda_server::db::{create_pool, migrations};

#[derive(Parser, Debug)]
pub struct AdminInitArgs {
    /// Admin username
    #[arg(long)]
    pub username: String,

    /// Admin password (consider passing via an environment-expanded value)
    #[arg(long, env = "ADMIN_PASSWORD")]
    pub password: String,
}

pub async fn run(args: AdminInitArgs) -> Result<()> {
    let username = args.username.trim();
    anyhow::ensure!(!username.is_empty(), "username must not be empty");
    anyhow::ensure!(
        args.password.len() >= 8,
        "password must be at least 8 characters"
    );

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

    let pool = create_pool(&database_url)
        .await
        .context("could not connect to database")?;
    migrations::run(&pool).await.context("migrations failed")?;

    let password_hash = hash_password(&args.password)?;
    let user = AdminUserRepo::new(&pool)
        .upsert(username, &password_hash)
        .await?;

    tracing::info!(username = %user.username, "admin user ready");
    Ok(())
}
