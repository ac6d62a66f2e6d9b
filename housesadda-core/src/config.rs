//! Environment-backed configuration.
//!
//! Every deployment knob comes from environment variables (a `.env` file is
//! loaded by the CLI before this runs). Missing required keys surface as
//! `CoreError::Config`, never a panic: handlers report them as 500
//! configuration errors, the CLI as a startup failure.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_ROOT: &str = "uploads";

/// Admin tokens live for 24 hours.
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Centralized configuration for the Houses Adda services
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string (`DATABASE_URL`, required)
    pub database_url: String,
    /// HS256 signing secret for admin tokens (`JWT_SECRET`, required)
    pub jwt_secret: String,
    /// Address the HTTP server binds to (`HOST`/`PORT`)
    pub bind_addr: SocketAddr,
    /// Directory uploaded files are written to (`UPLOAD_ROOT`)
    pub upload_root: PathBuf,
    /// Token lifetime in seconds (`TOKEN_TTL_SECS`)
    pub token_ttl_secs: i64,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests supply a closure instead of
    /// mutating process-global environment state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = required(&get, "DATABASE_URL")?;
        let jwt_secret = required(&get, "JWT_SECRET")?;

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| CoreError::config(format!("PORT is not a valid port: '{raw}'")))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| CoreError::config(format!("HOST is not a valid address: '{host}'")))?;

        let upload_root = get("UPLOAD_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_ROOT));

        let token_ttl_secs = match get("TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| {
                    CoreError::config(format!("TOKEN_TTL_SECS must be a positive number: '{raw}'"))
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            upload_root,
            token_ttl_secs,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CoreError::config(format!("{key} is not set"))),
    }
}
