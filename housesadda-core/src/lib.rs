//! housesadda-core: shared building blocks for the Houses Adda services
//!
//! Holds the pieces both the API server and the CLI need: typed
//! environment configuration, admin session tokens, and password hashing.

pub mod auth;
pub mod config;
pub mod error;

pub use auth::{hash_password, verify_password, Claims, JwtManager};
pub use config::AppConfig;
pub use error::{CoreError, Result};
