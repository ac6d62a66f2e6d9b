//! housesadda-server: HTTP API for the Houses Adda listings site
//!
//! Property listings, controlled vocabularies (locations, property types),
//! admin authentication, and image uploads over a single PostgreSQL store.

pub mod db;
pub mod http;
pub mod models;
pub mod storage;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use storage::UploadStore;
