//! API route handlers, one module per resource

pub mod auth;
pub mod health;
pub mod locations;
pub mod properties;
pub mod property_types;
pub mod uploads;
