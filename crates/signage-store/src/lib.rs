//! Signage Store - SQLite persistence for the signage domain
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - `SqliteGateway`, implementing every layout repository port
//! - OAuth client storage and the authorization-code issuing server

pub mod db;
pub mod errors;
pub mod migrations;
pub mod oauth;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use oauth::SqliteAuthCodeServer;
pub use repo::SqliteGateway;
