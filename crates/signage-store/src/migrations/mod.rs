//! Schema migrations
//!
//! Each migration runs once in its own transaction. The SQL checksum is
//! recorded, and a database whose recorded checksum no longer matches the
//! embedded SQL is refused.

mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
