//! Signage Engine - Orchestration layer
//!
//! Runs layout and application commands against a SQLite connection. Every
//! mutating command is one unit of work: the whole cascade commits together
//! or not at all.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
pub use commands::EngineConfig;
