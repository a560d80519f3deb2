pub mod application;
pub mod layout;

use rusqlite::Connection;
use signage_core_types::RequestContext;
use signage_engine::EngineConfig;

/// Everything a subcommand needs for one invocation
pub struct Session {
    pub conn: Connection,
    pub ctx: RequestContext,
    pub engine: EngineConfig,
}

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
