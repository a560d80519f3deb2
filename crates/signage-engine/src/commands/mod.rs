//! Command orchestration layer.
//!
//! Layout and application commands coordinate the core lifecycle with the
//! SQLite store inside one transaction each.

pub mod application;
pub mod engine_command;
pub mod engine_query;
pub mod layout;
pub mod unit_of_work;

use signage_core::DEFAULT_FALLBACK_LAYOUT_ID;
use signage_core::ExError;
use signage_core_types::RequestContext;

/// Settings shared by every engine command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Layout that displays are moved to when their default layout is deleted
    pub fallback_layout_id: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_layout_id: DEFAULT_FALLBACK_LAYOUT_ID,
        }
    }
}

/// Attach the request's correlation ids to a failed result
pub(crate) fn with_context<T>(ctx: &RequestContext, result: Result<T, ExError>) -> Result<T, ExError> {
    result.map_err(|err| {
        let err = err.with_request_id(ctx.request_id.clone());
        match &ctx.trace_id {
            Some(trace_id) => err.with_trace_id(trace_id.clone()),
            None => err,
        }
    })
}
