//! Engine-level action commands

use crate::commands::application::{authorize_request, register_application, RegisteredApplication};
use crate::commands::layout::{
    add_region, copy_layout, create_layout, delete_layout_by_id, set_layout_owner, NewLayout,
};
use crate::commands::EngineConfig;
use rusqlite::Connection;
use signage_core::oauth::{AuthParams, AuthorizationDecision};
use signage_core::{Layout, Region};
use signage_core_types::RequestContext;
use signage_store::errors::Result;

/// Commands that write to the store
#[derive(Debug, Clone)]
pub enum EngineCommand {
    LayoutCreate(NewLayout),
    LayoutCopy {
        layout_id: i64,
        name: String,
    },
    LayoutDelete {
        layout_id: i64,
    },
    LayoutSetOwner {
        layout_id: i64,
        owner_id: i64,
    },
    LayoutAddRegion {
        layout_id: i64,
        region: Region,
    },
    ApplicationAdd {
        name: String,
        redirect_uri: String,
    },
    /// Approve or deny an authorization request for a user
    ApplicationAuthorize {
        decision: AuthorizationDecision,
        user_id: i64,
        request: AuthParams,
    },
}

/// Result of applying an engine command
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Layout(Layout),
    LayoutDeleted { layout_id: i64 },
    Application(RegisteredApplication),
    /// URI the user agent is sent to
    Redirect(String),
}

/// Apply one command as a single unit of work
///
/// # Errors
/// Whatever the underlying command reports, tagged with the request id.
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::LayoutCreate(new_layout) => {
            create_layout(conn, ctx, config, new_layout).map(EngineCommandResult::Layout)
        }
        EngineCommand::LayoutCopy { layout_id, name } => {
            copy_layout(conn, ctx, config, layout_id, &name).map(EngineCommandResult::Layout)
        }
        EngineCommand::LayoutDelete { layout_id } => {
            delete_layout_by_id(conn, ctx, config, layout_id)?;
            Ok(EngineCommandResult::LayoutDeleted { layout_id })
        }
        EngineCommand::LayoutSetOwner {
            layout_id,
            owner_id,
        } => set_layout_owner(conn, ctx, config, layout_id, owner_id)
            .map(EngineCommandResult::Layout),
        EngineCommand::LayoutAddRegion { layout_id, region } => {
            add_region(conn, ctx, config, layout_id, region).map(EngineCommandResult::Layout)
        }
        EngineCommand::ApplicationAdd { name, redirect_uri } => {
            register_application(conn, ctx, &name, &redirect_uri)
                .map(EngineCommandResult::Application)
        }
        EngineCommand::ApplicationAuthorize {
            decision,
            user_id,
            request,
        } => authorize_request(conn, ctx, decision, user_id, &request)
            .map(EngineCommandResult::Redirect),
    }
}
