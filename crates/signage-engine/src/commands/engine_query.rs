//! Read-only engine queries

use crate::commands::application::list_applications;
use crate::commands::layout::{list_layouts, load_layout};
use crate::commands::EngineConfig;
use rusqlite::Connection;
use signage_core::oauth::{ApplicationPage, ApplicationQuery};
use signage_core::{Layout, LayoutFilter};
use signage_core_types::RequestContext;
use signage_store::errors::Result;

#[derive(Debug, Clone)]
pub enum EngineQuery {
    LayoutGet {
        layout_id: i64,
        load_playlists: bool,
    },
    LayoutList(LayoutFilter),
    ApplicationList(ApplicationQuery),
}

#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    Layout(Box<Layout>),
    Layouts(Vec<Layout>),
    Applications(ApplicationPage),
}

/// Run a query against a connection without opening a transaction
///
/// # Errors
/// * `NotFound` - the requested layout does not exist
/// * storage errors
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
) -> Result<EngineQueryResult> {
    match query {
        EngineQuery::LayoutGet {
            layout_id,
            load_playlists,
        } => load_layout(conn, ctx, config, layout_id, load_playlists)
            .map(|layout| EngineQueryResult::Layout(Box::new(layout))),
        EngineQuery::LayoutList(filter) => {
            list_layouts(conn, ctx, &filter).map(EngineQueryResult::Layouts)
        }
        EngineQuery::ApplicationList(app_query) => {
            list_applications(conn, ctx, &app_query).map(EngineQueryResult::Applications)
        }
    }
}
