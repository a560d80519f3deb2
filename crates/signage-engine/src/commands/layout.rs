//! Layout commands
//!
//! Each mutating command runs the lifecycle inside one transaction. The
//! lifecycle works on a clone of the caller's layout which replaces the
//! original only after the commit, so a failed cascade leaves both the
//! database and the in-memory aggregate as they were.

use rusqlite::Connection;
use signage_core::ports::LayoutRepository;
use signage_core::{
    Layout, LayoutAttributes, LayoutFilter, LayoutLifecycle, Region, SaveOptions, Tag,
};
use signage_core_types::RequestContext;
use signage_store::errors::Result;
use signage_store::SqliteGateway;

use super::unit_of_work::in_transaction;
use super::{with_context, EngineConfig};

/// Input for [`create_layout`]
#[derive(Debug, Clone)]
pub struct NewLayout {
    pub owner_id: i64,
    pub attributes: LayoutAttributes,
    pub regions: Vec<Region>,
    pub tags: Vec<String>,
}

impl NewLayout {
    pub fn new(owner_id: i64, attributes: LayoutAttributes) -> Self {
        Self {
            owner_id,
            attributes,
            regions: Vec::new(),
            tags: Vec::new(),
        }
    }
}

fn lifecycle<'r>(gateway: &'r SqliteGateway<'_>, config: &EngineConfig) -> LayoutLifecycle<'r> {
    LayoutLifecycle::new(gateway.repositories()).with_fallback_layout_id(config.fallback_layout_id)
}

/// Build and persist a new layout with its campaign, regions and tags
///
/// # Errors
/// Validation failures and storage errors. Nothing is written on failure.
pub fn create_layout(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    new_layout: NewLayout,
) -> Result<Layout> {
    let _span = tracing::info_span!("layout_create", request_id = %ctx.request_id).entered();

    let mut layout = Layout::new(new_layout.owner_id, new_layout.attributes);
    for region in new_layout.regions {
        layout.add_region(region);
    }
    for tag in new_layout.tags {
        layout.add_tag(Tag::new(tag));
    }

    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            lifecycle(&gateway, config).save(&mut layout, SaveOptions::default())
        }),
    )?;

    tracing::info!(layout_id = layout.layout_id(), "layout created");
    Ok(layout)
}

/// Fetch and fully load one layout
///
/// # Errors
/// * `NotFound` - no layout with this id
pub fn load_layout(
    conn: &Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout_id: i64,
    load_playlists: bool,
) -> Result<Layout> {
    let gateway = SqliteGateway::new(conn);
    with_context(ctx, lifecycle(&gateway, config).get(layout_id, load_playlists))
}

/// Layout rows matching `filter`; child collections are not loaded
///
/// # Errors
/// Storage errors only.
pub fn list_layouts(
    conn: &Connection,
    ctx: &RequestContext,
    filter: &LayoutFilter,
) -> Result<Vec<Layout>> {
    let gateway = SqliteGateway::new(conn);
    with_context(ctx, gateway.query(filter))
}

/// Persist the caller's layout
///
/// `layout` is only updated (ids assigned, dirty flag cleared) when the
/// transaction commits.
///
/// # Errors
/// * `Deleted` - the layout was already deleted
/// * validation and storage errors
pub fn save_layout(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout: &mut Layout,
    options: SaveOptions,
) -> Result<()> {
    let _span = tracing::info_span!(
        "layout_save",
        request_id = %ctx.request_id,
        layout_id = layout.layout_id()
    )
    .entered();

    let mut working = layout.clone();
    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            lifecycle(&gateway, config).save(&mut working, options)
        }),
    )?;

    *layout = working;
    Ok(())
}

/// Delete the caller's layout and everything that hangs off it
///
/// On success `layout` is marked deleted. On failure no row is touched
/// and `layout` is unchanged.
///
/// # Errors
/// * `Deleted` - the layout was already deleted
/// * `NotFound` - the layout-specific campaign is missing
/// * storage errors
pub fn delete_layout(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout: &mut Layout,
) -> Result<()> {
    let _span = tracing::info_span!(
        "layout_delete",
        request_id = %ctx.request_id,
        layout_id = layout.layout_id()
    )
    .entered();

    let mut working = layout.clone();
    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            lifecycle(&gateway, config).delete(&mut working)
        }),
    )?;

    *layout = working;
    Ok(())
}

/// Delete a layout by id
///
/// # Errors
/// * `NotFound` - no layout with this id, or its campaign is missing
/// * storage errors
pub fn delete_layout_by_id(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout_id: i64,
) -> Result<()> {
    let _span =
        tracing::info_span!("layout_delete", request_id = %ctx.request_id, layout_id).entered();

    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            let lifecycle = lifecycle(&gateway, config);
            let mut layout = lifecycle.get(layout_id, false)?;
            lifecycle.delete(&mut layout)
        }),
    )
}

/// Copy a layout, including regions, playlists and widgets, under a new name
///
/// The copy gets its own campaign. Permissions stay with the original.
///
/// # Errors
/// * `NotFound` - no layout with this id
/// * validation errors for the new name
pub fn copy_layout(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout_id: i64,
    name: &str,
) -> Result<Layout> {
    let _span =
        tracing::info_span!("layout_copy", request_id = %ctx.request_id, layout_id).entered();

    let copy = with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            let lifecycle = lifecycle(&gateway, config);
            let original = lifecycle.get(layout_id, true)?;
            let mut copy = original.duplicate();
            copy.attributes_mut().name = name.to_string();
            lifecycle.save(&mut copy, SaveOptions::default())?;
            Ok(copy)
        }),
    )?;

    tracing::info!(
        source_layout_id = layout_id,
        layout_id = copy.layout_id(),
        "layout copied"
    );
    Ok(copy)
}

/// Hand a layout and its regions to another user
///
/// # Errors
/// * `NotFound` - no layout with this id
/// * validation errors (the new owner may already own a layout with this name)
pub fn set_layout_owner(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout_id: i64,
    owner_id: i64,
) -> Result<Layout> {
    let _span = tracing::info_span!(
        "layout_set_owner",
        request_id = %ctx.request_id,
        layout_id,
        owner_id
    )
    .entered();

    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            let lifecycle = lifecycle(&gateway, config);
            let mut layout = lifecycle.get(layout_id, true)?;
            layout.set_owner(owner_id);
            lifecycle.save(&mut layout, SaveOptions::default())?;
            Ok(layout)
        }),
    )
}

/// Add a region to an existing layout
///
/// # Errors
/// * `NotFound` - no layout with this id
/// * storage errors
pub fn add_region(
    conn: &mut Connection,
    ctx: &RequestContext,
    config: &EngineConfig,
    layout_id: i64,
    region: Region,
) -> Result<Layout> {
    let _span =
        tracing::info_span!("layout_add_region", request_id = %ctx.request_id, layout_id).entered();

    with_context(
        ctx,
        in_transaction(conn, |tx| {
            let gateway = SqliteGateway::new(tx);
            let lifecycle = lifecycle(&gateway, config);
            let mut layout = lifecycle.get(layout_id, false)?;
            layout.add_region(region);
            lifecycle.save(&mut layout, SaveOptions::default())?;
            Ok(layout)
        }),
    )
}
