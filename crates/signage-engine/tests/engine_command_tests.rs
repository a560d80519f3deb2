#![allow(clippy::unwrap_used, clippy::expect_used)]

use signage_core::LayoutAttributes;
use signage_core_types::RequestContext;
use signage_engine::commands::layout::NewLayout;
use signage_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineConfig,
    EngineQuery, EngineQueryResult,
};
use signage_store::db::open_and_migrate;
use tempfile::TempDir;

#[test]
fn test_commands_persist_across_connections() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join(".signage/store.db");
    let ctx = RequestContext::new();
    let config = EngineConfig::default();

    let layout_id = {
        let mut conn = open_and_migrate(&db_path).unwrap();
        let cmd = EngineCommand::LayoutCreate(NewLayout::new(
            2,
            LayoutAttributes::new("Window", 1080, 1920),
        ));
        match apply_engine_command(cmd, &mut conn, &ctx, &config).unwrap() {
            EngineCommandResult::Layout(layout) => layout.layout_id().unwrap(),
            other => panic!("unexpected result: {:?}", other),
        }
    };

    let conn = open_and_migrate(&db_path).unwrap();
    let query = EngineQuery::LayoutGet {
        layout_id,
        load_playlists: false,
    };
    match apply_engine_query(query, &conn, &ctx, &config).unwrap() {
        EngineQueryResult::Layout(layout) => {
            assert_eq!(layout.name(), "Window");
            assert_eq!(layout.attributes().height, 1920);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_delete_command_reports_layout_id() {
    let temp_dir = TempDir::new().unwrap();
    let mut conn = open_and_migrate(temp_dir.path().join("store.db")).unwrap();
    let ctx = RequestContext::new();
    let config = EngineConfig::default();

    let create = EngineCommand::LayoutCreate(NewLayout::new(
        2,
        LayoutAttributes::new("Window", 1080, 1920),
    ));
    let layout_id = match apply_engine_command(create, &mut conn, &ctx, &config).unwrap() {
        EngineCommandResult::Layout(layout) => layout.layout_id().unwrap(),
        other => panic!("unexpected result: {:?}", other),
    };

    let result = apply_engine_command(
        EngineCommand::LayoutDelete { layout_id },
        &mut conn,
        &ctx,
        &config,
    )
    .unwrap();
    assert!(matches!(
        result,
        EngineCommandResult::LayoutDeleted { layout_id: id } if id == layout_id
    ));

    let listed = apply_engine_query(
        EngineQuery::LayoutList(Default::default()),
        &conn,
        &ctx,
        &config,
    )
    .unwrap();
    assert!(matches!(listed, EngineQueryResult::Layouts(ref l) if l.is_empty()));
}
