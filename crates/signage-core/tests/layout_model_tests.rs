#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::sample_layout;
use signage_core::errors::{ExError, ExErrorKind, SignageError};
use signage_core::{Layout, LayoutAttributes, Region, Tag};

fn layout_with_region_ids(ids: &[i64]) -> Layout {
    let mut layout = Layout::hydrate(7, 1, Some(70), LayoutAttributes::new("Lobby", 1920, 1080));
    for id in ids {
        let mut region = Region::new(1, format!("region {}", id), 100, 100);
        region.region_id = Some(*id);
        layout.add_region(region);
    }
    layout
}

#[test]
fn test_get_region_finds_by_id() {
    let layout = layout_with_region_ids(&[1, 2, 3]);
    assert_eq!(layout.get_region(2).unwrap().name, "region 2");
}

#[test]
fn test_get_region_missing_is_not_found() {
    let layout = layout_with_region_ids(&[1, 2, 3]);

    let err = layout.get_region(99).unwrap_err();
    assert_eq!(err, SignageError::RegionNotFound { region_id: 99 });
    assert_eq!(err.to_string(), "Cannot find region");

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_get_region_mut_edits_in_place() {
    let mut layout = layout_with_region_ids(&[1, 2]);
    layout.get_region_mut(1).unwrap().z_index = 5;
    assert_eq!(layout.get_region(1).unwrap().z_index, 5);
}

#[test]
fn test_add_region_stamps_layout_id() {
    let layout = layout_with_region_ids(&[1]);
    assert_eq!(layout.regions()[0].layout_id, Some(7));
}

#[test]
fn test_get_widgets_in_region_order() {
    let layout = sample_layout(1, "Lobby", 3);
    let widgets = layout.get_widgets();
    assert_eq!(widgets.len(), 3);
    assert!(widgets.iter().all(|w| w.widget_type == "image"));
}

#[test]
fn test_get_widgets_empty_without_playlists() {
    let layout = layout_with_region_ids(&[1, 2]);
    assert!(layout.get_widgets().is_empty());
}

#[test]
fn test_set_owner_cascades() {
    let mut layout = sample_layout(1, "Lobby", 2);
    layout.set_owner(42);

    assert_eq!(layout.owner_id(), 42);
    assert!(layout.regions().iter().all(|r| r.owner_id == 42));
    assert!(layout.get_widgets().iter().all(|w| w.owner_id == 42));
}

#[test]
fn test_duplicate_yields_independent_regions() {
    let mut original = layout_with_region_ids(&[1, 2, 3]);
    original.add_tag(Tag::new("lobby"));

    let mut copy = original.duplicate();

    assert_eq!(copy.layout_id(), None);
    assert_eq!(copy.campaign_id(), None);
    assert!(copy.is_new());
    assert!(copy.is_dirty());
    assert_eq!(copy.regions().len(), 3);
    assert!(copy.regions().iter().all(|r| r.region_id.is_none()));
    assert_eq!(copy.tags().len(), 1);
    assert!(copy.permissions().is_empty());
    assert!(copy.campaigns().is_empty());

    copy.regions_mut()[0].name = "changed".to_string();
    assert_eq!(original.regions()[0].name, "region 1");
}

#[test]
fn test_add_tag_ignores_duplicate_names() {
    let mut layout = sample_layout(1, "Lobby", 0);
    layout.add_tag(Tag::new("lobby"));
    layout.add_tag(Tag::new("entrance"));
    assert_eq!(layout.tags().len(), 2);
}

#[test]
fn test_hydrated_layout_reports_campaign_as_identity() {
    let layout = Layout::hydrate(7, 1, Some(70), LayoutAttributes::new("Lobby", 1, 1));
    assert_eq!(layout.id(), Some(70));
    assert_eq!(layout.layout_id(), Some(7));
    assert!(!layout.is_loaded());
    assert!(!layout.is_new());
}

#[test]
fn test_serializes_flat_attributes() {
    let layout = Layout::hydrate(7, 1, Some(70), LayoutAttributes::new("Lobby", 1920, 1080));
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["name"], "Lobby");
    assert_eq!(json["width"], 1920);
    assert_eq!(json["layout_id"], 7);
    assert!(json.get("dirty").is_none());
}
