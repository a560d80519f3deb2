//! Recording in-memory repositories for lifecycle tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use signage_core::errors::{ExError, ExErrorKind, ExResult};
use signage_core::model::{Campaign, Layout, LayoutAttributes, Permission, Playlist, Region, Tag, Widget};
use signage_core::ports::{
    CampaignRepository, DisplayRepository, LayoutFilter, LayoutRepository, PermissionRepository,
    RegionRepository, TagRepository,
};
use signage_core::{LayoutLifecycle, LayoutRepositories};

#[derive(Clone)]
struct StoredLayout {
    owner_id: i64,
    attributes: LayoutAttributes,
}

/// One backend implementing every port, recording each call by name
#[derive(Default)]
pub struct FakeBackend {
    calls: RefCell<Vec<String>>,
    fail_on: RefCell<Option<String>>,
    next_id: Cell<i64>,
    layouts: RefCell<BTreeMap<i64, StoredLayout>>,
    regions: RefCell<BTreeMap<i64, Region>>,
    tags: RefCell<BTreeMap<i64, Tag>>,
    campaigns: RefCell<BTreeMap<i64, Campaign>>,
    permissions: RefCell<Vec<Permission>>,
    /// display id -> default layout id
    displays: RefCell<BTreeMap<i64, i64>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(100),
            ..Self::default()
        }
    }

    pub fn repositories(&self) -> LayoutRepositories<'_> {
        LayoutRepositories::from_backend(self)
    }

    pub fn lifecycle(&self) -> LayoutLifecycle<'_> {
        LayoutLifecycle::new(self.repositories())
    }

    /// Make the named call fail from now on
    pub fn fail_on(&self, call: &str) {
        *self.fail_on.borrow_mut() = Some(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn add_display(&self, display_id: i64, default_layout_id: i64) {
        self.displays.borrow_mut().insert(display_id, default_layout_id);
    }

    pub fn display_default(&self, display_id: i64) -> Option<i64> {
        self.displays.borrow().get(&display_id).copied()
    }

    pub fn add_permission(&self, permission: Permission) {
        self.permissions.borrow_mut().push(permission);
    }

    pub fn campaign(&self, campaign_id: i64) -> Option<Campaign> {
        self.campaigns.borrow().get(&campaign_id).cloned()
    }

    pub fn remove_campaign(&self, campaign_id: i64) {
        self.campaigns.borrow_mut().remove(&campaign_id);
    }

    pub fn has_layout(&self, layout_id: i64) -> bool {
        self.layouts.borrow().contains_key(&layout_id)
    }

    pub fn region_count(&self) -> usize {
        self.regions.borrow().len()
    }

    pub fn tag_layouts(&self, tag: &str) -> Vec<i64> {
        self.tags
            .borrow()
            .values()
            .find(|t| t.tag == tag)
            .map(|t| t.layout_ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn record(&self, call: &str) -> ExResult<()> {
        self.calls.borrow_mut().push(call.to_string());
        if self.fail_on.borrow().as_deref() == Some(call) {
            return Err(ExError::new(ExErrorKind::Persistence)
                .with_op(call)
                .with_message("injected failure"));
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn layout_campaign_id(&self, layout_id: i64) -> Option<i64> {
        self.campaigns
            .borrow()
            .iter()
            .find(|(_, c)| c.is_layout_specific && c.layout_ids.contains(&layout_id))
            .map(|(id, _)| *id)
    }

    fn hydrate(&self, layout_id: i64, stored: &StoredLayout) -> Layout {
        Layout::hydrate(
            layout_id,
            stored.owner_id,
            self.layout_campaign_id(layout_id),
            stored.attributes.clone(),
        )
    }
}

impl LayoutRepository for FakeBackend {
    fn get_by_id(&self, layout_id: i64) -> ExResult<Option<Layout>> {
        self.record("layout.get")?;
        let stored = self.layouts.borrow().get(&layout_id).cloned();
        Ok(stored.map(|s| self.hydrate(layout_id, &s)))
    }

    fn query(&self, filter: &LayoutFilter) -> ExResult<Vec<Layout>> {
        self.record("layout.query")?;
        let rows: Vec<(i64, StoredLayout)> = self
            .layouts
            .borrow()
            .iter()
            .filter(|(id, s)| {
                filter.owner_id.map_or(true, |o| o == s.owner_id)
                    && filter.name_exact.as_ref().map_or(true, |n| *n == s.attributes.name)
                    && filter
                        .name_like
                        .as_ref()
                        .map_or(true, |n| s.attributes.name.contains(n.as_str()))
                    && filter.exclude_layout_id != Some(**id)
                    && filter.retired.map_or(true, |r| r == s.attributes.retired)
            })
            .map(|(id, s)| (*id, s.clone()))
            .collect();
        Ok(rows.iter().map(|(id, s)| self.hydrate(*id, s)).collect())
    }

    fn insert(&self, layout: &Layout, _at: DateTime<Utc>) -> ExResult<i64> {
        self.record("layout.insert")?;
        let id = self.next_id();
        self.layouts.borrow_mut().insert(
            id,
            StoredLayout {
                owner_id: layout.owner_id(),
                attributes: layout.attributes().clone(),
            },
        );
        Ok(id)
    }

    fn update(&self, layout: &Layout, _at: DateTime<Utc>) -> ExResult<()> {
        self.record("layout.update")?;
        let layout_id = layout.layout_id().unwrap_or_default();
        let mut attributes = layout.attributes().clone();
        attributes.legacy_xml = None;
        self.layouts.borrow_mut().insert(
            layout_id,
            StoredLayout {
                owner_id: layout.owner_id(),
                attributes,
            },
        );
        Ok(())
    }

    fn delete(&self, layout_id: i64) -> ExResult<()> {
        self.record("layout.delete")?;
        self.layouts.borrow_mut().remove(&layout_id);
        Ok(())
    }
}

impl RegionRepository for FakeBackend {
    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Region>> {
        self.record("region.get_by_layout")?;
        Ok(self
            .regions
            .borrow()
            .values()
            .filter(|r| r.layout_id == Some(layout_id))
            .map(|r| Region {
                playlists: Vec::new(),
                playlists_loaded: false,
                ..r.clone()
            })
            .collect())
    }

    fn load_playlists(&self, region: &mut Region) -> ExResult<()> {
        self.record("region.load_playlists")?;
        if let Some(stored) = region.region_id.and_then(|id| self.regions.borrow().get(&id).cloned()) {
            region.playlists = stored.playlists;
        }
        region.playlists_loaded = true;
        Ok(())
    }

    fn save(&self, region: &mut Region) -> ExResult<()> {
        self.record("region.save")?;
        let region_id = match region.region_id {
            Some(id) => id,
            None => {
                let id = self.next_id();
                region.region_id = Some(id);
                id
            }
        };
        if region.playlists_loaded {
            for playlist in &mut region.playlists {
                playlist.region_id = Some(region_id);
                if playlist.playlist_id.is_none() {
                    playlist.playlist_id = Some(self.next_id());
                }
                for widget in &mut playlist.widgets {
                    widget.playlist_id = playlist.playlist_id;
                    if widget.widget_id.is_none() {
                        widget.widget_id = Some(self.next_id());
                    }
                }
            }
        }

        let mut stored = region.clone();
        if !region.playlists_loaded {
            if let Some(existing) = self.regions.borrow().get(&region_id) {
                stored.playlists = existing.playlists.clone();
            }
        }
        self.regions.borrow_mut().insert(region_id, stored);
        Ok(())
    }

    fn delete(&self, region: &Region) -> ExResult<()> {
        self.record("region.delete")?;
        if let Some(id) = region.region_id {
            self.regions.borrow_mut().remove(&id);
        }
        Ok(())
    }
}

impl TagRepository for FakeBackend {
    fn load_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Tag>> {
        self.record("tag.load")?;
        Ok(self
            .tags
            .borrow()
            .values()
            .filter(|t| t.layout_ids.contains(&layout_id))
            .cloned()
            .collect())
    }

    fn save(&self, tag: &mut Tag) -> ExResult<()> {
        self.record("tag.save")?;
        let existing = self
            .tags
            .borrow()
            .iter()
            .find(|(_, t)| t.tag == tag.tag)
            .map(|(id, t)| (*id, t.layout_ids.clone()));

        let tag_id = match existing {
            Some((id, mut layout_ids)) => {
                layout_ids.extend(tag.assigned_layout_ids.iter().copied());
                for removed in &tag.unassigned_layout_ids {
                    layout_ids.remove(removed);
                }
                tag.layout_ids = layout_ids;
                id
            }
            None => self.next_id(),
        };
        tag.tag_id = Some(tag_id);
        tag.clear_pending();
        self.tags.borrow_mut().insert(tag_id, tag.clone());
        Ok(())
    }
}

impl CampaignRepository for FakeBackend {
    fn get_by_id(&self, campaign_id: i64) -> ExResult<Option<Campaign>> {
        self.record("campaign.get")?;
        Ok(self.campaigns.borrow().get(&campaign_id).cloned())
    }

    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Campaign>> {
        self.record("campaign.get_by_layout")?;
        Ok(self
            .campaigns
            .borrow()
            .values()
            .filter(|c| c.layout_ids.contains(&layout_id))
            .cloned()
            .collect())
    }

    fn save(&self, campaign: &mut Campaign) -> ExResult<()> {
        self.record("campaign.save")?;
        let campaign_id = match campaign.campaign_id {
            Some(id) => id,
            None => self.next_id(),
        };
        campaign.campaign_id = Some(campaign_id);
        campaign.clear_pending();
        self.campaigns
            .borrow_mut()
            .insert(campaign_id, campaign.clone());
        Ok(())
    }

    fn delete(&self, campaign: &Campaign) -> ExResult<()> {
        self.record("campaign.delete")?;
        if let Some(id) = campaign.campaign_id {
            self.campaigns.borrow_mut().remove(&id);
        }
        Ok(())
    }
}

impl PermissionRepository for FakeBackend {
    fn get_by_object_id(&self, entity: &str, object_id: i64) -> ExResult<Vec<Permission>> {
        self.record("permission.get")?;
        Ok(self
            .permissions
            .borrow()
            .iter()
            .filter(|p| p.entity == entity && p.object_id == object_id)
            .cloned()
            .collect())
    }

    fn save(&self, permission: &mut Permission) -> ExResult<()> {
        self.record("permission.save")?;
        if permission.permission_id.is_none() {
            permission.permission_id = Some(self.next_id());
        }
        self.permissions.borrow_mut().push(permission.clone());
        Ok(())
    }

    fn delete_all(&self, entity: &str, object_id: i64) -> ExResult<()> {
        self.record("permission.delete_all")?;
        self.permissions
            .borrow_mut()
            .retain(|p| !(p.entity == entity && p.object_id == object_id));
        Ok(())
    }
}

impl DisplayRepository for FakeBackend {
    fn repoint_default_layout(&self, from_layout_id: i64, to_layout_id: i64) -> ExResult<usize> {
        self.record("display.repoint")?;
        let mut moved = 0;
        for default in self.displays.borrow_mut().values_mut() {
            if *default == from_layout_id {
                *default = to_layout_id;
                moved += 1;
            }
        }
        Ok(moved)
    }
}

/// A new layout with `regions` regions (one playlist, one widget each) and a tag
pub fn sample_layout(owner_id: i64, name: &str, regions: usize) -> Layout {
    let mut layout = Layout::new(
        owner_id,
        LayoutAttributes::new(name, 1920, 1080).with_description("Front of house"),
    );
    for i in 0..regions {
        let mut playlist = Playlist::new(owner_id, format!("playlist {}", i));
        playlist.widgets.push(Widget::new(owner_id, "image", 10));
        let mut region = Region::new(owner_id, format!("region {}", i), 960, 540);
        region.playlists.push(playlist);
        layout.add_region(region);
    }
    layout.add_tag(Tag::new("lobby"));
    layout
}

/// Save a sample layout and return it freshly fetched and fully loaded
pub fn stored_layout(backend: &FakeBackend, owner_id: i64, name: &str, regions: usize) -> Layout {
    let lifecycle = backend.lifecycle();
    let mut layout = sample_layout(owner_id, name, regions);
    lifecycle
        .save(&mut layout, Default::default())
        .expect("save sample layout");
    let layout_id = layout.layout_id().expect("inserted layout has an id");
    lifecycle.get(layout_id, true).expect("fetch sample layout")
}
