//! Repository ports consumed by the layout aggregate
//!
//! The aggregate never reaches storage directly: `LayoutLifecycle` is built
//! with a [`LayoutRepositories`] bundle, and the store crate provides the
//! SQLite implementations.

use chrono::{DateTime, Utc};

use crate::errors::ExResult;
use crate::model::{Campaign, Layout, Permission, Region, Tag};

/// Filter for layout queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutFilter {
    pub owner_id: Option<i64>,
    /// Exact name match
    pub name_exact: Option<String>,
    /// Substring name match
    pub name_like: Option<String>,
    /// Exclude this layout from the results
    pub exclude_layout_id: Option<i64>,
    pub retired: Option<bool>,
}

/// Layout rows
pub trait LayoutRepository {
    /// Fetch one layout row (children not loaded)
    fn get_by_id(&self, layout_id: i64) -> ExResult<Option<Layout>>;

    /// Layout rows matching `filter`, ordered by name
    fn query(&self, filter: &LayoutFilter) -> ExResult<Vec<Layout>>;

    /// Insert a new row and return the generated layout id
    fn insert(&self, layout: &Layout, at: DateTime<Utc>) -> ExResult<i64>;

    /// Rewrite the scalar columns of an existing row
    fn update(&self, layout: &Layout, at: DateTime<Utc>) -> ExResult<()>;

    fn delete(&self, layout_id: i64) -> ExResult<()>;
}

/// Regions with their playlists and widgets
pub trait RegionRepository {
    /// Regions of a layout without their playlists
    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Region>>;

    /// Fetch playlists and widgets into an already fetched region
    fn load_playlists(&self, region: &mut Region) -> ExResult<()>;

    /// Insert or update the region and everything it plays; assigns ids
    fn save(&self, region: &mut Region) -> ExResult<()>;

    /// Delete the region with its playlists and widgets
    fn delete(&self, region: &Region) -> ExResult<()>;
}

/// Tags and their layout links
pub trait TagRepository {
    fn load_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Tag>>;

    /// Upsert the tag by name and apply pending link changes
    fn save(&self, tag: &mut Tag) -> ExResult<()>;
}

/// Campaigns and their layout links
pub trait CampaignRepository {
    fn get_by_id(&self, campaign_id: i64) -> ExResult<Option<Campaign>>;

    /// Campaigns that have this layout assigned
    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Campaign>>;

    /// Insert or update the campaign and apply pending link changes
    fn save(&self, campaign: &mut Campaign) -> ExResult<()>;

    fn delete(&self, campaign: &Campaign) -> ExResult<()>;
}

/// Group permissions on objects
pub trait PermissionRepository {
    fn get_by_object_id(&self, entity: &str, object_id: i64) -> ExResult<Vec<Permission>>;

    fn save(&self, permission: &mut Permission) -> ExResult<()>;

    /// Delete every permission recorded for the object
    fn delete_all(&self, entity: &str, object_id: i64) -> ExResult<()>;
}

/// Display devices
pub trait DisplayRepository {
    /// Point displays defaulting to `from_layout_id` at `to_layout_id`;
    /// returns the number of displays changed
    fn repoint_default_layout(&self, from_layout_id: i64, to_layout_id: i64) -> ExResult<usize>;
}

/// Every repository the layout aggregate needs
#[derive(Clone, Copy)]
pub struct LayoutRepositories<'r> {
    pub layouts: &'r dyn LayoutRepository,
    pub regions: &'r dyn RegionRepository,
    pub tags: &'r dyn TagRepository,
    pub campaigns: &'r dyn CampaignRepository,
    pub permissions: &'r dyn PermissionRepository,
    pub displays: &'r dyn DisplayRepository,
}

impl<'r> LayoutRepositories<'r> {
    /// Use one backend implementing every port
    pub fn from_backend<B>(backend: &'r B) -> Self
    where
        B: LayoutRepository
            + RegionRepository
            + TagRepository
            + CampaignRepository
            + PermissionRepository
            + DisplayRepository,
    {
        Self {
            layouts: backend,
            regions: backend,
            tags: backend,
            campaigns: backend,
            permissions: backend,
            displays: backend,
        }
    }
}
