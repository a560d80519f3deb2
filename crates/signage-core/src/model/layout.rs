use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::campaign::Campaign;
use super::permission::Permission;
use super::region::{Region, Widget};
use super::tag::Tag;
use crate::errors::{Result, SignageError};

/// Schema version written for every newly inserted layout
pub const LAYOUT_SCHEMA_VERSION: i32 = 3;

/// Status of a layout that has not been built for players yet
pub const STATUS_UNBUILT: i32 = 3;

/// Mutable scalar fields of a layout row
///
/// Reachable for writing only through [`Layout::attributes_mut`], which
/// marks the aggregate dirty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    /// Layout name (`layout` column)
    pub name: String,
    pub description: String,
    pub background_image_id: Option<i64>,
    pub background_color: Option<String>,
    pub background_z_index: i32,
    pub width: u32,
    pub height: u32,
    pub status: i32,
    pub retired: bool,
    pub schema_version: i32,
    /// Pre-region XLF document, cleared on every update
    pub legacy_xml: Option<String>,
}

impl LayoutAttributes {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            background_image_id: None,
            background_color: Some("#000000".to_string()),
            background_z_index: 0,
            width,
            height,
            status: STATUS_UNBUILT,
            retired: false,
            schema_version: LAYOUT_SCHEMA_VERSION,
            legacy_xml: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A signage screen composition: the root of the layout aggregate
///
/// Owns its regions (and through them playlists and widgets), its tag
/// associations, the permissions of its campaign and the campaigns that
/// reference it. Persistence is driven by `LayoutLifecycle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub(crate) layout_id: Option<i64>,
    pub(crate) owner_id: i64,
    pub(crate) campaign_id: Option<i64>,
    #[serde(flatten)]
    pub(crate) attributes: LayoutAttributes,

    pub(crate) regions: Vec<Region>,
    pub(crate) tags: Vec<Tag>,
    pub(crate) permissions: Vec<Permission>,
    pub(crate) campaigns: Vec<Campaign>,

    #[serde(skip)]
    pub(crate) loaded: bool,
    #[serde(skip)]
    pub(crate) dirty: bool,
    #[serde(skip)]
    pub(crate) deleted: bool,
    /// Owner and scalar fields as last loaded or saved
    #[serde(skip)]
    pub(crate) baseline: Option<(i64, LayoutAttributes)>,
}

impl Layout {
    /// Create a new layout that has never been persisted
    ///
    /// There is nothing to fetch for it, so it starts loaded and dirty.
    pub fn new(owner_id: i64, attributes: LayoutAttributes) -> Self {
        Self {
            layout_id: None,
            owner_id,
            campaign_id: None,
            attributes,
            regions: Vec::new(),
            tags: Vec::new(),
            permissions: Vec::new(),
            campaigns: Vec::new(),
            loaded: true,
            dirty: true,
            deleted: false,
            baseline: None,
        }
    }

    /// Rebuild a layout from a stored row; children are fetched by `load`
    pub fn hydrate(
        layout_id: i64,
        owner_id: i64,
        campaign_id: Option<i64>,
        attributes: LayoutAttributes,
    ) -> Self {
        Self {
            layout_id: Some(layout_id),
            campaign_id,
            loaded: false,
            dirty: false,
            baseline: Some((owner_id, attributes.clone())),
            ..Self::new(owner_id, attributes)
        }
    }

    /// Externally visible identity: the id of the backing campaign
    pub fn id(&self) -> Option<i64> {
        self.campaign_id
    }

    pub fn layout_id(&self) -> Option<i64> {
        self.layout_id
    }

    pub fn campaign_id(&self) -> Option<i64> {
        self.campaign_id
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn attributes(&self) -> &LayoutAttributes {
        &self.attributes
    }

    /// Mutable access to the scalar fields; marks the layout dirty
    pub fn attributes_mut(&mut self) -> &mut LayoutAttributes {
        self.dirty = true;
        &mut self.attributes
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions are saved on every `save`, so editing them does not dirty the row
    pub fn regions_mut(&mut self) -> &mut Vec<Region> {
        &mut self.regions
    }

    pub fn add_region(&mut self, mut region: Region) {
        region.layout_id = self.layout_id;
        self.regions.push(region);
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Attach a tag; duplicate names are ignored
    pub fn add_tag(&mut self, tag: Tag) {
        if !self.tags.iter().any(|t| t.tag == tag.tag) {
            self.tags.push(tag);
        }
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// True until the layout has a stored row (`None` or `0` id)
    pub fn is_new(&self) -> bool {
        matches!(self.layout_id, None | Some(0))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Dirty and actually different from the stored row
    ///
    /// Writing a field back to its stored value leaves nothing to update.
    pub fn has_changes(&self) -> bool {
        self.dirty
            && match &self.baseline {
                Some((owner_id, attributes)) => {
                    *owner_id != self.owner_id || *attributes != self.attributes
                }
                None => true,
            }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Transfer ownership of the layout and every region it owns
    ///
    /// Written on the next save.
    pub fn set_owner(&mut self, owner_id: i64) {
        self.owner_id = owner_id;
        self.dirty = true;
        for region in &mut self.regions {
            region.set_owner(owner_id);
        }
    }

    /// Find an owned region by id
    ///
    /// # Errors
    /// * `RegionNotFound` - if no loaded region has this id
    pub fn get_region(&self, region_id: i64) -> Result<&Region> {
        self.regions
            .iter()
            .find(|r| r.region_id == Some(region_id))
            .ok_or(SignageError::RegionNotFound { region_id })
    }

    /// Mutable variant of [`Layout::get_region`]
    ///
    /// # Errors
    /// * `RegionNotFound` - if no loaded region has this id
    pub fn get_region_mut(&mut self, region_id: i64) -> Result<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.region_id == Some(region_id))
            .ok_or(SignageError::RegionNotFound { region_id })
    }

    /// All widgets across regions and playlists, in iteration order
    pub fn get_widgets(&self) -> Vec<&Widget> {
        self.regions.iter().flat_map(|r| r.widgets()).collect()
    }

    /// SHA-256 fingerprint of the mutable scalar fields
    pub fn content_hash(&self) -> String {
        fn opt<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        let canonical = [
            opt(&self.layout_id),
            self.owner_id.to_string(),
            opt(&self.campaign_id),
            opt(&self.attributes.background_image_id),
            opt(&self.attributes.background_color),
            self.attributes.width.to_string(),
            self.attributes.height.to_string(),
            self.attributes.status.to_string(),
            self.attributes.description.clone(),
        ]
        .join("|");

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// An independent copy that will be inserted as a new layout
    ///
    /// Identity is cleared, regions are deep-copied without ids and tag
    /// associations are kept. Permissions and campaign references belong to
    /// the original and are dropped.
    pub fn duplicate(&self) -> Self {
        Self {
            layout_id: None,
            owner_id: self.owner_id,
            campaign_id: None,
            attributes: self.attributes.clone(),
            regions: self.regions.iter().map(Region::duplicate).collect(),
            tags: self
                .tags
                .iter()
                .map(|t| {
                    let mut tag = t.clone();
                    tag.clear_pending();
                    tag
                })
                .collect(),
            permissions: Vec::new(),
            campaigns: Vec::new(),
            loaded: true,
            dirty: true,
            deleted: false,
            baseline: None,
        }
    }

    /// Take the current scalar fields as the stored state
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
        self.baseline = Some((self.owner_id, self.attributes.clone()));
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {} - {} x {}. Regions = {}, Tags = {}. layoutId = {}",
            self.attributes.name,
            self.attributes.width,
            self.attributes.height,
            self.regions.len(),
            self.tags.len(),
            self.layout_id.unwrap_or(0)
        )
    }
}
