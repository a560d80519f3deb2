//! Layout aggregate lifecycle
//!
//! Loads, saves, validates and deletes a [`Layout`] together with everything
//! it owns. The cascades run in a fixed order against the injected
//! repositories and are not transactional on their own; callers that need
//! all-or-nothing behaviour wrap them in a unit of work.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use crate::errors::{ExError, ExResult, SignageError};
use crate::model::{Campaign, Layout, CAMPAIGN_ENTITY, LAYOUT_SCHEMA_VERSION, STATUS_UNBUILT};
use crate::ports::{LayoutFilter, LayoutRepositories};
use crate::rules::validation::validate_layout_fields;
use crate::{log_op_end, log_op_error, log_op_start};

/// Layout that displays fall back to when their default layout is deleted
pub const DEFAULT_FALLBACK_LAYOUT_ID: i64 = 4;

const OP_LOAD: &str = "layout_load";
const OP_SAVE: &str = "layout_save";
const OP_DELETE: &str = "layout_delete";
const OP_VALIDATE: &str = "layout_validate";

/// Options for [`LayoutLifecycle::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Run [`LayoutLifecycle::validate`] before writing anything
    pub validate: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Drives persistence of the layout aggregate
pub struct LayoutLifecycle<'r> {
    repos: LayoutRepositories<'r>,
    fallback_layout_id: i64,
}

impl<'r> LayoutLifecycle<'r> {
    pub fn new(repos: LayoutRepositories<'r>) -> Self {
        Self {
            repos,
            fallback_layout_id: DEFAULT_FALLBACK_LAYOUT_ID,
        }
    }

    pub fn with_fallback_layout_id(mut self, layout_id: i64) -> Self {
        self.fallback_layout_id = layout_id;
        self
    }

    pub fn fallback_layout_id(&self) -> i64 {
        self.fallback_layout_id
    }

    /// Fetch a stored layout and load its children
    ///
    /// # Errors
    /// * `NotFound` - no layout row with this id
    /// * any repository failure
    pub fn get(&self, layout_id: i64, load_playlists: bool) -> ExResult<Layout> {
        let mut layout = self
            .repos
            .layouts
            .get_by_id(layout_id)?
            .ok_or(SignageError::LayoutNotFound { layout_id })?;
        self.load(&mut layout, load_playlists)?;
        Ok(layout)
    }

    /// Populate the children of a layout from storage
    ///
    /// Does nothing when the layout is already loaded, so repeated calls
    /// fetch once. Collections are only replaced after every fetch succeeded.
    ///
    /// # Errors
    /// Propagates repository failures; the layout is left unloaded.
    pub fn load(&self, layout: &mut Layout, load_playlists: bool) -> ExResult<()> {
        if layout.loaded {
            return Ok(());
        }

        let Some(layout_id) = layout.layout_id.filter(|id| *id != 0) else {
            layout.loaded = true;
            layout.mark_clean();
            return Ok(());
        };

        let start = Instant::now();
        log_op_start!(OP_LOAD, layout_id = layout_id, load_playlists = load_playlists);
        let result = self.load_children(layout, layout_id, load_playlists);
        finish(OP_LOAD, start, result)
    }

    fn load_children(
        &self,
        layout: &mut Layout,
        layout_id: i64,
        load_playlists: bool,
    ) -> ExResult<()> {
        let permissions = match layout.campaign_id {
            Some(campaign_id) => self
                .repos
                .permissions
                .get_by_object_id(CAMPAIGN_ENTITY, campaign_id)?,
            None => Vec::new(),
        };

        let mut regions = self.repos.regions.get_by_layout_id(layout_id)?;
        if load_playlists {
            for region in &mut regions {
                self.repos.regions.load_playlists(region)?;
            }
        }

        let tags = self.repos.tags.load_by_layout_id(layout_id)?;
        let campaigns = self.repos.campaigns.get_by_layout_id(layout_id)?;

        debug!(
            layout_id,
            permissions = permissions.len(),
            regions = regions.len(),
            tags = tags.len(),
            campaigns = campaigns.len(),
            "layout children fetched"
        );

        layout.permissions = permissions;
        layout.regions = regions;
        layout.tags = tags;
        layout.campaigns = campaigns;
        layout.loaded = true;
        layout.mark_clean();
        Ok(())
    }

    /// Check the layout against every rule, including name uniqueness per owner
    ///
    /// # Errors
    /// * `InvalidArgument` - dimensions, name length, description length or
    ///   a duplicate name for the same owner
    pub fn validate(&self, layout: &Layout) -> ExResult<()> {
        let start = Instant::now();
        log_op_start!(OP_VALIDATE, layout_id = ?layout.layout_id);
        let result = self.check_rules(layout);
        finish(OP_VALIDATE, start, result)
    }

    fn check_rules(&self, layout: &Layout) -> ExResult<()> {
        validate_layout_fields(layout)?;

        let filter = LayoutFilter {
            owner_id: Some(layout.owner_id),
            name_exact: Some(layout.attributes.name.clone()),
            exclude_layout_id: layout.layout_id.filter(|id| *id != 0),
            ..LayoutFilter::default()
        };
        if !self.repos.layouts.query(&filter)?.is_empty() {
            return Err(SignageError::DuplicateLayoutName {
                owner_id: layout.owner_id,
                name: layout.attributes.name.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Persist the layout and cascade to regions and tags
    ///
    /// Inserts a layout without identity and updates one whose scalar fields
    /// differ from the stored row. Regions and tags are saved every time.
    ///
    /// # Errors
    /// * `Deleted` - the layout was deleted
    /// * `InvalidArgument` - validation failed (when enabled)
    /// * `NotFound` - the layout-specific campaign is missing on update
    /// * any repository failure
    pub fn save(&self, layout: &mut Layout, options: SaveOptions) -> ExResult<()> {
        if layout.deleted {
            return Err(ExError::from(SignageError::LayoutDeleted {
                layout_id: layout.layout_id,
            })
            .with_op(OP_SAVE));
        }

        let start = Instant::now();
        log_op_start!(OP_SAVE, layout_id = ?layout.layout_id, dirty = layout.dirty);
        let result = self.save_cascade(layout, options);
        finish(OP_SAVE, start, result)
    }

    fn save_cascade(&self, layout: &mut Layout, options: SaveOptions) -> ExResult<()> {
        if options.validate {
            self.check_rules(layout)?;
        }

        if layout.is_new() {
            self.add(layout)?;
        } else if layout.has_changes() {
            self.update(layout)?;
        } else {
            debug!(layout_id = ?layout.layout_id, "layout unchanged, row not rewritten");
        }

        let layout_id = layout
            .layout_id
            .ok_or(SignageError::MissingLayoutIdentity)?;

        for region in &mut layout.regions {
            region.layout_id = Some(layout_id);
            self.repos.regions.save(region)?;
        }

        for tag in &mut layout.tags {
            tag.assign_layout(layout_id);
            self.repos.tags.save(tag)?;
        }

        layout.mark_clean();
        Ok(())
    }

    fn add(&self, layout: &mut Layout) -> ExResult<()> {
        layout.attributes.status = STATUS_UNBUILT;
        layout.attributes.schema_version = LAYOUT_SCHEMA_VERSION;

        let layout_id = self.repos.layouts.insert(layout, Utc::now())?;
        layout.layout_id = Some(layout_id);

        let mut campaign = Campaign::layout_specific(layout.name(), layout.owner_id);
        campaign.assign_layout(layout_id);
        self.repos.campaigns.save(&mut campaign)?;
        layout.campaign_id = campaign.campaign_id;

        debug!(layout_id, campaign_id = ?layout.campaign_id, "layout inserted");
        Ok(())
    }

    fn update(&self, layout: &mut Layout) -> ExResult<()> {
        self.repos.layouts.update(layout, Utc::now())?;
        layout.attributes.legacy_xml = None;

        let missing = || SignageError::CampaignNotFound {
            layout_id: layout.layout_id,
        };
        let campaign_id = layout.campaign_id.ok_or_else(missing)?;
        let mut campaign = self
            .repos
            .campaigns
            .get_by_id(campaign_id)?
            .ok_or_else(missing)?;

        campaign.campaign = layout.attributes.name.clone();
        campaign.owner_id = layout.owner_id;
        self.repos.campaigns.save(&mut campaign)?;

        debug!(layout_id = ?layout.layout_id, campaign_id, "layout updated");
        Ok(())
    }

    /// Delete the layout and everything it owns
    ///
    /// Loads the layout first when needed, then removes permissions, tag
    /// links, regions, campaign links, the layout-specific campaign, moves
    /// displays to the fallback layout and finally deletes the row.
    ///
    /// # Errors
    /// * `Deleted` - the layout was already deleted
    /// * `NotFound` - the layout-specific campaign is missing
    /// * any repository failure; steps already run are not undone here
    pub fn delete(&self, layout: &mut Layout) -> ExResult<()> {
        if layout.deleted {
            return Err(ExError::from(SignageError::LayoutDeleted {
                layout_id: layout.layout_id,
            })
            .with_op(OP_DELETE));
        }

        let layout_id = layout
            .layout_id
            .filter(|id| *id != 0)
            .ok_or_else(|| ExError::from(SignageError::MissingLayoutIdentity).with_op(OP_DELETE))?;

        if !layout.loaded {
            self.load(layout, false)?;
        }

        let start = Instant::now();
        log_op_start!(OP_DELETE, layout_id = layout_id);
        let result = self.delete_cascade(layout, layout_id);
        finish(OP_DELETE, start, result)
    }

    fn delete_cascade(&self, layout: &mut Layout, layout_id: i64) -> ExResult<()> {
        for permission in &layout.permissions {
            self.repos
                .permissions
                .delete_all(&permission.entity, permission.object_id)?;
        }

        for tag in &mut layout.tags {
            tag.unassign_layout(layout_id);
            self.repos.tags.save(tag)?;
        }

        for region in &layout.regions {
            self.repos.regions.delete(region)?;
        }

        for campaign in &mut layout.campaigns {
            campaign.unassign_layout(layout_id);
            self.repos.campaigns.save(campaign)?;
        }

        let missing = || SignageError::CampaignNotFound {
            layout_id: Some(layout_id),
        };
        let campaign_id = layout.campaign_id.ok_or_else(missing)?;
        let campaign = self
            .repos
            .campaigns
            .get_by_id(campaign_id)?
            .ok_or_else(missing)?;
        self.repos.campaigns.delete(&campaign)?;

        let moved = self
            .repos
            .displays
            .repoint_default_layout(layout_id, self.fallback_layout_id)?;
        debug!(
            layout_id,
            fallback_layout_id = self.fallback_layout_id,
            displays = moved,
            "displays repointed"
        );

        self.repos.layouts.delete(layout_id)?;
        layout.deleted = true;
        Ok(())
    }
}

fn finish<T>(op: &'static str, start: Instant, result: ExResult<T>) -> ExResult<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms);
        }
    }
    result
}
