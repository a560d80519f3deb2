use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A free-text label attached to layouts
///
/// Assignment changes are recorded in memory and written by
/// `TagRepository::save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: Option<i64>,
    pub tag: String,

    /// Layouts this tag is attached to
    pub layout_ids: BTreeSet<i64>,

    /// Layouts to attach on the next save
    #[serde(skip)]
    pub assigned_layout_ids: BTreeSet<i64>,

    /// Layouts to detach on the next save
    #[serde(skip)]
    pub unassigned_layout_ids: BTreeSet<i64>,
}

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag_id: None,
            tag: tag.into(),
            layout_ids: BTreeSet::new(),
            assigned_layout_ids: BTreeSet::new(),
            unassigned_layout_ids: BTreeSet::new(),
        }
    }

    pub fn assign_layout(&mut self, layout_id: i64) {
        self.unassigned_layout_ids.remove(&layout_id);
        self.assigned_layout_ids.insert(layout_id);
        self.layout_ids.insert(layout_id);
    }

    pub fn unassign_layout(&mut self, layout_id: i64) {
        self.assigned_layout_ids.remove(&layout_id);
        self.layout_ids.remove(&layout_id);
        self.unassigned_layout_ids.insert(layout_id);
    }

    /// Forget pending changes once they have been written
    pub fn clear_pending(&mut self) {
        self.assigned_layout_ids.clear();
        self.unassigned_layout_ids.clear();
    }
}
