use serde::{Deserialize, Serialize};

/// An ordered group of layouts scheduled together
///
/// Every layout owns exactly one campaign with `is_layout_specific = true`,
/// created on first insert and deleted with the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: Option<i64>,
    pub campaign: String,
    pub owner_id: i64,
    pub is_layout_specific: bool,

    /// Assigned layouts in display order
    pub layout_ids: Vec<i64>,

    /// Layouts to link on the next save
    #[serde(skip)]
    pub assigned_layout_ids: Vec<i64>,

    /// Layouts to unlink on the next save
    #[serde(skip)]
    pub unassigned_layout_ids: Vec<i64>,
}

impl Campaign {
    pub fn new(campaign: impl Into<String>, owner_id: i64) -> Self {
        Self {
            campaign_id: None,
            campaign: campaign.into(),
            owner_id,
            is_layout_specific: false,
            layout_ids: Vec::new(),
            assigned_layout_ids: Vec::new(),
            unassigned_layout_ids: Vec::new(),
        }
    }

    /// The shadow campaign backing a single layout
    pub fn layout_specific(campaign: impl Into<String>, owner_id: i64) -> Self {
        Self {
            is_layout_specific: true,
            ..Self::new(campaign, owner_id)
        }
    }

    pub fn assign_layout(&mut self, layout_id: i64) {
        self.unassigned_layout_ids.retain(|id| *id != layout_id);
        if !self.assigned_layout_ids.contains(&layout_id) {
            self.assigned_layout_ids.push(layout_id);
        }
        if !self.layout_ids.contains(&layout_id) {
            self.layout_ids.push(layout_id);
        }
    }

    pub fn unassign_layout(&mut self, layout_id: i64) {
        self.assigned_layout_ids.retain(|id| *id != layout_id);
        self.layout_ids.retain(|id| *id != layout_id);
        if !self.unassigned_layout_ids.contains(&layout_id) {
            self.unassigned_layout_ids.push(layout_id);
        }
    }

    /// 1-based position of a layout in the display order
    pub fn display_order(&self, layout_id: i64) -> Option<i64> {
        self.layout_ids
            .iter()
            .position(|id| *id == layout_id)
            .map(|index| index as i64 + 1)
    }

    pub fn clear_pending(&mut self) {
        self.assigned_layout_ids.clear();
        self.unassigned_layout_ids.clear();
    }
}
