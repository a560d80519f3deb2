use serde::{Deserialize, Serialize};

/// Entity name under which layout permissions are recorded
pub const CAMPAIGN_ENTITY: &str = "campaign";

/// A group's access rights to one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub permission_id: Option<i64>,
    /// Kind of object the permission applies to, e.g. `"campaign"`
    pub entity: String,
    pub object_id: i64,
    pub group_id: i64,
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Permission {
    pub fn new(entity: impl Into<String>, object_id: i64, group_id: i64) -> Self {
        Self {
            permission_id: None,
            entity: entity.into(),
            object_id,
            group_id,
            view: true,
            edit: false,
            delete: false,
        }
    }
}
