pub mod campaign;
pub mod layout;
pub mod permission;
pub mod region;
pub mod tag;

pub use campaign::Campaign;
pub use layout::{Layout, LayoutAttributes, LAYOUT_SCHEMA_VERSION, STATUS_UNBUILT};
pub use permission::{Permission, CAMPAIGN_ENTITY};
pub use region::{Playlist, Region, Widget};
pub use tag::Tag;
