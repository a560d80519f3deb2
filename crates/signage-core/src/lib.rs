//! Signage Core - layout aggregate and client applications
//!
//! This crate provides the domain of the signage CMS, including:
//! - The Layout aggregate (regions, playlists, widgets, tags, campaigns,
//!   permissions) as plain data
//! - Field validation and the per-owner name uniqueness rule
//! - `LayoutLifecycle`, which loads, saves and deletes the aggregate through
//!   repository ports
//! - OAuth client registration and the authorization-code approval step
//! - The error and logging facilities shared by every signage crate

pub mod errors;
pub mod lifecycle;
pub mod logging_facility;
pub mod model;
pub mod oauth;
pub mod ports;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ExResult, Result, SignageError};
pub use lifecycle::{LayoutLifecycle, SaveOptions, DEFAULT_FALLBACK_LAYOUT_ID};
pub use model::{Campaign, Layout, LayoutAttributes, Permission, Playlist, Region, Tag, Widget};
pub use ports::{LayoutFilter, LayoutRepositories};
