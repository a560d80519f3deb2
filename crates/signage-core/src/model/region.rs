use serde::{Deserialize, Serialize};

/// A rectangular area of a layout that plays one or more playlists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Surrogate key, `None` until first persisted
    pub region_id: Option<i64>,

    /// Owning layout, stamped by the layout on every save
    pub layout_id: Option<i64>,

    pub owner_id: i64,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub top: u32,
    pub left: u32,
    pub z_index: i32,

    /// Region duration in seconds (0 = sum of widget durations)
    pub duration: u32,

    /// Playlists played by this region, only populated once loaded
    pub playlists: Vec<Playlist>,

    /// Whether playlists/widgets have been fetched
    #[serde(skip)]
    pub playlists_loaded: bool,
}

impl Region {
    /// Create a new, unsaved region
    pub fn new(owner_id: i64, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            region_id: None,
            layout_id: None,
            owner_id,
            name: name.into(),
            width,
            height,
            top: 0,
            left: 0,
            z_index: 0,
            duration: 0,
            playlists: Vec::new(),
            playlists_loaded: true,
        }
    }

    /// Set the position of the region's top-left corner
    pub fn with_position(mut self, top: u32, left: u32) -> Self {
        self.top = top;
        self.left = left;
        self
    }

    /// Reassign ownership of the region and everything it plays
    pub fn set_owner(&mut self, owner_id: i64) {
        self.owner_id = owner_id;
        for playlist in &mut self.playlists {
            playlist.set_owner(owner_id);
        }
    }

    /// Iterate over the widgets of every loaded playlist
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.playlists.iter().flat_map(|p| p.widgets.iter())
    }

    /// Deep copy with every identity cleared, ready to insert elsewhere
    pub fn duplicate(&self) -> Self {
        Self {
            region_id: None,
            layout_id: None,
            playlists: self.playlists.iter().map(Playlist::duplicate).collect(),
            ..self.clone()
        }
    }
}

/// An ordered list of widgets played inside a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub playlist_id: Option<i64>,
    pub region_id: Option<i64>,
    pub owner_id: i64,
    pub name: String,
    pub display_order: u32,
    pub widgets: Vec<Widget>,
}

impl Playlist {
    pub fn new(owner_id: i64, name: impl Into<String>) -> Self {
        Self {
            playlist_id: None,
            region_id: None,
            owner_id,
            name: name.into(),
            display_order: 0,
            widgets: Vec::new(),
        }
    }

    pub fn set_owner(&mut self, owner_id: i64) {
        self.owner_id = owner_id;
        for widget in &mut self.widgets {
            widget.owner_id = owner_id;
        }
    }

    pub fn duplicate(&self) -> Self {
        Self {
            playlist_id: None,
            region_id: None,
            widgets: self.widgets.iter().map(Widget::duplicate).collect(),
            ..self.clone()
        }
    }
}

/// A single piece of content (image, video, ticker, ...) in a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub widget_id: Option<i64>,
    pub playlist_id: Option<i64>,
    pub owner_id: i64,
    pub widget_type: String,
    pub duration: u32,
    pub display_order: u32,
}

impl Widget {
    pub fn new(owner_id: i64, widget_type: impl Into<String>, duration: u32) -> Self {
        Self {
            widget_id: None,
            playlist_id: None,
            owner_id,
            widget_type: widget_type.into(),
            duration,
            display_order: 0,
        }
    }

    pub fn duplicate(&self) -> Self {
        Self {
            widget_id: None,
            playlist_id: None,
            ..self.clone()
        }
    }
}
