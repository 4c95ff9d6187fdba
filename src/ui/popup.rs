use crate::{
    core::map::MapSurface,
    data::tournament::{Level, Tournament},
    layers::marker::MarkerId,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What the info popup shows for one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoContent {
    pub name: String,
    pub link: String,
    pub level_label: String,
    pub date: String,
}

impl InfoContent {
    pub fn for_tournament(tournament: &Tournament, level: Level, link_base: &str) -> Self {
        Self {
            name: tournament.name.clone(),
            link: format!("{}{}", link_base, tournament.id),
            level_label: level.label().to_string(),
            date: tournament.date.clone(),
        }
    }

    /// Markup handed to the surface's popup: linked name, then level and date.
    /// Feed values are inserted verbatim.
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\">{}</a><br />{} tournament on {}",
            self.link, self.name, self.level_label, self.date
        )
    }
}

/// The single info popup shared by every marker.
///
/// Opening it on a marker replaces whatever it showed before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoWindow {
    anchor: Option<MarkerId>,
    content: Option<InfoContent>,
}

impl InfoWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, anchor: MarkerId, content: InfoContent) {
        self.anchor = Some(anchor);
        self.content = Some(content);
    }

    pub fn close(&mut self) {
        self.anchor = None;
        self.content = None;
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<MarkerId> {
        self.anchor
    }

    pub fn content(&self) -> Option<&InfoContent> {
        self.content.as_ref()
    }
}

/// Click handlers: which popup content each marker opens.
#[derive(Debug, Clone, Default)]
pub struct PopupBindings {
    contents: FxHashMap<MarkerId, InfoContent>,
}

impl PopupBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, marker: MarkerId, content: InfoContent) {
        self.contents.insert(marker, content);
    }

    pub fn content_for(&self, marker: MarkerId) -> Option<&InfoContent> {
        self.contents.get(&marker)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Runs the click handler of `marker`: opens the shared popup on the
    /// surface. Returns false for unbound markers.
    pub fn open<S: MapSurface + ?Sized>(&self, surface: &mut S, marker: MarkerId) -> bool {
        match self.contents.get(&marker) {
            Some(content) => {
                surface.open_info_window(marker, content);
                true
            }
            None => false,
        }
    }
}
