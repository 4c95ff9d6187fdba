use crate::{core::geo::LatLng, data::tournament::Level};
use serde::{Deserialize, Serialize};

/// Handle to a marker attached to a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub usize);

/// A point icon for one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    pub title: String,
    pub icon: String,
    pub level: Level,
    pub visible: bool,
}

impl Marker {
    pub fn new(position: LatLng, title: String, level: Level) -> Self {
        Self {
            position,
            title,
            icon: String::new(),
            level,
            visible: true,
        }
    }

    pub fn with_icon(mut self, icon: String) -> Self {
        self.icon = icon;
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }
}
