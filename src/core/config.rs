//! Configuration for the notification map widget
//!
//! Defaults reproduce the deployed site: a roadmap centered on the
//! contiguous US, blue translucent overlays, and feeds served from the
//! site's `static/` tree. Everything can be overridden from JSON.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER, DEFAULT_MAP_TYPE, DEFAULT_ZOOM, GEOJSON_DIR, MARKER_ICON_DIR,
            POLYGON_DIR, TOURNAMENT_FEED_PATH, TOURNAMENT_LINK_BASE,
        },
        geo::LatLng,
    },
    layers::vector::OverlayStyle,
    Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial view handed to the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub map_type: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            map_type: DEFAULT_MAP_TYPE.to_string(),
        }
    }
}

/// Where state outlines come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundarySource {
    /// Pre-built GeoJSON documents at `<dir><code>.json`
    GeoJson { dir: String },
    /// Raw `[{lat, lng}]` rings at `<dir><code>.json`
    Coordinates { dir: String },
}

impl BoundarySource {
    pub fn geojson() -> Self {
        BoundarySource::GeoJson {
            dir: GEOJSON_DIR.to_string(),
        }
    }

    pub fn coordinates() -> Self {
        BoundarySource::Coordinates {
            dir: POLYGON_DIR.to_string(),
        }
    }

    /// Feed path for one region code
    pub fn path_for(&self, region: &str) -> String {
        let dir = match self {
            BoundarySource::GeoJson { dir } | BoundarySource::Coordinates { dir } => dir,
        };
        format!("{}{}.json", dir, region)
    }
}

impl Default for BoundarySource {
    fn default() -> Self {
        Self::coordinates()
    }
}

/// Everything the widget needs besides the markup and a transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Site origin relative feed paths are resolved against
    pub origin: Option<String>,
    pub map: MapOptions,
    pub style: OverlayStyle,
    pub boundary_source: BoundarySource,
    pub tournament_feed: String,
    pub marker_icon_dir: String,
    pub tournament_link_base: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            origin: None,
            map: MapOptions::default(),
            style: OverlayStyle::default(),
            boundary_source: BoundarySource::default(),
            tournament_feed: TOURNAMENT_FEED_PATH.to_string(),
            marker_icon_dir: MARKER_ICON_DIR.to_string(),
            tournament_link_base: TOURNAMENT_LINK_BASE.to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_boundary_source(mut self, source: BoundarySource) -> Self {
        self.boundary_source = source;
        self
    }

    pub fn with_tournament_feed(mut self, path: impl Into<String>) -> Self {
        self.tournament_feed = path.into();
        self
    }
}
