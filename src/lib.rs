//! # qbmap
//!
//! Overlay loading and marker dispatch for a tournament notification map.
//!
//! Declarative markup elements describe which state boundaries and radius
//! circles a user is subscribed to; remote JSON feeds provide boundary
//! geometry and the list of upcoming tournaments. The crate turns both into
//! styled overlays and markers attached to a [`MapSurface`], which stands in
//! for whatever mapping library actually draws them.

pub mod core;
pub mod data;
pub mod fetch;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{BoundarySource, MapOptions, WidgetConfig},
    geo::{LatLng, LatLngBounds},
    map::{HeadlessSurface, MapSurface},
};

pub use crate::layers::{
    base::{Overlay, OverlayId},
    marker::{Marker, MarkerId},
    registry::MarkerRegistry,
    vector::{Circle, OverlayStyle, Polygon},
};

pub use crate::data::{
    markup::{DistanceUnit, MarkupElement, ScanResult},
    notification::{LevelSet, Notification, NotifyTarget},
    tournament::{Level, Tournament},
};

pub use crate::fetch::{FetchError, HttpTransport, JsonFetcher, ReqwestTransport, StaticTransport};

pub use crate::input::events::MapEvent;

pub use crate::rendering::overlay::OverlayRenderer;

pub use crate::ui::{controls::LevelControls, popup::InfoContent, widget::NotifyMap};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown tournament level: {0:?}")]
    UnknownLevel(String),
}

/// Error type alias for convenience
pub type Error = MapError;
