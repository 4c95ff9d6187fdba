//! Prelude module for common qbmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use qbmap::prelude::*;`

pub use crate::core::{
    config::{BoundarySource, MapOptions, WidgetConfig},
    geo::{LatLng, LatLngBounds},
    map::{HeadlessSurface, MapSurface},
};

pub use crate::layers::{
    base::{LayerType, Overlay, OverlayId},
    marker::{Marker, MarkerId},
    registry::MarkerRegistry,
    vector::{Circle, OverlayStyle, Polygon, SerializableColor},
};

pub use crate::data::{
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    markup::{CircleSpec, DistanceUnit, MarkupElement, ScanResult, StateSpec},
    notification::{LevelSet, Notification, NotifyTarget},
    tournament::{Level, Tournament},
};

pub use crate::fetch::{
    FetchError, HttpResponse, HttpTransport, JsonFetcher, ReqwestTransport, StaticTransport,
};

pub use crate::input::events::MapEvent;

pub use crate::rendering::overlay::OverlayRenderer;

pub use crate::ui::{
    controls::{LevelCheckbox, LevelControls},
    popup::{InfoContent, InfoWindow},
    widget::{InitReport, NotifyMap},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
