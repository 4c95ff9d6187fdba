//! Deployment defaults for the notification map.
//! Keeping them in a single place makes it easier to tweak widget-wide magic numbers.

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.3;

/// Meters per foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Meters per kilometer.
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Full width of the marker jitter window in degrees; offsets fall in ±half of it.
pub const MARKER_JITTER_SPAN: f64 = 0.0002;

/// Initial map center (contiguous US).
pub const DEFAULT_CENTER: (f64, f64) = (40.0, -96.0);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 4.0;

/// Base map type handed to the surface.
pub const DEFAULT_MAP_TYPE: &str = "roadmap";

/// Overlay stroke/fill color.
pub const DEFAULT_OVERLAY_COLOR: &str = "#0000ff";

pub const DEFAULT_STROKE_OPACITY: f32 = 0.7;
pub const DEFAULT_STROKE_WEIGHT: f32 = 1.0;
pub const DEFAULT_FILL_OPACITY: f32 = 0.3;

/// Directory holding pre-built GeoJSON state outlines, keyed `<code>.json`.
pub const GEOJSON_DIR: &str = "static/geojson/";

/// Directory holding raw `{lat, lng}` polygon rings, keyed `<code>.json`.
pub const POLYGON_DIR: &str = "static/polygons/";

/// Upcoming tournament feed.
pub const TOURNAMENT_FEED_PATH: &str = "/static/upcoming.json";

/// Per-level marker icons, keyed `<level>.png`.
pub const MARKER_ICON_DIR: &str = "/static/markers/";

/// Tournament detail pages, keyed by tournament id.
pub const TOURNAMENT_LINK_BASE: &str = "http://hsquizbowl.org/db/tournaments/";

/// User agent sent with every feed request.
pub const USER_AGENT: &str = concat!("qbmap/", env!("CARGO_PKG_VERSION"));
