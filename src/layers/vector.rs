use crate::{
    core::{
        constants::{
            DEFAULT_FILL_OPACITY, DEFAULT_OVERLAY_COLOR, DEFAULT_STROKE_OPACITY,
            DEFAULT_STROKE_WEIGHT,
        },
        geo::{LatLng, LatLngBounds},
    },
    MapError,
};
use serde::{Deserialize, Serialize};

/// RGB color that serializes as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SerializableColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `#rgb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| MapError::Config(format!("invalid color {:?}", value)))
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

/// Style shared by every boundary polygon and radius circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Border color
    pub stroke_color: SerializableColor,
    /// Stroke opacity (0.0 to 1.0)
    pub stroke_opacity: f32,
    /// Border width in pixels
    pub stroke_weight: f32,
    /// Fill color
    pub fill_color: SerializableColor,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        // DEFAULT_OVERLAY_COLOR is a compile-time literal known to parse
        let color = SerializableColor::from_hex(DEFAULT_OVERLAY_COLOR)
            .unwrap_or(SerializableColor::rgb(0, 0, 255));
        Self {
            stroke_color: color,
            stroke_opacity: DEFAULT_STROKE_OPACITY,
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            fill_color: color,
            fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

/// A filled polygon made of one or more rings, e.g. a state outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub paths: Vec<Vec<LatLng>>,
    pub style: OverlayStyle,
}

impl Polygon {
    pub fn new(paths: Vec<Vec<LatLng>>, style: OverlayStyle) -> Self {
        Self { paths, style }
    }

    /// Number of vertices across all rings
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.paths
            .iter()
            .filter_map(|ring| LatLngBounds::from_points(ring))
            .reduce(|a, b| a.union(&b))
    }
}

/// A circle around a point, radius always in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius_m: f64,
    pub style: OverlayStyle,
}

impl Circle {
    pub fn new(center: LatLng, radius_m: f64, style: OverlayStyle) -> Self {
        Self {
            center,
            radius_m,
            style,
        }
    }
}
