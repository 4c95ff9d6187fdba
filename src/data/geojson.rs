use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeatureCollection {
    pub features: Vec<GeoJsonFeature>,
}

/// Root GeoJSON object. A state outline resource is usually a single
/// Feature or a FeatureCollection, but a bare geometry is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJson {
    FeatureCollection(GeoJsonFeatureCollection),
    Geometry(GeoJsonGeometry),
    Feature(GeoJsonFeature),
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    /// Every geometry in the document, features without geometry skipped
    pub fn geometries(&self) -> Vec<&GeoJsonGeometry> {
        match self {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .iter()
                .filter_map(|f| f.geometry.as_ref())
                .collect(),
            GeoJson::Feature(feature) => feature.geometry.iter().collect(),
            GeoJson::Geometry(geometry) => vec![geometry],
        }
    }

    /// Exterior rings of every polygonal geometry, as paths for a single
    /// polygon overlay
    pub fn exterior_rings(&self) -> Vec<Vec<LatLng>> {
        let mut rings = Vec::new();
        for geometry in self.geometries() {
            geometry.collect_exterior_rings(&mut rings);
        }
        rings
    }
}

impl GeoJsonGeometry {
    fn collect_exterior_rings(&self, rings: &mut Vec<Vec<LatLng>>) {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                if let Some(exterior) = coordinates.first() {
                    rings.push(to_lat_lngs(exterior));
                }
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    if let Some(exterior) = polygon.first() {
                        rings.push(to_lat_lngs(exterior));
                    }
                }
            }
            GeoJsonGeometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.collect_exterior_rings(rings);
                }
            }
            _ => {}
        }
    }
}

// GeoJSON positions are [lng, lat]
fn to_lat_lngs(ring: &[[f64; 2]]) -> Vec<LatLng> {
    ring.iter().map(|c| LatLng::new(c[1], c[0])).collect()
}
