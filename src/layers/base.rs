use crate::layers::vector::{Circle, Polygon};
use serde::{Deserialize, Serialize};

/// Handle to a shape attached to a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Polygon,
    Circle,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Polygon => write!(f, "polygon"),
            LayerType::Circle => write!(f, "circle"),
        }
    }
}

/// A shape drawn on the surface. Once attached it is never updated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    Polygon(Polygon),
    Circle(Circle),
}

impl Overlay {
    pub fn layer_type(&self) -> LayerType {
        match self {
            Overlay::Polygon(_) => LayerType::Polygon,
            Overlay::Circle(_) => LayerType::Circle,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Overlay::Polygon(polygon) => Some(polygon),
            Overlay::Circle(_) => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Overlay::Circle(circle) => Some(circle),
            Overlay::Polygon(_) => None,
        }
    }
}
