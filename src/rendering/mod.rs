pub mod overlay;

pub use overlay::{jitter, BoundaryPaths, OverlayRenderer};
