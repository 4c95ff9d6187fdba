use crate::{
    core::config::MapOptions,
    layers::{
        base::{Overlay, OverlayId},
        marker::{Marker, MarkerId},
        vector::{Circle, Polygon},
    },
    ui::popup::{InfoContent, InfoWindow},
};

/// The rendering surface overlays are attached to.
///
/// Implementations wrap whatever mapping library actually draws. Every
/// operation is fire-and-forget from the caller's point of view: shapes are
/// never updated or removed once added; the only mutable state reachable
/// through the trait is the view, marker visibility and the shared info
/// popup. The surface is the only owner of popup state.
pub trait MapSurface {
    /// Applies the initial view (center, zoom, base map type)
    fn set_options(&mut self, options: &MapOptions);

    /// Attaches a styled polygon
    fn add_polygon(&mut self, polygon: Polygon) -> OverlayId;

    /// Attaches a styled circle
    fn add_circle(&mut self, circle: Circle) -> OverlayId;

    /// Attaches a visible marker
    fn add_marker(&mut self, marker: Marker) -> MarkerId;

    /// Shows or hides one marker; unknown ids are ignored
    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool);

    /// Opens the shared info popup anchored at `anchor`
    fn open_info_window(&mut self, anchor: MarkerId, content: &InfoContent);
}

/// In-memory surface that records everything attached to it.
///
/// Used for server-side processing, CLI summaries and tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    options: MapOptions,
    overlays: Vec<Overlay>,
    markers: Vec<Marker>,
    info_window: InfoWindow,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id.0)
    }

    pub fn polygons(&self) -> Vec<&Polygon> {
        self.overlays.iter().filter_map(Overlay::as_polygon).collect()
    }

    pub fn circles(&self) -> Vec<&Circle> {
        self.overlays.iter().filter_map(Overlay::as_circle).collect()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn visible_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.visible).count()
    }

    pub fn info_window(&self) -> &InfoWindow {
        &self.info_window
    }

    fn push_overlay(&mut self, overlay: Overlay) -> OverlayId {
        self.overlays.push(overlay);
        OverlayId(self.overlays.len() - 1)
    }
}

impl MapSurface for HeadlessSurface {
    fn set_options(&mut self, options: &MapOptions) {
        self.options = options.clone();
    }

    fn add_polygon(&mut self, polygon: Polygon) -> OverlayId {
        self.push_overlay(Overlay::Polygon(polygon))
    }

    fn add_circle(&mut self, circle: Circle) -> OverlayId {
        self.push_overlay(Overlay::Circle(circle))
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        self.markers.push(marker);
        MarkerId(self.markers.len() - 1)
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        if let Some(m) = self.markers.get_mut(marker.0) {
            m.visible = visible;
        }
    }

    fn open_info_window(&mut self, anchor: MarkerId, content: &InfoContent) {
        self.info_window.open(anchor, content.clone());
    }
}
