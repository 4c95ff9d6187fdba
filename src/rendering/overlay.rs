//! Turns scanned requests and fetched feeds into shapes on a [`MapSurface`].

use crate::{
    core::{
        config::{BoundarySource, WidgetConfig},
        constants::MARKER_JITTER_SPAN,
        geo::LatLng,
        map::MapSurface,
    },
    data::{
        geojson::GeoJson,
        markup::CircleSpec,
        tournament::{Level, Tournament},
    },
    fetch::{FetchError, HttpTransport, JsonFetcher},
    layers::{
        base::OverlayId,
        marker::{Marker, MarkerId},
        registry::MarkerRegistry,
        vector::{Circle, OverlayStyle, Polygon},
    },
    ui::popup::{InfoContent, PopupBindings},
};
use rand::Rng;

/// Boundary geometry ready to attach: one path per exterior ring
pub type BoundaryPaths = Vec<Vec<LatLng>>;

/// Draws boundaries, circles and tournament markers with a fixed style.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    boundary_source: BoundarySource,
    marker_icon_dir: String,
    tournament_link_base: String,
}

impl OverlayRenderer {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            style: config.style.clone(),
            boundary_source: config.boundary_source.clone(),
            marker_icon_dir: config.marker_icon_dir.clone(),
            tournament_link_base: config.tournament_link_base.clone(),
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Feed path holding the outline of `region`
    pub fn boundary_path(&self, region: &str) -> String {
        self.boundary_source.path_for(region)
    }

    /// Fetches the outline of `region` in whichever format is configured.
    pub async fn load_boundary<T: HttpTransport>(
        &self,
        fetcher: &JsonFetcher<T>,
        region: &str,
    ) -> Result<BoundaryPaths, FetchError> {
        let path = self.boundary_path(region);
        match self.boundary_source {
            BoundarySource::GeoJson { .. } => {
                let geojson: GeoJson = fetcher.fetch(&path).await?;
                Ok(geojson.exterior_rings())
            }
            BoundarySource::Coordinates { .. } => {
                let ring: Vec<LatLng> = fetcher.fetch(&path).await?;
                Ok(vec![ring])
            }
        }
    }

    /// Attaches an already loaded outline as one styled polygon
    pub fn attach_boundary<S: MapSurface + ?Sized>(
        &self,
        surface: &mut S,
        region: &str,
        paths: BoundaryPaths,
    ) -> OverlayId {
        let polygon = Polygon::new(paths, self.style.clone());
        log::debug!(
            "drawing boundary {} ({} rings, {} vertices)",
            region,
            polygon.paths.len(),
            polygon.vertex_count()
        );
        surface.add_polygon(polygon)
    }

    /// Fetches and attaches the outline of `region`. A failed fetch draws
    /// nothing.
    pub async fn draw_boundary<S, T>(
        &self,
        surface: &mut S,
        fetcher: &JsonFetcher<T>,
        region: &str,
    ) -> Option<OverlayId>
    where
        S: MapSurface + ?Sized,
        T: HttpTransport,
    {
        match self.load_boundary(fetcher, region).await {
            Ok(paths) => Some(self.attach_boundary(surface, region, paths)),
            Err(e) => {
                log::debug!("no boundary for {}: {}", region, e);
                None
            }
        }
    }

    /// Attaches a styled circle right away
    pub fn draw_circle<S: MapSurface + ?Sized>(
        &self,
        surface: &mut S,
        spec: &CircleSpec,
    ) -> OverlayId {
        log::debug!(
            "drawing circle at ({}, {}) r={}m",
            spec.center.lat,
            spec.center.lng,
            spec.radius_m
        );
        surface.add_circle(Circle::new(spec.center, spec.radius_m, self.style.clone()))
    }

    /// Places one marker per tournament, binds its popup and registers it
    /// under its level. Records whose level has no bucket get no marker.
    ///
    /// Returns the ids of the markers placed, in feed order.
    pub fn place_markers<S, R>(
        &self,
        surface: &mut S,
        registry: &mut MarkerRegistry,
        popups: &mut PopupBindings,
        tournaments: &[Tournament],
        rng: &mut R,
    ) -> Vec<MarkerId>
    where
        S: MapSurface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut placed = Vec::with_capacity(tournaments.len());

        for tournament in tournaments {
            let level = match tournament.level() {
                Ok(level) => level,
                Err(e) => {
                    log::warn!("skipping tournament {}: {}", tournament.id, e);
                    continue;
                }
            };

            let marker = Marker::new(
                jitter(tournament.position(), rng),
                tournament.name.clone(),
                level,
            )
            .with_icon(self.icon_for(level));
            let id = surface.add_marker(marker);

            popups.bind(
                id,
                InfoContent::for_tournament(tournament, level, &self.tournament_link_base),
            );
            registry.register(level, id);
            placed.push(id);
        }

        log::info!(
            "placed {} of {} tournament markers",
            placed.len(),
            tournaments.len()
        );
        placed
    }

    /// Shows or hides all markers of one level
    pub fn toggle<S: MapSurface + ?Sized>(
        &self,
        surface: &mut S,
        registry: &MarkerRegistry,
        level: Level,
        visible: bool,
    ) -> usize {
        registry.set_visible(surface, level, visible)
    }

    pub fn icon_for(&self, level: Level) -> String {
        format!("{}{}.png", self.marker_icon_dir, level.code())
    }
}

/// Nudges a position by up to half of [`MARKER_JITTER_SPAN`] on each axis so
/// that tournaments at the same venue stay individually clickable.
pub fn jitter<R: Rng + ?Sized>(position: LatLng, rng: &mut R) -> LatLng {
    let d_lat = MARKER_JITTER_SPAN * (rng.gen::<f64>() - 0.5);
    let d_lng = MARKER_JITTER_SPAN * (rng.gen::<f64>() - 0.5);
    position.offset(d_lat, d_lng)
}
