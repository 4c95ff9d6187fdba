//! The notification map widget: owns the surface handle and all
//! widget-lifetime state, and runs the startup sequence.

use crate::{
    core::{
        config::WidgetConfig,
        map::{HeadlessSurface, MapSurface},
    },
    data::{
        markup::{self, MarkupElement},
        tournament::{Level, Tournament},
    },
    fetch::{FetchError, HttpTransport, JsonFetcher},
    input::events::{EventHandled, MapEvent},
    layers::registry::MarkerRegistry,
    rendering::overlay::{BoundaryPaths, OverlayRenderer},
    ui::{controls::LevelControls, popup::PopupBindings},
};
use futures::{
    channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
    future::{FutureExt, LocalBoxFuture},
    stream::{FuturesUnordered, StreamExt},
};
use rand::{rngs::StdRng, SeedableRng};

/// What startup produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub boundaries: usize,
    pub circles: usize,
    pub markers: usize,
    pub dropped_fetches: usize,
}

/// A finished fetch, carrying only its own request's data
enum Completion {
    Boundary {
        region: String,
        result: Result<BoundaryPaths, FetchError>,
    },
    Tournaments(Result<Vec<Tournament>, FetchError>),
}

pub struct NotifyMap<S> {
    config: WidgetConfig,
    surface: S,
    renderer: OverlayRenderer,
    registry: MarkerRegistry,
    popups: PopupBindings,
    controls: LevelControls,
    rng: StdRng,
    errors: Option<UnboundedSender<FetchError>>,
}

impl NotifyMap<HeadlessSurface> {
    /// Widget over an in-memory surface
    pub fn headless(config: WidgetConfig) -> Self {
        Self::new(config, HeadlessSurface::new())
    }
}

impl<S: MapSurface> NotifyMap<S> {
    /// Takes over `surface` and applies the configured initial view to it
    pub fn new(config: WidgetConfig, mut surface: S) -> Self {
        surface.set_options(&config.map);
        let renderer = OverlayRenderer::new(&config);
        let controls = LevelControls::new(|level| renderer.icon_for(level));
        Self {
            config,
            surface,
            renderer,
            registry: MarkerRegistry::new(),
            popups: PopupBindings::new(),
            controls,
            rng: StdRng::from_entropy(),
            errors: None,
        }
    }

    /// Makes marker jitter reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Opts into error observation: every fetch the widget drops is also
    /// sent on the returned channel. Calling it again replaces the channel.
    pub fn error_channel(&mut self) -> UnboundedReceiver<FetchError> {
        let (tx, rx) = mpsc::unbounded();
        self.errors = Some(tx);
        rx
    }

    /// Fetcher resolving feed paths against the configured origin
    pub fn fetcher<T: HttpTransport>(&self, transport: T) -> JsonFetcher<T> {
        let fetcher = JsonFetcher::new(transport);
        match &self.config.origin {
            Some(origin) => fetcher.with_origin(origin.clone()),
            None => fetcher,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn controls(&self) -> &LevelControls {
        &self.controls
    }

    /// Startup: scan the markup once, draw circles right away, then fetch
    /// every requested boundary and the tournament feed concurrently and
    /// apply each result as it arrives.
    pub async fn initialize<T: HttpTransport>(
        &mut self,
        elements: &[MarkupElement],
        fetcher: &JsonFetcher<T>,
    ) -> InitReport {
        let scan = markup::scan(elements);
        let mut report = InitReport::default();

        let renderer = self.renderer.clone();
        let feed_path = self.config.tournament_feed.clone();
        let mut pending: FuturesUnordered<LocalBoxFuture<'_, Completion>> =
            FuturesUnordered::new();

        for state in scan.states {
            let renderer = &renderer;
            pending.push(
                async move {
                    let result = renderer.load_boundary(fetcher, &state.region).await;
                    Completion::Boundary {
                        region: state.region,
                        result,
                    }
                }
                .boxed_local(),
            );
        }

        for circle in &scan.circles {
            self.renderer.draw_circle(&mut self.surface, circle);
            report.circles += 1;
        }

        pending.push(
            async move { Completion::Tournaments(fetcher.fetch(&feed_path).await) }.boxed_local(),
        );

        while let Some(completion) = pending.next().await {
            self.apply(completion, &mut report);
        }

        log::info!(
            "map ready: {} boundaries, {} circles, {} markers, {} dropped fetches",
            report.boundaries,
            report.circles,
            report.markers,
            report.dropped_fetches
        );
        report
    }

    /// Runs [`NotifyMap::initialize`] to completion on a current-thread runtime
    #[cfg(feature = "tokio-runtime")]
    pub fn initialize_blocking<T: HttpTransport>(
        &mut self,
        elements: &[MarkupElement],
        fetcher: &JsonFetcher<T>,
    ) -> crate::Result<InitReport> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.initialize(elements, fetcher)))
    }

    fn apply(&mut self, completion: Completion, report: &mut InitReport) {
        match completion {
            Completion::Boundary {
                region,
                result: Ok(paths),
            } => {
                self.renderer
                    .attach_boundary(&mut self.surface, &region, paths);
                report.boundaries += 1;
            }
            Completion::Tournaments(Ok(tournaments)) => {
                let placed = self.renderer.place_markers(
                    &mut self.surface,
                    &mut self.registry,
                    &mut self.popups,
                    &tournaments,
                    &mut self.rng,
                );
                report.markers += placed.len();
            }
            Completion::Boundary { result: Err(e), .. } | Completion::Tournaments(Err(e)) => {
                report.dropped_fetches += 1;
                self.drop_fetch(e);
            }
        }
    }

    fn drop_fetch(&mut self, error: FetchError) {
        log::debug!("dropping fetch: {}", error);
        if let Some(tx) = &self.errors {
            // receiver gone means nobody is observing any more
            if tx.unbounded_send(error).is_err() {
                self.errors = None;
            }
        }
    }

    /// Dispatches a user interaction
    pub fn handle_event(&mut self, event: MapEvent) -> EventHandled {
        match event {
            MapEvent::MarkerClicked(marker) => self
                .popups
                .open(&mut self.surface, marker)
                .into(),
            MapEvent::CheckboxToggled { name, checked } => {
                self.on_checkbox(&name, checked).is_some().into()
            }
        }
    }

    /// Legend checkbox handler: the checkbox name is a level code. Returns
    /// the number of markers touched, or `None` for names that are not a
    /// level.
    pub fn on_checkbox(&mut self, name: &str, checked: bool) -> Option<usize> {
        let level = match self.controls.set(name, checked) {
            Some(level) => level,
            None => {
                log::debug!("ignoring checkbox {:?}", name);
                return None;
            }
        };
        Some(self.set_level_visible(level, checked))
    }

    pub fn set_level_visible(&mut self, level: Level, visible: bool) -> usize {
        self.renderer
            .toggle(&mut self.surface, &self.registry, level, visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticTransport;
    use serde_json::json;

    fn transport() -> StaticTransport {
        StaticTransport::new()
            .with_json(
                "http://qb.test/static/upcoming.json",
                &json!([
                    {"id": 1, "name": "A", "date": "2018-02-03", "level": "H", "lat": 40.0, "lon": -75.0},
                    {"id": 2, "name": "B", "date": "2018-02-10", "level": "C", "lat": 40.0, "lon": -75.0}
                ]),
            )
            .with_json(
                "http://qb.test/static/polygons/PA.json",
                &json!([{"lat": 42.0, "lng": -80.5}, {"lat": 42.0, "lng": -75.0}, {"lat": 39.7, "lng": -75.0}]),
            )
    }

    fn widget() -> NotifyMap<HeadlessSurface> {
        NotifyMap::headless(WidgetConfig::default().with_origin("http://qb.test")).with_seed(3)
    }

    #[tokio::test]
    async fn test_initialize_draws_everything() {
        let mut map = widget();
        let fetcher = map.fetcher(transport());
        let elements = vec![
            MarkupElement::state("PA"),
            MarkupElement::state("DE"),
            MarkupElement::circle(40.0, -75.0, 1.0, Some("mi")),
        ];

        let report = map.initialize(&elements, &fetcher).await;

        assert_eq!(
            report,
            InitReport {
                boundaries: 1,
                circles: 1,
                markers: 2,
                dropped_fetches: 1,
            }
        );
        assert_eq!(map.surface().polygons().len(), 1);
        assert_eq!(map.surface().circles()[0].radius_m, 1609.3);
        assert_eq!(map.registry().len(), 2);
    }

    #[cfg(feature = "tokio-runtime")]
    #[test]
    fn test_initialize_blocking() {
        let mut map = widget();
        let fetcher = map.fetcher(transport());

        let report = map
            .initialize_blocking(&[MarkupElement::state("PA")], &fetcher)
            .unwrap();

        assert_eq!(report.boundaries, 1);
        assert_eq!(report.markers, 2);
        assert_eq!(map.surface().visible_marker_count(), 2);
    }

    #[test]
    fn test_new_applies_map_options() {
        let mut config = WidgetConfig::default();
        config.map.zoom = 7.0;
        config.map.map_type = "satellite".into();

        let map = NotifyMap::new(config.clone(), HeadlessSurface::new());

        assert_eq!(map.surface().options(), &config.map);
    }

    #[tokio::test]
    async fn test_error_channel_receives_dropped_fetches() {
        let mut map = widget();
        let mut errors = map.error_channel();
        let fetcher = map.fetcher(StaticTransport::new());

        let report = map.initialize(&[MarkupElement::state("NV")], &fetcher).await;

        assert_eq!(report.dropped_fetches, 2);
        let mut urls = Vec::new();
        while let Ok(Some(e)) = errors.try_next() {
            urls.push(e.url().to_string());
        }
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "http://qb.test/static/polygons/NV.json",
                "http://qb.test/static/upcoming.json"
            ]
        );
    }

    #[tokio::test]
    async fn test_click_opens_popup() {
        let mut map = widget();
        let fetcher = map.fetcher(transport());
        map.initialize(&[], &fetcher).await;

        let college = map.registry().bucket(Level::College)[0];
        assert!(map.handle_event(MapEvent::MarkerClicked(college)).handled());

        let window = map.surface().info_window();
        assert_eq!(window.anchor(), Some(college));
        let content = window.content().unwrap();
        assert_eq!(content.name, "B");
        assert_eq!(content.level_label, "College");
        assert_eq!(content.link, "http://hsquizbowl.org/db/tournaments/2");

        assert!(!map
            .handle_event(MapEvent::MarkerClicked(crate::layers::marker::MarkerId(42)))
            .handled());
    }

    #[tokio::test]
    async fn test_checkbox_toggle() {
        let mut map = widget();
        let fetcher = map.fetcher(transport());
        map.initialize(&[], &fetcher).await;

        let handled = map.handle_event(MapEvent::CheckboxToggled {
            name: "H".into(),
            checked: false,
        });
        assert!(handled.handled());
        assert_eq!(map.surface().visible_marker_count(), 1);
        assert!(!map.controls().is_checked(Level::HighSchool));

        assert_eq!(map.on_checkbox("Z", false), None);
        assert_eq!(map.on_checkbox("H", true), Some(1));
        assert_eq!(map.surface().visible_marker_count(), 2);
    }
}
