use crate::{
    core::map::MapSurface,
    data::tournament::Level,
    layers::marker::MarkerId,
};
use fxhash::FxHashMap;

/// Markers grouped by tournament level, for the legend checkboxes.
///
/// Every level has a bucket from the start. Buckets only grow; a marker is
/// registered in exactly one of them.
#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    buckets: FxHashMap<Level, Vec<MarkerId>>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            buckets: Level::ALL.into_iter().map(|level| (level, Vec::new())).collect(),
        }
    }

    pub fn register(&mut self, level: Level, marker: MarkerId) {
        self.buckets.entry(level).or_default().push(marker);
    }

    /// Markers of one level, in registration order
    pub fn bucket(&self, level: Level) -> &[MarkerId] {
        self.buckets.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn level_of(&self, marker: MarkerId) -> Option<Level> {
        self.buckets
            .iter()
            .find(|(_, markers)| markers.contains(&marker))
            .map(|(level, _)| *level)
    }

    /// Total number of registered markers
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shows or hides every marker of `level`; returns how many were touched
    pub fn set_visible<S: MapSurface + ?Sized>(
        &self,
        surface: &mut S,
        level: Level,
        visible: bool,
    ) -> usize {
        let markers = self.bucket(level);
        for &marker in markers {
            surface.set_marker_visible(marker, visible);
        }
        log::debug!(
            "{} {} markers of level {}",
            if visible { "showing" } else { "hiding" },
            markers.len(),
            level
        );
        markers.len()
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::LatLng, map::HeadlessSurface},
        layers::marker::Marker,
    };

    fn add(surface: &mut HeadlessSurface, registry: &mut MarkerRegistry, level: Level) -> MarkerId {
        let id = surface.add_marker(Marker::new(LatLng::default(), "t".into(), level));
        registry.register(level, id);
        id
    }

    #[test]
    fn test_new_registry_has_empty_bucket_per_level() {
        let registry = MarkerRegistry::new();
        assert!(registry.is_empty());
        for level in Level::ALL {
            assert!(registry.bucket(level).is_empty());
        }
    }

    #[test]
    fn test_toggle_touches_only_its_bucket() {
        let mut surface = HeadlessSurface::new();
        let mut registry = MarkerRegistry::new();
        let college = add(&mut surface, &mut registry, Level::College);
        let open = add(&mut surface, &mut registry, Level::Open);
        let college2 = add(&mut surface, &mut registry, Level::College);

        assert_eq!(registry.set_visible(&mut surface, Level::College, false), 2);

        assert!(!surface.marker(college).unwrap().visible);
        assert!(!surface.marker(college2).unwrap().visible);
        assert!(surface.marker(open).unwrap().visible);
        assert_eq!(registry.level_of(open), Some(Level::Open));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_toggle_empty_bucket_is_noop() {
        let mut surface = HeadlessSurface::new();
        let registry = MarkerRegistry::new();
        assert_eq!(registry.set_visible(&mut surface, Level::Trash, false), 0);
    }
}
