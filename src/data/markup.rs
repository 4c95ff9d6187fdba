//! Declarative markup scanning.
//!
//! The page carries one element per notification the user subscribed to.
//! Elements tagged `notify-state` name a region; elements tagged
//! `notify-circle` give a center and a radius with a unit. Attributes are not
//! validated: numbers are read from their leading digits the way a browser's
//! `parseFloat` reads them (`"25mi"` is 25), text with no leading number
//! becomes NaN, missing region codes become the empty string, and scanning
//! carries on.

use crate::core::{
    constants::{METERS_PER_FOOT, METERS_PER_KILOMETER, METERS_PER_MILE},
    geo::LatLng,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Class tag for state boundary notifications
pub const NOTIFY_STATE_CLASS: &str = "notify-state";

/// Class tag for radius notifications
pub const NOTIFY_CIRCLE_CLASS: &str = "notify-circle";

/// A markup element reduced to what the scanner reads: its class list and
/// its `data-*` attributes (without the `data-` prefix).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupElement {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub dataset: FxHashMap<String, String>,
}

impl MarkupElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.dataset.insert(key.to_string(), value.to_string());
        self
    }

    /// Shorthand for a `notify-state` element
    pub fn state(region: &str) -> Self {
        Self::new()
            .with_class(NOTIFY_STATE_CLASS)
            .with_data("state", region)
    }

    /// Shorthand for a `notify-circle` element
    pub fn circle(lat: f64, lng: f64, radius: f64, unit: Option<&str>) -> Self {
        let element = Self::new()
            .with_class(NOTIFY_CIRCLE_CLASS)
            .with_data("lat", &lat.to_string())
            .with_data("lng", &lng.to_string())
            .with_data("radius", &radius.to_string());
        match unit {
            Some(unit) => element.with_data("unit", unit),
            None => element,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// Numeric attribute; absent values and values without a leading
    /// number read as NaN
    fn data_f64(&self, key: &str) -> f64 {
        self.data(key).map(parse_float_prefix).unwrap_or(f64::NAN)
    }
}

/// Longest leading decimal literal of `text`, after leading whitespace.
fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Unit tag attached to a circle radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Miles,
    Feet,
    Kilometers,
    Meters,
}

impl DistanceUnit {
    /// Maps a markup tag to a unit; anything unrecognized, or no tag, is meters
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("mi") => DistanceUnit::Miles,
            Some("ft") => DistanceUnit::Feet,
            Some("km") => DistanceUnit::Kilometers,
            _ => DistanceUnit::Meters,
        }
    }

    pub fn meters_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Miles => METERS_PER_MILE,
            DistanceUnit::Feet => METERS_PER_FOOT,
            DistanceUnit::Kilometers => METERS_PER_KILOMETER,
            DistanceUnit::Meters => 1.0,
        }
    }

    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Short tag used when describing a radius
    pub fn tag(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
        }
    }
}

/// Requested state outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpec {
    pub region: String,
}

/// Requested radius annotation, already resolved to meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub center: LatLng,
    pub radius_m: f64,
}

impl CircleSpec {
    pub fn new(center: LatLng, radius: f64, unit: DistanceUnit) -> Self {
        Self {
            center,
            radius_m: unit.to_meters(radius),
        }
    }

    /// Strictly inside, by great-circle distance from the center
    pub fn contains(&self, point: &LatLng) -> bool {
        self.center.distance_to(point) < self.radius_m
    }
}

/// Everything the scanner found, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub states: Vec<StateSpec>,
    pub circles: Vec<CircleSpec>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.circles.is_empty()
    }
}

/// Extracts state and circle requests from markup elements.
pub fn scan(elements: &[MarkupElement]) -> ScanResult {
    let mut result = ScanResult::default();

    for element in elements {
        if element.has_class(NOTIFY_STATE_CLASS) {
            result.states.push(StateSpec {
                region: element.data("state").unwrap_or_default().to_string(),
            });
        }

        if element.has_class(NOTIFY_CIRCLE_CLASS) {
            result.circles.push(CircleSpec::new(
                LatLng::new(element.data_f64("lat"), element.data_f64("lng")),
                element.data_f64("radius"),
                DistanceUnit::from_tag(element.data("unit")),
            ));
        }
    }

    log::debug!(
        "scanned {} elements: {} states, {} circles",
        elements.len(),
        result.states.len(),
        result.circles.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius_of(radius: &str, unit: Option<&str>) -> f64 {
        let mut element = MarkupElement::new()
            .with_class(NOTIFY_CIRCLE_CLASS)
            .with_data("lat", "40")
            .with_data("lng", "-75")
            .with_data("radius", radius);
        if let Some(unit) = unit {
            element = element.with_data("unit", unit);
        }
        scan(&[element]).circles[0].radius_m
    }

    #[test]
    fn test_unit_conversion_factors() {
        assert_eq!(radius_of("1", Some("mi")), 1609.3);
        assert_eq!(radius_of("1", Some("ft")), 0.3048);
        assert_eq!(radius_of("5", Some("km")), 5000.0);
        assert_eq!(radius_of("3", None), 3.0);
        assert_eq!(radius_of("3", Some("furlong")), 3.0);
    }

    #[test]
    fn test_numbers_read_from_leading_digits() {
        assert_eq!(radius_of("25mi", Some("km")), 25000.0);
        assert_eq!(radius_of("  12.5 km", Some("km")), 12500.0);
        assert_eq!(radius_of("-3e2x", None), -300.0);
        assert_eq!(radius_of("4e", None), 4.0);
        assert_eq!(radius_of(".5", Some("km")), 500.0);
        assert_eq!(radius_of("Infinity", None), f64::INFINITY);
        assert!(radius_of("mi25", None).is_nan());
        assert!(radius_of(".", None).is_nan());
        assert!(radius_of("", None).is_nan());
    }

    #[test]
    fn test_circle_spec_contains() {
        let spec = CircleSpec::new(LatLng::new(40.0, -75.0), 1.0, DistanceUnit::Miles);
        assert_eq!(spec.radius_m, 1609.3);
        assert!(spec.contains(&LatLng::new(40.001, -75.0)));
        assert!(!spec.contains(&LatLng::new(40.1, -75.0)));
        assert!(!spec.contains(&spec.center.offset(1.0, 0.0)));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let result = scan(&[]);
        assert!(result.is_empty());

        let unrelated = MarkupElement::new().with_class("header");
        assert!(scan(&[unrelated]).is_empty());
    }

    #[test]
    fn test_malformed_attributes_degrade_silently() {
        let element = MarkupElement::new()
            .with_class(NOTIFY_CIRCLE_CLASS)
            .with_data("lat", "north")
            .with_data("radius", "12")
            .with_data("unit", "km");
        let result = scan(&[element, MarkupElement::new().with_class(NOTIFY_STATE_CLASS)]);

        let circle = &result.circles[0];
        assert!(circle.center.lat.is_nan());
        assert!(circle.center.lng.is_nan());
        assert_eq!(circle.radius_m, 12000.0);
        assert_eq!(result.states[0].region, "");
    }

    #[test]
    fn test_document_order_and_mixed_tags() {
        let elements = vec![
            MarkupElement::state("NY"),
            MarkupElement::circle(42.0, -71.0, 25.0, Some("mi")),
            MarkupElement::state("NJ"),
            MarkupElement::state("PA").with_class(NOTIFY_CIRCLE_CLASS),
        ];
        let result = scan(&elements);

        let regions: Vec<_> = result.states.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(regions, vec!["NY", "NJ", "PA"]);
        assert_eq!(result.circles.len(), 2);
        assert_eq!(result.circles[0].center, LatLng::new(42.0, -71.0));
        assert!(result.circles[1].radius_m.is_nan());
    }

    #[test]
    fn test_element_deserializes_from_json() {
        let element: MarkupElement = serde_json::from_str(
            r#"{"classes": ["notify-state"], "dataset": {"state": "OH"}}"#,
        )
        .unwrap();
        assert_eq!(scan(&[element]).states[0].region, "OH");
    }
}
