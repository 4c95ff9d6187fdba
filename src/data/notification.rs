//! Subscriber notifications and tournament matching.
//!
//! A notification pairs a set of levels with either a region code or a
//! radius around a point. Matching runs over a freshly scraped tournament
//! list and picks out what a subscriber should be told about.

use crate::{
    core::geo::LatLng,
    data::{
        markup::{CircleSpec, DistanceUnit, StateSpec},
        tournament::{Level, Tournament, ONLINE_REGION},
    },
};
use chrono::NaiveDate;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Levels a notification applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSet(FxHashSet<Level>);

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Level::ALL.into_iter().collect()
    }

    pub fn with(mut self, level: Level) -> Self {
        self.0.insert(level);
        self
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0.contains(&level)
    }

    /// Members in legend order
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|level| self.contains(*level))
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a notification watches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotifyTarget {
    /// Tournaments assigned to one region code
    State(StateSpec),
    /// Tournaments within a radius. `radius` and `unit` are kept as entered
    /// for display; matching uses the resolved `area`.
    Circle {
        area: CircleSpec,
        radius: f64,
        unit: DistanceUnit,
        #[serde(default)]
        display_name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub levels: LevelSet,
    pub target: NotifyTarget,
}

impl Notification {
    pub fn state(region: impl Into<String>, levels: LevelSet) -> Self {
        Self {
            levels,
            target: NotifyTarget::State(StateSpec {
                region: region.into(),
            }),
        }
    }

    pub fn circle(center: LatLng, radius: f64, unit: DistanceUnit, levels: LevelSet) -> Self {
        Self {
            levels,
            target: NotifyTarget::Circle {
                area: CircleSpec::new(center, radius, unit),
                radius,
                unit,
                display_name: None,
            },
        }
    }

    /// Names the circle's center, e.g. the address it was geocoded from.
    /// No effect on state notifications.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        if let NotifyTarget::Circle { display_name, .. } = &mut self.target {
            *display_name = Some(name.into());
        }
        self
    }

    /// Whether `tournament` should be reported, given today's date.
    pub fn matches(&self, tournament: &Tournament, today: NaiveDate) -> bool {
        let level_ok = tournament
            .level()
            .map(|level| self.levels.contains(level))
            .unwrap_or(false);
        let upcoming = tournament.held_on().map_or(false, |date| date > today);
        if !level_ok || !upcoming {
            return false;
        }

        match &self.target {
            NotifyTarget::State(spec) => tournament.state.as_deref() == Some(spec.region.as_str()),
            // coordinates of online tournaments are meaningless
            NotifyTarget::Circle { area, .. } => {
                !tournament.is_online() && area.contains(&tournament.position())
            }
        }
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self
            .levels
            .iter()
            .map(|level| level.short_label().to_string())
            .collect();
        if names.len() > 1 {
            if let Some(last) = names.last_mut() {
                *last = format!("and {}", last);
            }
        }
        let levels = if names.len() > 2 {
            names.join(", ")
        } else {
            names.join(" ")
        };

        match &self.target {
            NotifyTarget::State(spec) if spec.region == ONLINE_REGION => {
                write!(f, "Online {} tournaments", levels)
            }
            NotifyTarget::State(spec) => write!(f, "{} tournaments in {}", levels, spec.region),
            NotifyTarget::Circle {
                area,
                radius,
                unit,
                display_name,
            } => {
                write!(f, "{} tournaments within {} {} of ", levels, radius, unit.tag())?;
                if let Some(name) = display_name {
                    write!(f, "{} ", name)?;
                }
                write!(f, "({}, {})", area.center.lat, area.center.lng)
            }
        }
    }
}

/// Every tournament matched by at least one notification, once each, in
/// feed order.
pub fn matching<'a>(
    notifications: &[Notification],
    tournaments: &'a [Tournament],
    today: NaiveDate,
) -> Vec<&'a Tournament> {
    let mut seen = FxHashSet::default();
    let matched: Vec<&Tournament> = tournaments
        .iter()
        .filter(|t| notifications.iter().any(|n| n.matches(t, today)))
        .filter(|t| seen.insert(t.id))
        .collect();
    log::debug!(
        "{} of {} tournaments matched {} notifications",
        matched.len(),
        tournaments.len(),
        notifications.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 3, 1).unwrap()
    }

    fn tournament(id: u64, level: &str, state: &str, date: &str, lat: f64, lon: f64) -> Tournament {
        Tournament {
            id,
            name: format!("T{}", id),
            date: date.into(),
            level: level.into(),
            state: Some(state.into()),
            lat,
            lon,
        }
    }

    fn hs_college() -> LevelSet {
        LevelSet::new()
            .with(Level::HighSchool)
            .with(Level::College)
    }

    #[test]
    fn test_state_match_rules() {
        let note = Notification::state("NY", hs_college());

        assert!(note.matches(&tournament(1, "H", "NY", "2018-03-10", 0.0, 0.0), today()));
        // wrong region, case matters
        assert!(!note.matches(&tournament(2, "H", "NJ", "2018-03-10", 0.0, 0.0), today()));
        assert!(!note.matches(&tournament(3, "H", "ny", "2018-03-10", 0.0, 0.0), today()));
        // level not subscribed, or unknown
        assert!(!note.matches(&tournament(4, "M", "NY", "2018-03-10", 0.0, 0.0), today()));
        assert!(!note.matches(&tournament(5, "X", "NY", "2018-03-10", 0.0, 0.0), today()));
        // held today or earlier, or undated
        assert!(!note.matches(&tournament(6, "C", "NY", "2018-03-01", 0.0, 0.0), today()));
        assert!(!note.matches(&tournament(7, "C", "NY", "2017-11-04", 0.0, 0.0), today()));
        assert!(!note.matches(&tournament(8, "C", "NY", "TBA", 0.0, 0.0), today()));

        let mut stateless = tournament(9, "H", "NY", "2018-03-10", 0.0, 0.0);
        stateless.state = None;
        assert!(!note.matches(&stateless, today()));
    }

    #[test]
    fn test_online_state_match() {
        let note = Notification::state(ONLINE_REGION, LevelSet::all());
        assert!(note.matches(
            &tournament(1, "O", "Online", "2018-04-01", 0.0, 0.0),
            today()
        ));
    }

    #[test]
    fn test_circle_match_rules() {
        // 25 mi around Philadelphia
        let note = Notification::circle(
            LatLng::new(39.95, -75.16),
            25.0,
            DistanceUnit::Miles,
            hs_college(),
        );

        // Cherry Hill, ~10 mi
        assert!(note.matches(&tournament(1, "H", "NJ", "2018-03-10", 39.93, -75.0), today()));
        // Lancaster, ~60 mi
        assert!(!note.matches(&tournament(2, "H", "PA", "2018-03-10", 40.04, -76.31), today()));
        // in range but wrong level or past
        assert!(!note.matches(&tournament(3, "T", "PA", "2018-03-10", 39.95, -75.16), today()));
        assert!(!note.matches(&tournament(4, "C", "PA", "2018-02-10", 39.95, -75.16), today()));
        // online events sit wherever the scraper put them
        assert!(!note.matches(&tournament(5, "C", "Online", "2018-03-10", 39.95, -75.16), today()));
    }

    #[test]
    fn test_circle_units() {
        let center = LatLng::new(0.0, 0.0);
        // one degree of latitude on the mean sphere is ~111.195 km
        let one_degree = tournament(1, "O", "XX", "2018-06-01", 1.0, 0.0);
        let open = LevelSet::new().with(Level::Open);

        let km = |r: f64| Notification::circle(center, r, DistanceUnit::Kilometers, open.clone());
        assert!(km(111.2).matches(&one_degree, today()));
        assert!(!km(111.19).matches(&one_degree, today()));

        let mi = Notification::circle(center, 70.0, DistanceUnit::Miles, open.clone());
        assert!(mi.matches(&one_degree, today()));
        let ft = Notification::circle(center, 364_000.0, DistanceUnit::Feet, open.clone());
        assert!(!ft.matches(&one_degree, today()));
        let m = Notification::circle(center, 111_200.0, DistanceUnit::Meters, open);
        assert!(m.matches(&one_degree, today()));
    }

    #[test]
    fn test_matching_dedupes_in_feed_order() {
        let notes = vec![
            Notification::state("PA", LevelSet::all()),
            Notification::circle(
                LatLng::new(39.95, -75.16),
                50.0,
                DistanceUnit::Kilometers,
                LevelSet::all(),
            ),
        ];
        let feed = vec![
            tournament(3, "H", "NJ", "2018-03-10", 39.93, -75.0),
            tournament(1, "H", "PA", "2018-03-10", 39.95, -75.16),
            tournament(2, "H", "OH", "2018-03-10", 40.0, -83.0),
        ];

        let ids: Vec<u64> = matching(&notes, &feed, today()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(matching(&[], &feed, today()).is_empty());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            Notification::state("NY", hs_college()).describe(),
            "HS and College tournaments in NY"
        );
        assert_eq!(
            Notification::state(ONLINE_REGION, LevelSet::new().with(Level::Trash)).describe(),
            "Online Trash tournaments"
        );
        let three = LevelSet::new()
            .with(Level::College)
            .with(Level::MiddleSchool)
            .with(Level::HighSchool);
        assert_eq!(
            Notification::state("OH", three).describe(),
            "MS, HS, and College tournaments in OH"
        );
        let circle = Notification::circle(
            LatLng::new(39.95, -75.16),
            25.0,
            DistanceUnit::Miles,
            hs_college(),
        );
        assert_eq!(
            circle.describe(),
            "HS and College tournaments within 25 mi of (39.95, -75.16)"
        );
        assert_eq!(
            circle.with_display_name("Philadelphia").describe(),
            "HS and College tournaments within 25 mi of Philadelphia (39.95, -75.16)"
        );
    }

    #[test]
    fn test_notification_deserializes() {
        let note: Notification = serde_json::from_str(
            r#"{
                "levels": ["H", "O"],
                "target": {"kind": "state", "region": "MD"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            note,
            Notification::state("MD", LevelSet::new().with(Level::HighSchool).with(Level::Open))
        );
    }
}
