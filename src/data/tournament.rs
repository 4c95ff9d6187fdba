//! Tournament records from the upcoming-tournament feed.

use crate::{core::geo::LatLng, MapError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tournament category, used for icon selection and visibility bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "M")]
    MiddleSchool,
    #[serde(rename = "H")]
    HighSchool,
    #[serde(rename = "C")]
    College,
    #[serde(rename = "O")]
    Open,
    #[serde(rename = "T")]
    Trash,
}

impl Level {
    /// Every level, in legend order
    pub const ALL: [Level; 5] = [
        Level::MiddleSchool,
        Level::HighSchool,
        Level::College,
        Level::Open,
        Level::Trash,
    ];

    /// Single-letter code used in the feed, icon names and checkbox names
    pub fn code(&self) -> &'static str {
        match self {
            Level::MiddleSchool => "M",
            Level::HighSchool => "H",
            Level::College => "C",
            Level::Open => "O",
            Level::Trash => "T",
        }
    }

    /// Human-readable label shown in popups
    pub fn label(&self) -> &'static str {
        match self {
            Level::MiddleSchool => "Middle school",
            Level::HighSchool => "High school",
            Level::College => "College",
            Level::Open => "Open",
            Level::Trash => "Trash",
        }
    }

    /// Abbreviated label used in notification descriptions
    pub fn short_label(&self) -> &'static str {
        match self {
            Level::MiddleSchool => "MS",
            Level::HighSchool => "HS",
            Level::College => "College",
            Level::Open => "Open",
            Level::Trash => "Trash",
        }
    }

    pub fn from_code(code: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.code() == code)
    }
}

impl FromStr for Level {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Level::from_code(s).ok_or_else(|| MapError::UnknownLevel(s.to_string()))
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Region code the scraper assigns to tournaments held online
pub const ONLINE_REGION: &str = "Online";

/// One entry of the tournament feed.
///
/// The level is kept as the raw code so that one record with an unexpected
/// code does not make the whole feed undecodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    pub date: String,
    pub level: String,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Tournament {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    /// Calendar date of the event, `None` unless the feed gave `YYYY-MM-DD`
    pub fn held_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn is_online(&self) -> bool {
        self.state.as_deref() == Some(ONLINE_REGION)
    }

    /// Resolves the level code, failing for codes without a bucket
    pub fn level(&self) -> Result<Level> {
        self.level.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_codes_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_code(level.code()), Some(level));
        }
        assert_eq!(Level::from_code("X"), None);
        assert_eq!(Level::from_code("m"), None);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::MiddleSchool.label(), "Middle school");
        assert_eq!(Level::Trash.label(), "Trash");
        assert_eq!(Level::College.to_string(), "C");
        assert_eq!(Level::HighSchool.short_label(), "HS");
    }

    #[test]
    fn test_feed_parsing() {
        let feed = r#"[
            {"id": 4012, "name": "Fall Novice", "date": "2017-10-21", "level": "H", "state": "NY", "lat": 40.71, "lon": -74.0},
            {"id": 4013, "name": "Mystery", "date": "2017-10-22", "level": "Z", "lat": 41.0, "lon": -73.5}
        ]"#;
        let tournaments: Vec<Tournament> = serde_json::from_str(feed).unwrap();
        assert_eq!(tournaments.len(), 2);
        assert_eq!(tournaments[0].level().unwrap(), Level::HighSchool);
        assert_eq!(tournaments[0].position(), LatLng::new(40.71, -74.0));
        assert_eq!(tournaments[0].state.as_deref(), Some("NY"));
        assert_eq!(tournaments[1].state, None);
        assert_eq!(
            tournaments[0].held_on(),
            NaiveDate::from_ymd_opt(2017, 10, 21)
        );
        assert!(matches!(
            tournaments[1].level(),
            Err(MapError::UnknownLevel(code)) if code == "Z"
        ));
    }

    #[test]
    fn test_online_and_bad_dates() {
        let online: Tournament = serde_json::from_str(
            r#"{"id": 9, "name": "Online Open", "date": "soon", "level": "O", "state": "Online", "lat": 0.0, "lon": 0.0}"#,
        )
        .unwrap();
        assert!(online.is_online());
        assert_eq!(online.held_on(), None);
    }
}
