use std::fmt;

use serde::{Deserialize, Serialize};

/// Timestamp exactly as written in the export. Never parsed; only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One monthly location-history document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument {
    #[serde(default)]
    pub timeline_objects: Vec<TimelineObject>,
}

/// Raw timeline entry. Use [`TimelineObject::entry`] rather than the fields directly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineObject {
    #[serde(default)]
    pub activity_segment: Option<ActivitySegment>,
    #[serde(default)]
    pub place_visit: Option<PlaceVisit>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEntry<'a> {
    Activity(&'a ActivitySegment),
    Place(&'a PlaceVisit),
    Untagged,
}

impl TimelineObject {
    pub fn activity(segment: ActivitySegment) -> Self {
        Self {
            activity_segment: Some(segment),
            place_visit: None,
        }
    }

    pub fn place(visit: PlaceVisit) -> Self {
        Self {
            activity_segment: None,
            place_visit: Some(visit),
        }
    }

    /// Activity wins when an object carries both keys, so an entry is never counted twice.
    pub fn entry(&self) -> TimelineEntry<'_> {
        match (&self.activity_segment, &self.place_visit) {
            (Some(segment), _) => TimelineEntry::Activity(segment),
            (None, Some(visit)) => TimelineEntry::Place(visit),
            (None, None) => TimelineEntry::Untagged,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    #[serde(default)]
    pub start_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub end_timestamp: Option<Timestamp>,
}

impl Duration {
    pub fn new(start: impl Into<Timestamp>, end: impl Into<Timestamp>) -> Self {
        Self {
            start_timestamp: Some(start.into()),
            end_timestamp: Some(end.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySegment {
    #[serde(default)]
    pub duration: Option<Duration>,
    /// Meters travelled.
    #[serde(default)]
    pub distance: Option<f64>,
}

impl ActivitySegment {
    pub fn start_time(&self) -> Option<&Timestamp> {
        self.duration.as_ref()?.start_timestamp.as_ref()
    }

    pub fn end_time(&self) -> Option<&Timestamp> {
        self.duration.as_ref()?.end_timestamp.as_ref()
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceVisit {
    #[serde(default)]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl PlaceVisit {
    pub fn visit_start_time(&self) -> Option<&Timestamp> {
        self.duration.as_ref()?.start_timestamp.as_ref()
    }

    pub fn visit_end_time(&self) -> Option<&Timestamp> {
        self.duration.as_ref()?.end_timestamp.as_ref()
    }

    pub fn address(&self) -> Option<&str> {
        self.location.as_ref()?.address.as_deref()
    }
}
