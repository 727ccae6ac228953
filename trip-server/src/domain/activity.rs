//! Activity types.
//!
//! An `Activity` is one bookable unit within a day: a flight, a hotel
//! stay or an excursion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid activity id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid activity id: {reason}")]
pub struct InvalidActivityId {
    reason: &'static str,
}

/// Maximum length of an activity id.
const MAX_ID_LEN: usize = 64;

/// A validated activity identifier.
///
/// Ids are non-empty, at most 64 bytes, and consist of lowercase ASCII
/// letters, digits, `-` and `_`. Selection state is keyed by these ids,
/// so they must be unique across a whole trip (enforced by `Itinerary`).
///
/// # Examples
///
/// ```
/// use trip_server::domain::ActivityId;
///
/// let id = ActivityId::parse("spicefarm").unwrap();
/// assert_eq!(id.as_str(), "spicefarm");
///
/// assert!(ActivityId::parse("").is_err());
/// assert!(ActivityId::parse("Spice Farm").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityId(String);

impl ActivityId {
    /// Parse an activity id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidActivityId> {
        if s.is_empty() {
            return Err(InvalidActivityId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ID_LEN {
            return Err(InvalidActivityId {
                reason: "must be at most 64 characters",
            });
        }

        let valid = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !valid {
            return Err(InvalidActivityId {
                reason: "must be lowercase ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(ActivityId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityId {
    type Error = InvalidActivityId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ActivityId::parse(&s)
    }
}

impl From<ActivityId> for String {
    fn from(id: ActivityId) -> Self {
        id.0
    }
}

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", self.0)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of booking an activity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Transport,
    Accommodation,
    Activity,
}

impl ActivityKind {
    /// Label used by the cart for this kind of booking.
    pub fn cart_label(&self) -> &'static str {
        match self {
            ActivityKind::Transport => "Transport",
            ActivityKind::Accommodation => "Accommodation",
            ActivityKind::Activity => "Activities",
        }
    }
}

/// Where an activity takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            address: address.into(),
        }
    }
}

/// One bookable unit within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique id within the trip
    pub id: ActivityId,

    /// Display time, e.g. "10:00 AM"
    pub time: String,

    pub title: String,

    pub description: String,

    /// Cost in whole currency units
    pub cost: u64,

    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// Less-touristy recommendation; display only
    #[serde(default)]
    pub hidden_gem: bool,

    /// Free-text rationale, used when no explanation record exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_this: Option<String>,

    /// Known location, if any; map projection falls back without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Activity {
    /// Creates an activity with no hidden-gem flag and no rationale.
    pub fn new(
        id: ActivityId,
        time: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        cost: u64,
        kind: ActivityKind,
    ) -> Self {
        Self {
            id,
            time: time.into(),
            title: title.into(),
            description: description.into(),
            cost,
            kind,
            hidden_gem: false,
            why_this: None,
            location: None,
        }
    }

    /// Marks the activity as a hidden gem.
    pub fn hidden_gem(mut self) -> Self {
        self.hidden_gem = true;
        self
    }

    /// Attaches a free-text rationale.
    pub fn with_why_this(mut self, why: impl Into<String>) -> Self {
        self.why_this = Some(why.into());
        self
    }

    /// Attaches a location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(ActivityId::parse("arrival").is_ok());
        assert!(ActivityId::parse("old-goa").is_ok());
        assert!(ActivityId::parse("leisure_day3").is_ok());
        assert!(ActivityId::parse("a").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(ActivityId::parse("").is_err());
    }

    #[test]
    fn reject_bad_characters() {
        assert!(ActivityId::parse("Beach").is_err());
        assert!(ActivityId::parse("old goa").is_err());
        assert!(ActivityId::parse("café").is_err());
        assert!(ActivityId::parse("a/b").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "a".repeat(65);
        assert!(ActivityId::parse(&long).is_err());
        assert!(ActivityId::parse(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn display_and_debug() {
        let id = ActivityId::parse("checkin").unwrap();
        assert_eq!(format!("{}", id), "checkin");
        assert_eq!(format!("{:?}", id), "ActivityId(checkin)");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ActivityKind::Accommodation).unwrap();
        assert_eq!(json, "\"accommodation\"");

        let kind: ActivityKind = serde_json::from_str("\"transport\"").unwrap();
        assert_eq!(kind, ActivityKind::Transport);
    }

    #[test]
    fn activity_deserializes_with_defaults() {
        let json = r#"{
            "id": "beach",
            "time": "4:00 PM",
            "title": "Explore Calangute Beach",
            "description": "Relax and enjoy water sports",
            "cost": 1200,
            "type": "activity"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id.as_str(), "beach");
        assert_eq!(activity.kind, ActivityKind::Activity);
        assert!(!activity.hidden_gem);
        assert!(activity.why_this.is_none());
        assert!(activity.location.is_none());
    }

    #[test]
    fn activity_rejects_invalid_id() {
        let json = r#"{
            "id": "Not Valid",
            "time": "",
            "title": "",
            "description": "",
            "cost": 0,
            "type": "activity"
        }"#;
        assert!(serde_json::from_str::<Activity>(json).is_err());
    }

    #[test]
    fn builder_helpers() {
        let a = Activity::new(
            ActivityId::parse("spicefarm").unwrap(),
            "2:00 PM",
            "Sahakari Spice Farm Experience",
            "Spice plantation tour",
            1500,
            ActivityKind::Activity,
        )
        .hidden_gem()
        .with_why_this("Hidden gem")
        .at(Location::new(15.382, 74.15, "Sahakari Spice Farm, Goa"));

        assert!(a.hidden_gem);
        assert_eq!(a.location.as_ref().unwrap().address, "Sahakari Spice Farm, Goa");
        assert_eq!(a.why_this.as_deref(), Some("Hidden gem"));
    }
}
