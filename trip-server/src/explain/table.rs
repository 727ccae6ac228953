//! Static explanation records keyed by activity id.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, ActivityId, InvalidActivityId};

/// Errors from loading an explanation table.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// The table file could not be read
    #[error("failed to read explanation table: {0}")]
    Io(#[from] std::io::Error),

    /// The table file is not valid JSON of the expected shape
    #[error("invalid explanation table: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share an activity id
    #[error("duplicate explanation for activity {0}")]
    Duplicate(ActivityId),

    #[error(transparent)]
    Id(#[from] InvalidActivityId),

    #[error(transparent)]
    Confidence(#[from] InvalidConfidence),
}

/// Error returned for a confidence outside 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("confidence must be between 0 and 100, got {0}")]
pub struct InvalidConfidence(u8);

/// A match confidence as a whole percentage (0..=100).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(percent: u8) -> Result<Self, InvalidConfidence> {
        if percent > 100 {
            return Err(InvalidConfidence(percent));
        }
        Ok(Confidence(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Confidence {
    type Error = InvalidConfidence;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Confidence::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({}%)", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The kind of argument a reason makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCategory {
    Price,
    Schedule,
    Preference,
    HiddenValue,
    Satisfaction,
}

/// One line of rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub category: ReasonCategory,
    pub title: String,
    pub description: String,
}

impl Reason {
    fn new(category: ReasonCategory, title: &str, description: &str) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Why an activity was recommended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub activity_id: ActivityId,
    pub reasons: Vec<Reason>,
    pub confidence: Confidence,
}

/// The best available rationale for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rationale<'a> {
    /// A structured explanation record.
    Explained(&'a Explanation),
    /// Only the activity's own free-text note.
    Note(&'a str),
}

/// Deterministic table of explanations keyed by activity id.
///
/// Lookups never invent a placeholder: ids without a record are absent.
#[derive(Debug, Clone, Default)]
pub struct ExplanationTable {
    entries: HashMap<ActivityId, Explanation>,
}

impl ExplanationTable {
    /// Build a table from records, rejecting duplicate ids.
    pub fn from_records(records: Vec<Explanation>) -> Result<Self, ExplainError> {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.activity_id.clone();
            if entries.insert(id.clone(), record).is_some() {
                return Err(ExplainError::Duplicate(id));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of explanation records.
    pub fn from_json(json: &str) -> Result<Self, ExplainError> {
        let records: Vec<Explanation> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Load a JSON table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExplainError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The built-in table shipped with the planner.
    ///
    /// Records go through the same validation as loaded ones, so a bad
    /// built-in id or confidence is an error rather than a missing entry.
    pub fn builtin() -> Result<Self, ExplainError> {
        use ReasonCategory::*;

        let record = |id: &str, confidence: u8, reasons: Vec<Reason>| {
            Ok::<_, ExplainError>(Explanation {
                activity_id: ActivityId::parse(id)?,
                reasons,
                confidence: Confidence::new(confidence)?,
            })
        };

        let records = [
            record(
                "arrival",
                92,
                vec![
                    Reason::new(
                        Price,
                        "Best Price-Time Ratio",
                        "This flight offers 35% savings compared to premium options while maintaining convenient timing.",
                    ),
                    Reason::new(
                        Schedule,
                        "Optimal Schedule",
                        "Arrives at 10 AM allowing full day utilization without early morning rush.",
                    ),
                ],
            ),
            record(
                "checkin",
                88,
                vec![
                    Reason::new(
                        Price,
                        "Budget Sweet Spot",
                        "Perfect balance of luxury amenities within your ₹3500/night accommodation budget.",
                    ),
                    Reason::new(
                        Preference,
                        "Matches Preferences",
                        "Beachfront location aligns with your beach and relaxation interests.",
                    ),
                    Reason::new(
                        HiddenValue,
                        "Hidden Value",
                        "Local gem with private beach access that most tourists miss.",
                    ),
                ],
            ),
            record(
                "beach",
                94,
                vec![
                    Reason::new(
                        Preference,
                        "Interest Match",
                        "Water sports and beach activities perfectly match your adventure preferences.",
                    ),
                    Reason::new(
                        Satisfaction,
                        "High Satisfaction",
                        "96% traveler satisfaction rate for similar profiles.",
                    ),
                ],
            ),
        ];

        Self::from_records(records.into_iter().collect::<Result<Vec<_>, _>>()?)
    }

    /// Look up the explanation for an activity, if one exists.
    pub fn lookup(&self, id: &ActivityId) -> Option<&Explanation> {
        self.entries.get(id)
    }

    /// The explanation record if present, else the activity's own note.
    pub fn rationale<'a>(&'a self, activity: &'a Activity) -> Option<Rationale<'a>> {
        if let Some(explanation) = self.lookup(&activity.id) {
            return Some(Rationale::Explained(explanation));
        }
        activity.why_this.as_deref().map(Rationale::Note)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityKind;
    use std::io::Write;

    fn id(s: &str) -> ActivityId {
        ActivityId::parse(s).unwrap()
    }

    #[test]
    fn builtin_entries() {
        let table = ExplanationTable::builtin().unwrap();
        assert_eq!(table.len(), 3);

        let arrival = table.lookup(&id("arrival")).unwrap();
        assert_eq!(arrival.confidence.percent(), 92);
        assert_eq!(arrival.reasons.len(), 2);
        assert_eq!(arrival.reasons[0].category, ReasonCategory::Price);
        assert_eq!(arrival.reasons[0].title, "Best Price-Time Ratio");

        let checkin = table.lookup(&id("checkin")).unwrap();
        assert_eq!(checkin.confidence.percent(), 88);
        let titles: Vec<&str> = checkin.reasons.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Budget Sweet Spot", "Matches Preferences", "Hidden Value"]
        );

        assert_eq!(table.lookup(&id("beach")).unwrap().confidence.percent(), 94);
    }

    #[test]
    fn builtin_keeps_every_record() {
        let table = ExplanationTable::builtin().unwrap();
        let mut ids: Vec<(&str, u8)> = table
            .entries
            .values()
            .map(|e| (e.activity_id.as_str(), e.confidence.percent()))
            .collect();
        ids.sort();
        assert_eq!(ids, vec![("arrival", 92), ("beach", 94), ("checkin", 88)]);
    }

    #[test]
    fn record_errors_pass_through() {
        let err: ExplainError = Confidence::new(101).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "confidence must be between 0 and 100, got 101"
        );
    }

    #[test]
    fn unknown_id_is_absent() {
        let table = ExplanationTable::builtin().unwrap();
        assert!(table.lookup(&id("spicefarm")).is_none());
        assert!(table.lookup(&id("nowhere")).is_none());
        assert!(ExplanationTable::default().lookup(&id("arrival")).is_none());
    }

    #[test]
    fn confidence_bounds() {
        assert!(Confidence::new(0).is_ok());
        assert!(Confidence::new(100).is_ok());
        assert_eq!(Confidence::new(101), Err(InvalidConfidence(101)));
        assert_eq!(format!("{}", Confidence::new(88).unwrap()), "88%");
    }

    #[test]
    fn rationale_prefers_table() {
        let table = ExplanationTable::builtin().unwrap();
        let beach = Activity::new(id("beach"), "", "", "", 0, ActivityKind::Activity)
            .with_why_this("Popular beach");
        assert!(matches!(
            table.rationale(&beach),
            Some(Rationale::Explained(e)) if e.confidence.percent() == 94
        ));

        let farm = Activity::new(id("spicefarm"), "", "", "", 0, ActivityKind::Activity)
            .with_why_this("Hidden gem");
        assert_eq!(table.rationale(&farm), Some(Rationale::Note("Hidden gem")));

        let bare = Activity::new(id("bare"), "", "", "", 0, ActivityKind::Activity);
        assert_eq!(table.rationale(&bare), None);
    }

    #[test]
    fn from_json() {
        let json = r#"[
            {
                "activity_id": "spicefarm",
                "reasons": [
                    {"category": "hidden_value", "title": "Authentic", "description": "Family-run farm"}
                ],
                "confidence": 81
            }
        ]"#;
        let table = ExplanationTable::from_json(json).unwrap();
        let e = table.lookup(&id("spicefarm")).unwrap();
        assert_eq!(e.confidence.percent(), 81);
        assert_eq!(e.reasons[0].category, ReasonCategory::HiddenValue);
    }

    #[test]
    fn from_json_rejects_bad_confidence() {
        let json = r#"[{"activity_id": "x", "reasons": [], "confidence": 150}]"#;
        assert!(matches!(
            ExplanationTable::from_json(json),
            Err(ExplainError::Json(_))
        ));
    }

    #[test]
    fn from_json_rejects_duplicates() {
        let json = r#"[
            {"activity_id": "x", "reasons": [], "confidence": 50},
            {"activity_id": "x", "reasons": [], "confidence": 60}
        ]"#;
        assert!(matches!(
            ExplanationTable::from_json(json),
            Err(ExplainError::Duplicate(d)) if d.as_str() == "x"
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"activity_id": "oldgoa", "reasons": [], "confidence": 77}}]"#
        )
        .unwrap();

        let table = ExplanationTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.lookup(&id("oldgoa")).is_some());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExplanationTable::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ExplainError::Io(_))));
    }
}
