//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, ActivityKind, CostBreakdown, Day};
use crate::explain::{ExplanationTable, Rationale, Reason};
use crate::planner::{Interest, TripPreferences};
use crate::selection::{Selection, ToggleOutcome};
use crate::session::{Notification, Screen, TripSession};

/// Request to leave the landing screen.
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    /// Pre-fill the wizard with the demo trip
    #[serde(default)]
    pub demo: bool,
}

/// Where the session is now.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub screen: Screen,
    pub demo: bool,
    pub preferences: TripPreferences,
}

impl SessionResponse {
    pub fn from_session(session: &TripSession) -> Self {
        Self {
            screen: session.screen(),
            demo: session.is_demo(),
            preferences: session.preferences().clone(),
        }
    }
}

/// Request to add or remove a wizard interest.
#[derive(Debug, Deserialize)]
pub struct InterestRequest {
    pub interest: Interest,
}

/// Request to select or deselect an activity.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    /// Activity id
    pub id: String,
}

/// Result of a toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// "added", "removed" or "unknown"
    pub outcome: &'static str,
    pub selected_count: usize,
    pub selected_cost: u64,
}

impl ToggleResponse {
    pub fn new(outcome: ToggleOutcome, selection: &Selection) -> Self {
        let outcome = match outcome {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
            ToggleOutcome::Unknown => "unknown",
        };
        Self {
            outcome,
            selected_count: selection.selected_count(),
            selected_cost: selection.selected_cost(),
        }
    }
}

/// An activity in the itinerary view.
#[derive(Debug, Serialize)]
pub struct ActivityResult {
    pub id: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub cost: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub hidden_gem: bool,
    /// True when a "why this?" rationale is available
    pub explained: bool,
    pub selected: bool,
}

impl ActivityResult {
    fn from_activity(activity: &Activity, selection: &Selection, table: &ExplanationTable) -> Self {
        Self {
            id: activity.id.to_string(),
            time: activity.time.clone(),
            title: activity.title.clone(),
            description: activity.description.clone(),
            cost: activity.cost,
            kind: activity.kind,
            hidden_gem: activity.hidden_gem,
            explained: table.rationale(activity).is_some(),
            selected: selection.is_selected(&activity.id),
        }
    }
}

/// A day in the itinerary view.
#[derive(Debug, Serialize)]
pub struct DayResult {
    pub day: u32,
    /// Display date, e.g. "Dec 20, 2024"
    pub date: String,
    pub cost: u64,
    pub activities: Vec<ActivityResult>,
}

impl DayResult {
    fn from_day(day: &Day, selection: &Selection, table: &ExplanationTable) -> Self {
        Self {
            day: day.day,
            date: day.date_label(),
            cost: day.cost(),
            activities: day
                .activities
                .iter()
                .map(|a| ActivityResult::from_activity(a, selection, table))
                .collect(),
        }
    }
}

/// The itinerary view.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub destination: String,
    pub duration: usize,
    pub total_budget: u64,
    pub planned_cost: u64,
    pub breakdown: CostBreakdown,
    pub hidden_gems: usize,
    pub days: Vec<DayResult>,
    pub selected_count: usize,
    pub selected_cost: u64,
}

impl ItineraryResponse {
    pub fn build(selection: &Selection, table: &ExplanationTable) -> Self {
        let itinerary = selection.itinerary();
        Self {
            destination: itinerary.destination().to_string(),
            duration: itinerary.duration(),
            total_budget: itinerary.total_budget(),
            planned_cost: itinerary.planned_cost(),
            breakdown: itinerary.cost_by_kind(),
            hidden_gems: itinerary.hidden_gems().count(),
            days: itinerary
                .days()
                .iter()
                .map(|d| DayResult::from_day(d, selection, table))
                .collect(),
            selected_count: selection.selected_count(),
            selected_cost: selection.selected_cost(),
        }
    }
}

/// Rationale for an activity.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RationaleResult {
    Explained { confidence: u8, reasons: Vec<Reason> },
    Note { text: String },
    None,
}

impl From<Option<Rationale<'_>>> for RationaleResult {
    fn from(rationale: Option<Rationale<'_>>) -> Self {
        match rationale {
            Some(Rationale::Explained(e)) => RationaleResult::Explained {
                confidence: e.confidence.percent(),
                reasons: e.reasons.clone(),
            },
            Some(Rationale::Note(text)) => RationaleResult::Note {
                text: text.to_string(),
            },
            None => RationaleResult::None,
        }
    }
}

/// "Why this?" response.
#[derive(Debug, Serialize)]
pub struct ExplanationResponse {
    pub activity_id: String,
    #[serde(flatten)]
    pub rationale: RationaleResult,
}

/// Pending notifications.
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityId;
    use crate::planner::{PlannerConfig, plan_itinerary};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn selection() -> Selection {
        let start = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let trip =
            plan_itinerary(&TripPreferences::demo(), start, &PlannerConfig::default()).unwrap();
        Selection::new(Arc::new(trip))
    }

    #[test]
    fn itinerary_view_marks_selection_and_explanations() {
        let mut selection = selection();
        selection.toggle(&ActivityId::parse("checkin").unwrap());
        let view = ItineraryResponse::build(&selection, &ExplanationTable::builtin().unwrap());

        assert_eq!(view.destination, "Goa");
        assert_eq!(view.days.len(), 5);
        assert_eq!(view.days[0].date, "Dec 20, 2024");
        assert_eq!(view.selected_count, 1);

        let checkin = &view.days[0].activities[1];
        assert_eq!(checkin.id, "checkin");
        assert!(checkin.selected);
        assert!(checkin.explained);
        assert!(!view.days[0].activities[0].selected);
        assert_eq!(view.breakdown.total(), view.planned_cost);
    }

    #[test]
    fn itinerary_view_json_shape() {
        let view = ItineraryResponse::build(&selection(), &ExplanationTable::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["days"][0]["activities"][0]["type"], "transport");
        assert_eq!(json["days"][0]["activities"][1]["hidden_gem"], true);
    }

    #[test]
    fn toggle_response_outcomes() {
        let mut selection = selection();
        let id = ActivityId::parse("beach").unwrap();
        let outcome = selection.toggle(&id);
        let response = ToggleResponse::new(outcome, &selection);
        assert_eq!(response.outcome, "added");
        assert_eq!(response.selected_cost, 1200);
    }

    #[test]
    fn rationale_serialization() {
        let json = serde_json::to_value(ExplanationResponse {
            activity_id: "x".to_string(),
            rationale: RationaleResult::Note {
                text: "because".to_string(),
            },
        })
        .unwrap();
        assert_eq!(json["kind"], "note");
        assert_eq!(json["text"], "because");

        let json = serde_json::to_value(ExplanationResponse {
            activity_id: "x".to_string(),
            rationale: RationaleResult::None,
        })
        .unwrap();
        assert_eq!(json["kind"], "none");
    }
}
