//! Selection of activities for booking.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Activity, ActivityId, Itinerary};

use super::pricing::{CartTotals, TaxPolicy};

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The activity was not selected and now is.
    Added,
    /// The activity was selected and no longer is.
    Removed,
    /// The id is not in the itinerary; nothing changed.
    Unknown,
}

/// The set of activities chosen for booking, over one itinerary snapshot.
///
/// Totals are always recomputed from the itinerary rather than cached,
/// so they can never go stale relative to it.
#[derive(Debug, Clone)]
pub struct Selection {
    itinerary: Arc<Itinerary>,
    selected: HashSet<ActivityId>,
}

impl Selection {
    /// Create an empty selection over an itinerary.
    pub fn new(itinerary: Arc<Itinerary>) -> Self {
        Self {
            itinerary,
            selected: HashSet::new(),
        }
    }

    /// The itinerary this selection refers to.
    pub fn itinerary(&self) -> &Arc<Itinerary> {
        &self.itinerary
    }

    /// Flip membership of `id`.
    ///
    /// Ids that are not part of the itinerary are ignored and reported
    /// as [`ToggleOutcome::Unknown`]. Toggling the same id twice restores
    /// the previous state.
    pub fn toggle(&mut self, id: &ActivityId) -> ToggleOutcome {
        if !self.itinerary.contains(id) {
            return ToggleOutcome::Unknown;
        }

        if self.selected.remove(id) {
            ToggleOutcome::Removed
        } else {
            self.selected.insert(id.clone());
            ToggleOutcome::Added
        }
    }

    pub fn is_selected(&self, id: &ActivityId) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected activities.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of the cost of every selected activity.
    pub fn selected_cost(&self) -> u64 {
        self.selected_items().map(|a| a.cost).sum()
    }

    /// Selected activities in itinerary order (day, then within-day),
    /// regardless of the order they were toggled in.
    pub fn selected_items(&self) -> impl Iterator<Item = &Activity> {
        self.itinerary
            .activities()
            .filter(|a| self.selected.contains(&a.id))
    }

    /// Subtotal, taxes and total for the current selection.
    pub fn totals(&self, policy: &TaxPolicy) -> CartTotals {
        CartTotals::compute(self.selected_cost(), policy)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityKind, Day};
    use chrono::NaiveDate;

    fn id(s: &str) -> ActivityId {
        ActivityId::parse(s).unwrap()
    }

    fn activity(s: &str, cost: u64) -> Activity {
        Activity::new(id(s), "", s, "", cost, ActivityKind::Activity)
    }

    fn trip() -> Arc<Itinerary> {
        let date = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let days = vec![
            Day::new(1, date, vec![activity("arrival", 8500), activity("checkin", 24500)]),
            Day::new(
                2,
                date.succ_opt().unwrap(),
                vec![activity("beach", 1200), activity("oldgoa", 800)],
            ),
        ];
        Arc::new(Itinerary::new("Goa", 2, 45000, days).unwrap())
    }

    #[test]
    fn starts_empty() {
        let selection = Selection::new(trip());
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.selected_cost(), 0);
        assert!(selection.is_empty());
        assert_eq!(selection.selected_items().count(), 0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::new(trip());
        assert_eq!(selection.toggle(&id("beach")), ToggleOutcome::Added);
        assert!(selection.is_selected(&id("beach")));
        assert_eq!(selection.selected_count(), 1);
        assert_eq!(selection.selected_cost(), 1200);

        assert_eq!(selection.toggle(&id("beach")), ToggleOutcome::Removed);
        assert!(!selection.is_selected(&id("beach")));
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.selected_cost(), 0);
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut selection = Selection::new(trip());
        selection.toggle(&id("arrival"));

        assert_eq!(selection.toggle(&id("casino")), ToggleOutcome::Unknown);
        assert_eq!(selection.selected_count(), 1);
        assert_eq!(selection.selected_cost(), 8500);
        assert!(!selection.is_selected(&id("casino")));
    }

    #[test]
    fn items_follow_itinerary_order() {
        let mut selection = Selection::new(trip());
        // oldgoa is last, arrival first, beach in between
        selection.toggle(&id("oldgoa"));
        selection.toggle(&id("arrival"));
        selection.toggle(&id("beach"));

        let ids: Vec<&str> = selection.selected_items().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["arrival", "beach", "oldgoa"]);
    }

    #[test]
    fn cart_totals() {
        let mut selection = Selection::new(trip());
        selection.toggle(&id("arrival"));
        selection.toggle(&id("checkin"));
        selection.toggle(&id("beach"));

        let totals = selection.totals(&TaxPolicy::default());
        assert_eq!(totals.subtotal, 34200);
        assert_eq!(totals.taxes, 4104);
        assert_eq!(totals.total, 38304);
    }

    #[test]
    fn clear_empties() {
        let mut selection = Selection::new(trip());
        selection.toggle(&id("arrival"));
        selection.toggle(&id("beach"));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.selected_cost(), 0);
    }
}
