//! The canonical itinerary factory.
//!
//! Every itinerary the planner shows comes from [`plan_itinerary`]: it
//! turns wizard preferences and a start date into a validated
//! [`Itinerary`]. Day one opens with the arrival flight and hotel
//! check-in, the last day closes with the return flight, and the slots in
//! between are filled from the catalogue, most relevant first.

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::domain::{
    Activity, ActivityId, ActivityKind, DomainError, InvalidActivityId, Itinerary, Location,
};

use super::catalog::{CatalogEntry, ranked_for};
use super::config::{SLOT_TIMES, nights};
use super::{PlannerConfig, TripPreferences, WizardError};

/// Error from itinerary planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Wizard input failed validation
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The generated itinerary violated a model invariant
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A generated activity id was malformed
    #[error(transparent)]
    InvalidId(#[from] InvalidActivityId),
}

/// Arrival airport for the built-in destination.
const AIRPORT: (f64, f64, &str) = (15.3808, 73.8314, "Dabolim Airport, Goa");

/// Resort used for the stay.
const RESORT: (f64, f64, &str) = (15.2993, 74.1240, "Panaji, Goa");

/// Build the itinerary for a set of preferences.
///
/// # Errors
///
/// Returns `Err` if the preferences are invalid. Model invariants are
/// re-checked by [`Itinerary::build`], so a bug here surfaces as an
/// error rather than a malformed trip.
pub fn plan_itinerary(
    prefs: &TripPreferences,
    start: NaiveDate,
    config: &PlannerConfig,
) -> Result<Itinerary, PlanError> {
    prefs.validate()?;

    let duration = prefs.duration;
    let mut pool: VecDeque<&CatalogEntry> = ranked_for(&prefs.interests).into();

    // Build every day first so id errors can propagate out of the closure.
    let mut days = Vec::with_capacity(duration);
    for index in 0..duration {
        days.push(plan_day(prefs, config, index, &mut pool)?);
    }

    let mut days = days.into_iter();
    let itinerary = Itinerary::build(
        prefs.destination.trim(),
        prefs.budget,
        start,
        duration,
        |_| days.next().unwrap_or_default(),
    )?;

    tracing::debug!(
        destination = itinerary.destination(),
        days = itinerary.duration(),
        activities = itinerary.activity_count(),
        planned_cost = itinerary.planned_cost(),
        "planned itinerary"
    );

    Ok(itinerary)
}

/// Activities for the day at `index` (0-based).
fn plan_day(
    prefs: &TripPreferences,
    config: &PlannerConfig,
    index: usize,
    pool: &mut VecDeque<&CatalogEntry>,
) -> Result<Vec<Activity>, InvalidActivityId> {
    let destination = prefs.destination.trim();
    let is_first = index == 0;
    let is_last = index + 1 == prefs.duration && !is_first;
    let mut activities = Vec::new();

    if is_first {
        activities.push(
            Activity::new(
                ActivityId::parse("arrival")?,
                "10:00 AM",
                format!("Arrival at {destination} Airport"),
                format!("Flight from {} to {destination}", prefs.origin.trim()),
                config.flight_cost,
                ActivityKind::Transport,
            )
            .with_why_this(
                "Direct flight chosen for convenience and best price-to-time ratio based on your budget.",
            )
            .at(location(AIRPORT)),
        );

        let nights = nights(prefs.duration);
        activities.push(
            Activity::new(
                ActivityId::parse("checkin")?,
                "12:30 PM",
                "Check-in at Sunset Beach Resort",
                format!(
                    "Beachfront accommodation, {nights} night{}",
                    if nights == 1 { "" } else { "s" }
                ),
                config.stay_cost(prefs.duration),
                ActivityKind::Accommodation,
            )
            .hidden_gem()
            .with_why_this(
                "This resort offers perfect balance of luxury and budget, plus private beach access.",
            )
            .at(location(RESORT)),
        );

        // Arrival day has the afternoon free for one activity.
        activities.push(next_activity(pool, index, 0, "4:00 PM")?);
    } else if is_last {
        activities.push(next_activity(pool, index, 0, SLOT_TIMES[0])?);
        activities.push(
            Activity::new(
                ActivityId::parse("departure")?,
                "6:00 PM",
                format!("Departure from {destination} Airport"),
                format!("Flight from {destination} to {}", prefs.origin.trim()),
                config.flight_cost,
                ActivityKind::Transport,
            )
            .at(location(AIRPORT)),
        );
    } else {
        for slot in 0..config.slots_per_day() {
            activities.push(next_activity(pool, index, slot, SLOT_TIMES[slot])?);
        }
    }

    Ok(activities)
}

/// Take the next catalogue entry, or a free-time block once the
/// catalogue is exhausted.
fn next_activity(
    pool: &mut VecDeque<&CatalogEntry>,
    day_index: usize,
    slot: usize,
    time: &str,
) -> Result<Activity, InvalidActivityId> {
    match pool.pop_front() {
        Some(entry) => entry.to_activity(time),
        None => Ok(Activity::new(
            ActivityId::parse(&format!("leisure-day{}-{}", day_index + 1, slot + 1))?,
            time,
            "Free time",
            "Unplanned time to explore at your own pace",
            0,
            ActivityKind::Activity,
        )),
    }
}

fn location((lat, lng, address): (f64, f64, &str)) -> Location {
    Location::new(lat, lng, address)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::planner::Interest;
    use proptest::prelude::*;

    fn interests() -> impl Strategy<Value = Vec<Interest>> {
        proptest::sample::subsequence(Interest::ALL.to_vec(), 0..=Interest::ALL.len())
    }

    proptest! {
        /// Every valid preference set yields a trip with the requested
        /// number of days and unique ids
        #[test]
        fn valid_preferences_always_plan(
            duration in 2usize..=21,
            slots in 1usize..=3,
            interests in interests(),
        ) {
            let mut prefs = TripPreferences::demo();
            prefs.duration = duration;
            prefs.interests = interests;
            let config = PlannerConfig::new(8500, 3500, slots);
            let start = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();

            let trip = plan_itinerary(&prefs, start, &config).unwrap();
            prop_assert_eq!(trip.duration(), duration);

            let per_day: usize = trip.days().iter().map(|d| d.activities.len()).sum();
            prop_assert_eq!(per_day, trip.activity_count());
            prop_assert_eq!(trip.days()[0].activities[0].id.as_str(), "arrival");
        }
    }
}
