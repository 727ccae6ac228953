//! Itinerary and day types.
//!
//! An `Itinerary` is the whole trip: an ordered sequence of `Day`s, each
//! holding its activities in chronological order. Itineraries are
//! validated at construction and immutable afterwards.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::{Activity, ActivityId, ActivityKind, DomainError};

/// Display format for day dates, e.g. "Dec 20, 2024".
const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    /// 1-based sequence number
    pub day: u32,

    pub date: NaiveDate,

    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

impl Day {
    /// Creates a new day.
    pub fn new(day: u32, date: NaiveDate, activities: Vec<Activity>) -> Self {
        Self {
            day,
            date,
            activities,
        }
    }

    /// Returns the date formatted for display.
    pub fn date_label(&self) -> String {
        self.date.format(DATE_DISPLAY_FORMAT).to_string()
    }

    /// Total cost of the activities on this day.
    pub fn cost(&self) -> u64 {
        self.activities.iter().map(|a| a.cost).sum()
    }
}

/// Planned spend split by kind of booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub transport: u64,
    pub accommodation: u64,
    pub activities: u64,
}

impl CostBreakdown {
    /// Sum of all categories.
    pub fn total(&self) -> u64 {
        self.transport + self.accommodation + self.activities
    }
}

/// Produces `duration` consecutive calendar dates starting at `start`.
///
/// Uses plain calendar arithmetic, so there is no timezone drift: the
/// result is always `start, start + 1, ..., start + duration - 1`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trip_server::domain::trip_dates;
///
/// let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
/// let dates = trip_dates(start, 3).unwrap();
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// ```
pub fn trip_dates(start: NaiveDate, duration: usize) -> Result<Vec<NaiveDate>, DomainError> {
    (0..duration)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset as u64))
                .ok_or(DomainError::DateOutOfRange { start, duration })
        })
        .collect()
}

/// A complete, validated trip.
///
/// # Invariants
///
/// - At least one day
/// - `duration` equals the number of days
/// - Day numbers are exactly 1..=duration, in order
/// - Every activity id is unique across the whole trip
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    destination: String,
    duration: usize,
    total_budget: u64,
    days: Vec<Day>,

    /// Activity id -> position in itinerary order (day, then within day).
    #[serde(skip)]
    positions: HashMap<ActivityId, usize>,
}

impl Itinerary {
    /// Constructs an itinerary from pre-built days.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any invariant listed on [`Itinerary`] is violated.
    /// Nothing is truncated or padded.
    pub fn new(
        destination: impl Into<String>,
        duration: usize,
        total_budget: u64,
        days: Vec<Day>,
    ) -> Result<Self, DomainError> {
        if days.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        if duration != days.len() {
            return Err(DomainError::DurationMismatch {
                declared: duration,
                actual: days.len(),
            });
        }

        for (i, day) in days.iter().enumerate() {
            let expected = i as u32 + 1;
            if day.day != expected {
                return Err(DomainError::NonContiguousDays {
                    expected,
                    found: day.day,
                });
            }
        }

        let mut positions = HashMap::new();
        let all = days.iter().flat_map(|d| d.activities.iter());
        for (position, activity) in all.enumerate() {
            if positions.insert(activity.id.clone(), position).is_some() {
                return Err(DomainError::DuplicateActivityId(activity.id.clone()));
            }
        }

        Ok(Itinerary {
            destination: destination.into(),
            duration,
            total_budget,
            days,
            positions,
        })
    }

    /// Builds an itinerary from a start date and a per-day generator.
    ///
    /// `generator` receives the 0-based day index and returns that day's
    /// activities in order. Dates and day numbers are derived here, so the
    /// result always has exactly `duration` days.
    pub fn build<F>(
        destination: impl Into<String>,
        total_budget: u64,
        start: NaiveDate,
        duration: usize,
        mut generator: F,
    ) -> Result<Self, DomainError>
    where
        F: FnMut(usize) -> Vec<Activity>,
    {
        let days = trip_dates(start, duration)?
            .into_iter()
            .enumerate()
            .map(|(i, date)| Day::new(i as u32 + 1, date, generator(i)))
            .collect();

        Self::new(destination, duration, total_budget, days)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Number of days in the trip.
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Advisory budget; never enforced against the planned cost.
    pub fn total_budget(&self) -> u64 {
        self.total_budget
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Returns a day by its 1-based number.
    pub fn day(&self, number: u32) -> Option<&Day> {
        let idx = (number as usize).checked_sub(1)?;
        self.days.get(idx)
    }

    /// First day of the trip.
    pub fn start_date(&self) -> NaiveDate {
        self.days[0].date
    }

    /// All activities in itinerary order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.days.iter().flat_map(|d| d.activities.iter())
    }

    pub fn activity_count(&self) -> usize {
        self.positions.len()
    }

    /// Looks up an activity by id.
    pub fn activity(&self, id: &ActivityId) -> Option<&Activity> {
        let position = *self.positions.get(id)?;
        self.activities().nth(position)
    }

    pub fn contains(&self, id: &ActivityId) -> bool {
        self.positions.contains_key(id)
    }

    /// Position of an activity in itinerary order.
    pub fn position(&self, id: &ActivityId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Sum of every activity's cost.
    pub fn planned_cost(&self) -> u64 {
        self.days.iter().map(Day::cost).sum()
    }

    /// Planned cost split by kind of booking.
    pub fn cost_by_kind(&self) -> CostBreakdown {
        self.activities()
            .fold(CostBreakdown::default(), |mut acc, activity| {
                match activity.kind {
                    ActivityKind::Transport => acc.transport += activity.cost,
                    ActivityKind::Accommodation => acc.accommodation += activity.cost,
                    ActivityKind::Activity => acc.activities += activity.cost,
                }
                acc
            })
    }

    /// Activities flagged as hidden gems, in itinerary order.
    pub fn hidden_gems(&self) -> impl Iterator<Item = &Activity> {
        self.activities().filter(|a| a.hidden_gem)
    }
}
