//! Domain error types.
//!
//! These errors represent invariant violations in the itinerary model.
//! They are raised at construction time and never repaired silently.

use chrono::NaiveDate;

use super::ActivityId;

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Declared duration disagrees with the number of days supplied
    #[error("duration mismatch: declared {declared} days but {actual} supplied")]
    DurationMismatch { declared: usize, actual: usize },

    /// Itinerary has no days
    #[error("itinerary must have at least one day")]
    EmptyItinerary,

    /// Day numbers are not 1, 2, 3, ...
    #[error("non-contiguous day numbers: expected day {expected}, found day {found}")]
    NonContiguousDays { expected: u32, found: u32 },

    /// The same activity id appears twice in the trip
    #[error("duplicate activity id: {0}")]
    DuplicateActivityId(ActivityId),

    /// Date arithmetic ran off the end of the calendar
    #[error("trip of {duration} days starting {start} is out of the supported date range")]
    DateOutOfRange { start: NaiveDate, duration: usize },
}
