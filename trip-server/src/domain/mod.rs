//! Domain types for the trip planner.
//!
//! This module contains the itinerary model: activities, days and whole
//! trips. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod activity;
mod error;
mod itinerary;

pub use activity::{Activity, ActivityId, ActivityKind, InvalidActivityId, Location};
pub use error::DomainError;
pub use itinerary::{CostBreakdown, Day, Itinerary, trip_dates};
