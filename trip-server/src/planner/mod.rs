//! Itinerary planning.
//!
//! Turns the wizard's trip preferences into a concrete, validated
//! itinerary. There is no recommendation engine: activities come from a
//! fixed catalogue, ordered by how well they match the chosen interests.

mod catalog;
mod config;
mod factory;
mod preferences;

pub use catalog::{CATALOG, CatalogEntry, ranked_for};
pub use config::PlannerConfig;
pub use factory::{PlanError, plan_itinerary};
pub use preferences::{
    BUDGET_STEP, Interest, MAX_BUDGET, MAX_DURATION, MAX_TRAVELERS, MIN_BUDGET, MIN_DURATION,
    TripPreferences, WizardError,
};
