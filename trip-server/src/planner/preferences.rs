//! Trip parameters collected by the planning wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest budget the wizard accepts.
pub const MIN_BUDGET: u64 = 10_000;
/// Largest budget the wizard accepts.
pub const MAX_BUDGET: u64 = 200_000;
/// Budget slider granularity.
pub const BUDGET_STEP: u64 = 5_000;
/// Shortest trip the wizard accepts, in days.
pub const MIN_DURATION: usize = 2;
/// Longest trip the wizard accepts, in days.
pub const MAX_DURATION: usize = 21;
/// Largest party size.
pub const MAX_TRAVELERS: u8 = 6;

/// Validation failures for wizard input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("budget must be between 10000 and 200000 in steps of 5000, got {0}")]
    InvalidBudget(u64),

    #[error("duration must be between 2 and 21 days, got {0}")]
    InvalidDuration(usize),

    #[error("travelers must be between 1 and 6, got {0}")]
    InvalidTravelers(u8),

    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

/// Things a traveller can say they enjoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Wellness,
    Adventure,
    Cultural,
    Food,
    Nightlife,
    Beaches,
}

impl Interest {
    /// Every interest, in wizard display order.
    pub const ALL: [Interest; 6] = [
        Interest::Wellness,
        Interest::Adventure,
        Interest::Cultural,
        Interest::Food,
        Interest::Nightlife,
        Interest::Beaches,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Interest::Wellness => "Wellness & Spa",
            Interest::Adventure => "Adventure",
            Interest::Cultural => "Cultural Sites",
            Interest::Food => "Food & Cuisine",
            Interest::Nightlife => "Nightlife",
            Interest::Beaches => "Beaches",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the wizard collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPreferences {
    pub origin: String,
    pub destination: String,
    pub travelers: u8,
    pub budget: u64,
    pub duration: usize,
    /// Chosen interests, in the order they were picked
    #[serde(default)]
    pub interests: Vec<Interest>,
}

impl TripPreferences {
    /// The pre-filled Bengaluru to Goa demo trip.
    pub fn demo() -> Self {
        Self {
            origin: "Bengaluru".to_string(),
            destination: "Goa".to_string(),
            travelers: 2,
            budget: 45_000,
            duration: 5,
            interests: vec![
                Interest::Beaches,
                Interest::Food,
                Interest::Nightlife,
                Interest::Cultural,
            ],
        }
    }

    /// Flip an interest on or off.
    pub fn toggle_interest(&mut self, interest: Interest) {
        if let Some(pos) = self.interests.iter().position(|i| *i == interest) {
            self.interests.remove(pos);
        } else {
            self.interests.push(interest);
        }
    }

    /// Check the numeric ranges (budget, duration, party size).
    pub fn validate_ranges(&self) -> Result<(), WizardError> {
        if !(MIN_BUDGET..=MAX_BUDGET).contains(&self.budget) || self.budget % BUDGET_STEP != 0 {
            return Err(WizardError::InvalidBudget(self.budget));
        }

        if !(MIN_DURATION..=MAX_DURATION).contains(&self.duration) {
            return Err(WizardError::InvalidDuration(self.duration));
        }

        if !(1..=MAX_TRAVELERS).contains(&self.travelers) {
            return Err(WizardError::InvalidTravelers(self.travelers));
        }

        Ok(())
    }

    /// Full validation, required before an itinerary can be generated.
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.origin.trim().is_empty() {
            return Err(WizardError::MissingField("origin"));
        }
        if self.destination.trim().is_empty() {
            return Err(WizardError::MissingField("destination"));
        }
        self.validate_ranges()
    }
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            travelers: 2,
            budget: 50_000,
            duration: 7,
            interests: Vec::new(),
        }
    }
}
