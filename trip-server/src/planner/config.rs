//! Configuration for itinerary generation.

/// Times used for interest slots within a day.
pub(crate) const SLOT_TIMES: [&str; 3] = ["9:00 AM", "2:00 PM", "7:00 PM"];

/// Configuration parameters for the itinerary factory.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Cost of a one-way flight.
    pub flight_cost: u64,

    /// Cost of one night of accommodation.
    pub nightly_rate: u64,

    /// Number of interest activities on a full day.
    /// Clamped to the number of available time slots (3).
    pub activities_per_day: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(flight_cost: u64, nightly_rate: u64, activities_per_day: usize) -> Self {
        Self {
            flight_cost,
            nightly_rate,
            activities_per_day,
        }
    }

    /// Interest activities per full day, after clamping.
    pub fn slots_per_day(&self) -> usize {
        self.activities_per_day.clamp(1, SLOT_TIMES.len())
    }

    /// Accommodation cost for a stay of `duration` days.
    ///
    /// The last day is a departure day, so a trip of `n` days needs
    /// `n - 1` nights (at least one).
    pub fn stay_cost(&self, duration: usize) -> u64 {
        self.nightly_rate * nights(duration) as u64
    }
}

/// Nights of accommodation for a trip of `duration` days.
pub(crate) fn nights(duration: usize) -> usize {
    duration.saturating_sub(1).max(1)
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            flight_cost: 8500,
            nightly_rate: 3500,
            activities_per_day: 2,
        }
    }
}
