//! Configuration for a trip session.

use std::time::Duration;

use chrono::NaiveDate;

use crate::planner::PlannerConfig;
use crate::selection::TaxPolicy;

/// Configuration for a trip session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a simulated booking takes.
    pub booking_delay: Duration,

    /// How long the simulated flight-delay replanning takes.
    pub disruption_delay: Duration,

    /// Tax applied at checkout.
    pub tax: TaxPolicy,

    /// Costs and pacing for generated itineraries.
    pub planner: PlannerConfig,

    /// First day of generated trips. `None` means today.
    pub start_date: Option<NaiveDate>,
}

impl SessionConfig {
    /// Set the booking delay.
    pub fn with_booking_delay(mut self, delay: Duration) -> Self {
        self.booking_delay = delay;
        self
    }

    /// Set the disruption delay.
    pub fn with_disruption_delay(mut self, delay: Duration) -> Self {
        self.disruption_delay = delay;
        self
    }

    /// Set the checkout tax.
    pub fn with_tax(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_planner(mut self, planner: PlannerConfig) -> Self {
        self.planner = planner;
        self
    }

    /// Pin the trip start date instead of using today.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Configuration with no artificial delays.
    pub fn instant() -> Self {
        Self::default()
            .with_booking_delay(Duration::ZERO)
            .with_disruption_delay(Duration::ZERO)
    }

    pub(crate) fn trip_start(&self) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            booking_delay: Duration::from_secs(2),
            disruption_delay: Duration::from_secs(3),
            tax: TaxPolicy::default(),
            planner: PlannerConfig::default(),
            start_date: None,
        }
    }
}
