//! Simulated booking.
//!
//! There is no payment provider. Confirming a booking waits a fixed delay
//! and then produces a [`Booking`] record for the selected items.

use std::time::Duration;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::{Activity, Itinerary};
use crate::selection::{CartTotals, Selection, TaxPolicy};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub category: &'static str,
    pub cost: u64,
}

impl CartLine {
    fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id.to_string(),
            name: activity.title.clone(),
            category: activity.kind.cart_label(),
            cost: activity.cost,
        }
    }
}

/// The cart: selected items in itinerary order plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub destination: String,
    pub lines: Vec<CartLine>,
    #[serde(flatten)]
    pub totals: CartTotals,
}

impl Cart {
    /// Snapshot the selection as a cart.
    pub fn from_selection(selection: &Selection, tax: &TaxPolicy) -> Self {
        Self {
            destination: selection.itinerary().destination().to_string(),
            lines: selection
                .selected_items()
                .map(CartLine::from_activity)
                .collect(),
            totals: selection.totals(tax),
        }
    }
}

/// A booking that has been started but not yet confirmed.
///
/// Returned by `TripSession::begin_booking`; hand it back to
/// `TripSession::complete_booking` once the delay has elapsed.
#[derive(Debug, Clone)]
pub struct PendingBooking {
    pub(crate) ticket: u64,
    pub(crate) cart: Cart,
    pub(crate) delay: Duration,
}

impl PendingBooking {
    /// The cart being booked.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Wait out the simulated processing time.
    pub async fn process(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub reference: String,
    #[serde(flatten)]
    pub cart: Cart,
}

/// Booking reference in the form `EMT-<year>-<DST>-<nnnn>`.
pub(crate) fn booking_reference(itinerary: &Itinerary, sequence: u64) -> String {
    let code: String = itinerary
        .destination()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let code = if code.is_empty() { "TRP".to_string() } else { code };

    format!(
        "EMT-{}-{}-{:04}",
        itinerary.start_date().year(),
        code,
        1234 + sequence
    )
}
