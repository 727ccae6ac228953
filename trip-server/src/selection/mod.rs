//! Selection and aggregation for the booking cart.
//!
//! Tracks which activities the traveller has picked and derives counts,
//! ordered cart contents and tax-inclusive totals from the itinerary.

mod cart;
mod pricing;

pub use cart::{Selection, ToggleOutcome};
pub use pricing::{CartTotals, Rounding, TaxPolicy};
