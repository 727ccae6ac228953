//! Web layer for the trip planner.
//!
//! A JSON API over one planning session: the wizard, the itinerary view,
//! the cart and the simulated booking.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
