//! Session controller.
//!
//! Drives the planner's screens (landing, wizard, itinerary, cart,
//! confirmation) and the simulated booking. The HTTP layer owns one
//! [`TripSession`] and forwards events to it.

mod booking;
mod config;
mod controller;
mod notify;

pub use booking::{Booking, Cart, CartLine, PendingBooking};
pub use config::SessionConfig;
pub use controller::{
    GENERATION_MESSAGES, PendingDisruption, Screen, SessionError, TripSession, WIZARD_STEPS,
};
pub use notify::{Notification, NotificationLog, Notifier};
