//! The trip session: one traveller's path from the landing screen to a
//! confirmed booking.
//!
//! All state the planner keeps between requests lives here: which screen
//! is showing, the wizard answers, the generated itinerary and the
//! traveller's selection. Events that make no sense on the current screen
//! are rejected with [`SessionError::InvalidTransition`] and change nothing.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::{ActivityId, Itinerary};
use crate::planner::{Interest, PlanError, TripPreferences, WizardError, plan_itinerary};
use crate::selection::{Selection, ToggleOutcome};

use super::booking::{Booking, Cart, PendingBooking, booking_reference};
use super::config::SessionConfig;
use super::notify::{Notification, Notifier};

/// Number of steps in the planning wizard.
pub const WIZARD_STEPS: u8 = 3;

/// Progress messages shown while a demo itinerary is generated.
pub const GENERATION_MESSAGES: [&str; 4] = [
    "Planning your trip...",
    "Talking to AI...",
    "Finding local experiences...",
    "Optimizing for your budget & interests...",
];

/// The screen the traveller is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Landing,
    Wizard { step: u8 },
    Itinerary,
    Cart,
    /// Booking submitted, waiting on the simulated processor.
    Booking,
    Confirmed,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Wizard { .. } => "wizard",
            Screen::Itinerary => "itinerary",
            Screen::Cart => "cart",
            Screen::Booking => "booking",
            Screen::Confirmed => "confirmed",
        }
    }
}

/// Error from a session event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The event is not valid on the current screen
    #[error("cannot {event} from the {screen} screen")]
    InvalidTransition {
        event: &'static str,
        screen: &'static str,
    },

    /// Checkout was requested with nothing selected
    #[error("cart is empty")]
    EmptyCart,

    /// The booking was abandoned before it completed
    #[error("booking was cancelled before it completed")]
    BookingDiscarded,

    /// A disruption demo is already running
    #[error("a disruption is already in progress")]
    DisruptionInProgress,

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// A flight-delay demo that has started but not finished.
///
/// Hand it back to [`TripSession::finish_disruption`] once
/// [`replan`](Self::replan) returns. Leaving the confirmation screen in the
/// meantime makes it stale.
#[derive(Debug)]
pub struct PendingDisruption {
    pub(crate) ticket: u64,
    pub(crate) delay: Duration,
}

impl PendingDisruption {
    /// Wait out the simulated replanning time.
    pub async fn replan(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// State machine for one planning session.
pub struct TripSession {
    config: SessionConfig,
    notifier: Arc<dyn Notifier>,
    screen: Screen,
    demo: bool,
    preferences: TripPreferences,
    selection: Option<Selection>,
    booking: Option<Booking>,
    bookings_made: u64,
    next_ticket: u64,
    pending_ticket: Option<u64>,
    disruption_ticket: Option<u64>,
}

impl TripSession {
    /// Create a session on the landing screen.
    pub fn new(config: SessionConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            notifier,
            screen: Screen::Landing,
            demo: false,
            preferences: TripPreferences::default(),
            selection: None,
            booking: None,
            bookings_made: 0,
            next_ticket: 0,
            pending_ticket: None,
            disruption_ticket: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn preferences(&self) -> &TripPreferences {
        &self.preferences
    }

    /// The generated itinerary, if one is showing.
    pub fn itinerary(&self) -> Option<&Arc<Itinerary>> {
        self.selection.as_ref().map(Selection::itinerary)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The most recent confirmed booking.
    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    /// Current cart contents, if an itinerary is loaded.
    pub fn cart(&self) -> Option<Cart> {
        self.selection
            .as_ref()
            .map(|s| Cart::from_selection(s, &self.config.tax))
    }

    /// Leave the landing screen and open the wizard.
    ///
    /// The demo flow pre-fills the Bengaluru to Goa trip.
    pub fn start_planning(&mut self, demo: bool) -> Result<Screen, SessionError> {
        self.expect_screen("start planning", |s| matches!(s, Screen::Landing))?;

        self.demo = demo;
        self.preferences = if demo {
            TripPreferences::demo()
        } else {
            TripPreferences::default()
        };
        self.booking = None;
        self.disruption_ticket = None;
        tracing::info!(demo, "planning started");
        Ok(self.go(Screen::Wizard { step: 1 }))
    }

    /// Replace the wizard answers.
    ///
    /// Numeric ranges are checked immediately; missing names are only
    /// rejected when the wizard finishes.
    pub fn update_preferences(&mut self, prefs: TripPreferences) -> Result<(), SessionError> {
        self.expect_screen("edit preferences", |s| matches!(s, Screen::Wizard { .. }))?;
        prefs.validate_ranges()?;
        self.preferences = prefs;
        Ok(())
    }

    pub fn toggle_interest(&mut self, interest: Interest) -> Result<(), SessionError> {
        self.expect_screen("edit preferences", |s| matches!(s, Screen::Wizard { .. }))?;
        self.preferences.toggle_interest(interest);
        Ok(())
    }

    /// Advance the wizard. Finishing the last step generates the itinerary.
    pub fn next_step(&mut self) -> Result<Screen, SessionError> {
        let Screen::Wizard { step } = self.screen else {
            return Err(self.invalid("continue the wizard"));
        };

        if step < WIZARD_STEPS {
            return Ok(self.go(Screen::Wizard { step: step + 1 }));
        }

        let itinerary = plan_itinerary(
            &self.preferences,
            self.config.trip_start(),
            &self.config.planner,
        )?;

        if self.demo {
            for message in GENERATION_MESSAGES {
                self.notifier.notify(Notification::new(message, ""));
            }
        }

        tracing::info!(
            destination = itinerary.destination(),
            days = itinerary.duration(),
            "itinerary generated"
        );
        self.selection = Some(Selection::new(Arc::new(itinerary)));
        Ok(self.go(Screen::Itinerary))
    }

    /// Go back one screen.
    ///
    /// Leaving the itinerary discards it along with the selection.
    pub fn back(&mut self) -> Result<Screen, SessionError> {
        let target = match self.screen {
            Screen::Landing => return Err(self.invalid("go back")),
            Screen::Wizard { step: 1 } => Screen::Landing,
            Screen::Wizard { step } => Screen::Wizard { step: step - 1 },
            Screen::Itinerary | Screen::Confirmed => {
                self.selection = None;
                self.disruption_ticket = None;
                Screen::Landing
            }
            Screen::Cart => Screen::Itinerary,
            Screen::Booking => {
                tracing::info!("booking abandoned");
                self.pending_ticket = None;
                Screen::Cart
            }
        };
        Ok(self.go(target))
    }

    /// Add or remove an activity from the selection.
    ///
    /// Ids that are not in the itinerary are ignored.
    pub fn toggle(&mut self, id: &ActivityId) -> Result<ToggleOutcome, SessionError> {
        if self.screen != Screen::Itinerary {
            return Err(self.invalid("change the selection"));
        }
        let Some(selection) = self.selection.as_mut() else {
            return Err(self.invalid("change the selection"));
        };

        let outcome = selection.toggle(id);
        tracing::debug!(%id, ?outcome, selected = selection.selected_count(), "toggled");
        Ok(outcome)
    }

    /// Open the booking cart.
    pub fn open_cart(&mut self) -> Result<Cart, SessionError> {
        self.expect_screen("open the cart", |s| matches!(s, Screen::Itinerary))?;
        let cart = self.non_empty_cart()?;
        self.go(Screen::Cart);
        Ok(cart)
    }

    /// Submit the cart for booking.
    ///
    /// The returned ticket must be processed and handed back to
    /// [`complete_booking`](Self::complete_booking). Going back in the
    /// meantime abandons it.
    pub fn begin_booking(&mut self) -> Result<PendingBooking, SessionError> {
        self.expect_screen("book", |s| matches!(s, Screen::Cart))?;
        let cart = self.non_empty_cart()?;

        self.next_ticket += 1;
        self.pending_ticket = Some(self.next_ticket);
        tracing::info!(
            ticket = self.next_ticket,
            total = cart.totals.total,
            "booking submitted"
        );
        self.go(Screen::Booking);

        Ok(PendingBooking {
            ticket: self.next_ticket,
            cart,
            delay: self.config.booking_delay,
        })
    }

    /// Confirm a processed booking.
    pub fn complete_booking(&mut self, pending: PendingBooking) -> Result<&Booking, SessionError> {
        if self.screen != Screen::Booking || self.pending_ticket != Some(pending.ticket) {
            tracing::info!(ticket = pending.ticket, "discarding stale booking");
            return Err(SessionError::BookingDiscarded);
        }
        let Some(itinerary) = self.itinerary().cloned() else {
            return Err(SessionError::BookingDiscarded);
        };

        let reference = booking_reference(&itinerary, self.bookings_made);
        self.bookings_made += 1;
        self.pending_ticket = None;
        if let Some(selection) = self.selection.as_mut() {
            selection.clear();
        }

        tracing::info!(%reference, total = pending.cart.totals.total, "booking confirmed");
        self.notifier.notify(Notification::new(
            "Booking Confirmed! 🎉",
            "Your trip has been successfully booked. Check your email for details.",
        ));
        self.go(Screen::Confirmed);

        Ok(&*self.booking.insert(Booking {
            reference,
            cart: pending.cart,
        }))
    }

    /// Submit, wait out the processing delay and confirm.
    pub async fn confirm_booking(&mut self) -> Result<Booking, SessionError> {
        let pending = self.begin_booking()?;
        pending.process().await;
        self.complete_booking(pending).cloned()
    }

    /// Start the flight-delay demo on a confirmed booking.
    ///
    /// The returned ticket must be replanned and handed back to
    /// [`finish_disruption`](Self::finish_disruption).
    pub fn begin_disruption(&mut self) -> Result<PendingDisruption, SessionError> {
        self.expect_screen("simulate a disruption", |s| matches!(s, Screen::Confirmed))?;
        if self.disruption_ticket.is_some() {
            return Err(SessionError::DisruptionInProgress);
        }

        self.next_ticket += 1;
        self.disruption_ticket = Some(self.next_ticket);
        tracing::info!(ticket = self.next_ticket, "disruption demo started");
        self.notifier.notify(Notification::new(
            "Demo: Flight Delayed! ✈️",
            "AI is re-planning your itinerary to accommodate the 2-hour delay...",
        ));
        Ok(PendingDisruption {
            ticket: self.next_ticket,
            delay: self.config.disruption_delay,
        })
    }

    /// Finish the flight-delay demo.
    ///
    /// Returns `false`, and notifies nobody, when the traveller has left the
    /// confirmation screen since the demo started.
    pub fn finish_disruption(&mut self, pending: PendingDisruption) -> bool {
        if self.screen != Screen::Confirmed || self.disruption_ticket != Some(pending.ticket) {
            tracing::info!(ticket = pending.ticket, "discarding stale disruption");
            return false;
        }
        self.disruption_ticket = None;
        tracing::info!(ticket = pending.ticket, "disruption demo finished");
        self.notifier.notify(Notification::new(
            "Itinerary Updated! 🔄",
            "Hotel check-in moved to 3 PM, afternoon activity rescheduled. No extra cost!",
        ));
        true
    }

    /// Run the whole flight-delay demo.
    pub async fn simulate_disruption(&mut self) -> Result<(), SessionError> {
        let pending = self.begin_disruption()?;
        pending.replan().await;
        self.finish_disruption(pending);
        Ok(())
    }

    fn non_empty_cart(&self) -> Result<Cart, SessionError> {
        match self.cart() {
            Some(cart) if !cart.lines.is_empty() => Ok(cart),
            _ => Err(SessionError::EmptyCart),
        }
    }

    fn expect_screen(
        &self,
        event: &'static str,
        allowed: impl Fn(&Screen) -> bool,
    ) -> Result<(), SessionError> {
        if allowed(&self.screen) {
            Ok(())
        } else {
            Err(self.invalid(event))
        }
    }

    fn invalid(&self, event: &'static str) -> SessionError {
        tracing::debug!(event, screen = self.screen.name(), "rejected event");
        SessionError::InvalidTransition {
            event,
            screen: self.screen.name(),
        }
    }

    fn go(&mut self, screen: Screen) -> Screen {
        tracing::debug!(from = self.screen.name(), to = screen.name(), "screen change");
        self.screen = screen;
        screen
    }
}
