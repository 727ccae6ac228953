//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::domain::ActivityId;
use crate::explain::Rationale;
use crate::maps::DayRoute;
use crate::planner::{PlanError, TripPreferences};
use crate::session::{Booking, Cart, Screen, SessionError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session", get(current_session))
        .route("/session/start", post(start_session))
        .route("/back", post(go_back))
        .route("/wizard/next", post(wizard_next))
        .route("/wizard/back", post(wizard_back))
        .route("/wizard/preferences", put(update_preferences))
        .route("/wizard/interests", post(toggle_interest))
        .route("/itinerary", get(itinerary))
        .route("/selection/toggle", post(toggle_selection))
        .route("/cart", get(cart).post(open_cart))
        .route("/booking", post(book))
        .route("/booking/disruption", post(disruption))
        .route("/explanations/:id", get(explanation))
        .route("/days/:day/route", get(day_route))
        .route("/routes", get(all_routes))
        .route("/notifications", get(notifications))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn current_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse::from_session(&session))
}

/// Leave the landing screen, optionally with the demo trip pre-filled.
async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.start_planning(req.demo)?;
    Ok(Json(SessionResponse::from_session(&session)))
}

/// Go back one screen from anywhere.
async fn go_back(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.back()?;
    Ok(Json(SessionResponse::from_session(&session)))
}

async fn wizard_next(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.next_step()?;
    Ok(Json(SessionResponse::from_session(&session)))
}

/// Previous wizard step; the first step goes back to the landing screen.
async fn wizard_back(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    if !matches!(session.screen(), Screen::Wizard { .. }) {
        return Err(AppError::Conflict {
            message: "the wizard is not open".to_string(),
        });
    }
    session.back()?;
    Ok(Json(SessionResponse::from_session(&session)))
}

async fn update_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<TripPreferences>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.update_preferences(prefs)?;
    Ok(Json(SessionResponse::from_session(&session)))
}

/// Add the interest if it is missing, otherwise remove it.
async fn toggle_interest(
    State(state): State<AppState>,
    Json(req): Json<InterestRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.toggle_interest(req.interest)?;
    Ok(Json(SessionResponse::from_session(&session)))
}

async fn itinerary(State(state): State<AppState>) -> Result<Json<ItineraryResponse>, AppError> {
    let session = state.session.lock().await;
    let selection = session.selection().ok_or_else(no_itinerary)?;
    Ok(Json(ItineraryResponse::build(selection, &state.explanations)))
}

/// Select or deselect an activity. Unknown ids are ignored.
async fn toggle_selection(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let id = parse_id(&req.id)?;
    let mut session = state.session.lock().await;
    let outcome = session.toggle(&id)?;
    let selection = session.selection().ok_or_else(no_itinerary)?;
    Ok(Json(ToggleResponse::new(outcome, selection)))
}

async fn cart(State(state): State<AppState>) -> Result<Json<Cart>, AppError> {
    let session = state.session.lock().await;
    session.cart().map(Json).ok_or_else(no_itinerary)
}

/// Move from the itinerary to the cart.
async fn open_cart(State(state): State<AppState>) -> Result<Json<Cart>, AppError> {
    let mut session = state.session.lock().await;
    Ok(Json(session.open_cart()?))
}

/// Book the cart.
///
/// The session is unlocked while the booking is processed, so going back
/// in the meantime abandons it.
async fn book(State(state): State<AppState>) -> Result<Json<Booking>, AppError> {
    let pending = state.session.lock().await.begin_booking()?;
    pending.process().await;

    let mut session = state.session.lock().await;
    let booking = session.complete_booking(pending)?;
    Ok(Json(booking.clone()))
}

/// Run the flight-delay demo.
///
/// Like booking, the session is unlocked while replanning. A demo that
/// outlives the confirmation screen finishes silently.
async fn disruption(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let pending = state.session.lock().await.begin_disruption()?;
    pending.replan().await;
    state.session.lock().await.finish_disruption(pending);
    Ok(StatusCode::NO_CONTENT)
}

/// "Why this?" for an activity.
async fn explanation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExplanationResponse>, AppError> {
    let id = parse_id(&id)?;
    let itinerary = state.session.lock().await.itinerary().cloned();

    let activity = itinerary.as_ref().and_then(|it| it.activity(&id));
    let rationale = match activity {
        Some(activity) => state.explanations.rationale(activity),
        None => state.explanations.lookup(&id).map(Rationale::Explained),
    };

    Ok(Json(ExplanationResponse {
        activity_id: id.to_string(),
        rationale: rationale.into(),
    }))
}

/// Stops and map for one day of the itinerary.
async fn day_route(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Json<DayRoute>, AppError> {
    let itinerary = state
        .session
        .lock()
        .await
        .itinerary()
        .cloned()
        .ok_or_else(no_itinerary)?;

    state
        .maps
        .day_route(&itinerary, day)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Day {day} is not part of this trip"),
        })
}

/// Stops and maps for every day, rendered concurrently.
async fn all_routes(State(state): State<AppState>) -> Result<Json<Vec<DayRoute>>, AppError> {
    let itinerary = state
        .session
        .lock()
        .await
        .itinerary()
        .cloned()
        .ok_or_else(no_itinerary)?;

    Ok(Json(state.maps.all_routes(&itinerary).await))
}

/// Notifications raised since the last call.
async fn notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.notifications.drain(),
    })
}

fn parse_id(s: &str) -> Result<ActivityId, AppError> {
    ActivityId::parse(s).map_err(|e| AppError::BadRequest {
        message: format!("Invalid activity id {s:?}: {e}"),
    })
}

fn no_itinerary() -> AppError {
    AppError::NotFound {
        message: "No itinerary has been generated yet".to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        let message = e.to_string();
        match e {
            SessionError::Wizard(_) | SessionError::Plan(PlanError::Wizard(_)) => {
                AppError::BadRequest { message }
            }
            SessionError::Plan(_) => AppError::Internal { message },
            SessionError::InvalidTransition { .. }
            | SessionError::EmptyCart
            | SessionError::BookingDiscarded
            | SessionError::DisruptionInProgress => AppError::Conflict { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
