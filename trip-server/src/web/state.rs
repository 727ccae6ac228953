//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::explain::ExplanationTable;
use crate::maps::MapService;
use crate::session::{NotificationLog, SessionConfig, TripSession};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The planning session driven by the API
    pub session: Arc<Mutex<TripSession>>,

    /// Notifications raised by the session, waiting to be read
    pub notifications: NotificationLog,

    /// "Why this?" explanations
    pub explanations: Arc<ExplanationTable>,

    /// Route maps
    pub maps: Arc<MapService>,
}

impl AppState {
    /// Create a new app state with a fresh session.
    pub fn new(config: SessionConfig, explanations: ExplanationTable, maps: MapService) -> Self {
        let notifications = NotificationLog::default();
        let session = TripSession::new(config, Arc::new(notifications.clone()));

        Self {
            session: Arc::new(Mutex::new(session)),
            notifications,
            explanations: Arc::new(explanations),
            maps: Arc::new(maps),
        }
    }
}
