//! Map renderer error types.

use std::fmt;

/// Errors from rendering a route map.
#[derive(Debug)]
pub enum MapError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// The map provider returned an error status
    Api { status: u16, message: String },

    /// The provider rejected the API key
    Unauthorized,

    /// The provider answered with something that is not an image
    NotAnImage(String),

    /// There was nothing to draw
    NoStops,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Http(e) => write!(f, "HTTP error: {e}"),
            MapError::Api { status, message } => write!(f, "map API error {status}: {message}"),
            MapError::Unauthorized => write!(f, "unauthorized (invalid maps API key)"),
            MapError::NotAnImage(content_type) => {
                write!(f, "expected an image, got {content_type}")
            }
            MapError::NoStops => write!(f, "no stops to draw"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        MapError::Http(err)
    }
}
