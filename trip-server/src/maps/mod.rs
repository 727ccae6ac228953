//! Day route maps.
//!
//! Projects each day's activities onto ordered map stops and, when a maps
//! API key is configured, renders them as a static image.

mod cache;
mod error;
mod project;
mod render;
mod service;

pub use cache::{CacheConfig, CachedMapRenderer};
pub use error::MapError;
pub use project::{Coordinates, RouteStop, project_day};
pub use render::{MapConfig, MapRenderer, RenderedImage, StaticMapRenderer};
pub use service::{DayRoute, MapService, RouteMap};
