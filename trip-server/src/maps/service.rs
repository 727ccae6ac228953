//! Route maps for itinerary days.
//!
//! The map is optional: without a renderer every day gets a placeholder,
//! and a failed render degrades to a placeholder too. Stops are always
//! returned so a client can draw its own map.

use futures::future::join_all;
use serde::Serialize;

use crate::domain::Itinerary;

use super::cache::{CacheConfig, CachedMapRenderer};
use super::error::MapError;
use super::project::{Coordinates, RouteStop, project_day};
use super::render::{MapConfig, MapRenderer, StaticMapRenderer};

/// The drawn map for a day, or why there isn't one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteMap {
    Rendered { data_uri: String },
    Placeholder { reason: String },
}

/// A day's stops and map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRoute {
    pub day: u32,
    pub stops: Vec<RouteStop>,
    pub map: RouteMap,
}

/// Map service, with or without a renderer.
pub struct MapService<R = StaticMapRenderer> {
    renderer: Option<CachedMapRenderer<R>>,
    center: Coordinates,
}

impl MapService<StaticMapRenderer> {
    /// Build the service from config. A renderer is created only if an
    /// API key is set.
    pub fn from_config(config: &MapConfig, cache: &CacheConfig) -> Result<Self, MapError> {
        let renderer = StaticMapRenderer::from_config(config)?
            .map(|r| CachedMapRenderer::new(r, cache));
        if renderer.is_none() {
            tracing::info!("no maps API key configured, route maps disabled");
        }
        Ok(Self {
            renderer,
            center: config.center,
        })
    }
}

impl<R: MapRenderer> MapService<R> {
    /// Service that never renders.
    pub fn disabled(center: Coordinates) -> Self {
        Self {
            renderer: None,
            center,
        }
    }

    /// Service rendering through `renderer`.
    pub fn with_renderer(renderer: R, center: Coordinates, cache: &CacheConfig) -> Self {
        Self {
            renderer: Some(CachedMapRenderer::new(renderer, cache)),
            center,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.renderer.is_some()
    }

    /// Route for day `number` (1-based), or `None` if there is no such day.
    pub async fn day_route(&self, itinerary: &Itinerary, number: u32) -> Option<DayRoute> {
        let day = itinerary.day(number)?;
        let stops = project_day(day, itinerary.destination(), self.center);
        let map = self.draw(&stops).await;
        Some(DayRoute {
            day: number,
            stops,
            map,
        })
    }

    /// Routes for every day, rendered concurrently.
    pub async fn all_routes(&self, itinerary: &Itinerary) -> Vec<DayRoute> {
        let routes = itinerary
            .days()
            .iter()
            .map(|day| self.day_route(itinerary, day.day));
        join_all(routes).await.into_iter().flatten().collect()
    }

    async fn draw(&self, stops: &[RouteStop]) -> RouteMap {
        let Some(renderer) = &self.renderer else {
            return RouteMap::Placeholder {
                reason: "Add a maps API key to see the route for this day.".to_string(),
            };
        };
        if stops.is_empty() {
            return RouteMap::Placeholder {
                reason: "Nothing planned for this day.".to_string(),
            };
        }

        match renderer.render(stops).await {
            Ok(image) => RouteMap::Rendered {
                data_uri: image.data_uri(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "map render failed, using placeholder");
                RouteMap::Placeholder {
                    reason: "Map unavailable right now.".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::RenderedImage;
    use crate::planner::{PlannerConfig, TripPreferences, plan_itinerary};
    use chrono::NaiveDate;

    struct FixedRenderer {
        fail: bool,
    }

    impl MapRenderer for FixedRenderer {
        async fn render(&self, _stops: &[RouteStop]) -> Result<RenderedImage, MapError> {
            if self.fail {
                return Err(MapError::Api {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(RenderedImage {
                content_type: "image/png".to_string(),
                bytes: vec![0xff],
            })
        }
    }

    fn trip() -> Itinerary {
        let start = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        plan_itinerary(&TripPreferences::demo(), start, &PlannerConfig::default()).unwrap()
    }

    fn center() -> Coordinates {
        MapConfig::default().center
    }

    fn service(fail: bool) -> MapService<FixedRenderer> {
        MapService::with_renderer(FixedRenderer { fail }, center(), &CacheConfig::default())
    }

    #[test]
    fn no_key_means_disabled() {
        let service = MapService::from_config(&MapConfig::new(), &CacheConfig::default()).unwrap();
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn disabled_service_gives_placeholder_with_stops() {
        let service = MapService::<FixedRenderer>::disabled(center());
        let route = service.day_route(&trip(), 1).await.unwrap();

        assert_eq!(route.day, 1);
        assert_eq!(route.stops.len(), 3);
        assert_eq!(route.stops[0].address, "Dabolim Airport, Goa");
        assert!(matches!(route.map, RouteMap::Placeholder { .. }));
    }

    #[tokio::test]
    async fn rendered_map_is_data_uri() {
        let route = service(false).day_route(&trip(), 2).await.unwrap();
        assert_eq!(
            route.map,
            RouteMap::Rendered {
                data_uri: "data:image/png;base64,/w==".to_string()
            }
        );
    }

    #[tokio::test]
    async fn render_failure_degrades() {
        let route = service(true).day_route(&trip(), 1).await.unwrap();
        assert_eq!(
            route.map,
            RouteMap::Placeholder {
                reason: "Map unavailable right now.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unknown_day() {
        assert!(service(false).day_route(&trip(), 9).await.is_none());
        assert!(service(false).day_route(&trip(), 0).await.is_none());
    }

    #[tokio::test]
    async fn all_routes_in_day_order() {
        let routes = service(false).all_routes(&trip()).await;
        let days: Vec<u32> = routes.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn route_map_serialization() {
        let json = serde_json::to_value(RouteMap::Placeholder {
            reason: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "placeholder");
        assert_eq!(json["reason"], "x");
    }
}
