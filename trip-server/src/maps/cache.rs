//! Caching layer for rendered route maps.
//!
//! A map depends only on its stops, so the cache key is the stops'
//! coordinates in order. Failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::error::MapError;
use super::project::RouteStop;
use super::render::{MapRenderer, RenderedImage};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 256,
        }
    }
}

/// Cache key for a route.
fn route_key(stops: &[RouteStop]) -> String {
    stops
        .iter()
        .map(|s| format!("{}@{}", s.order, s.coordinates.to_param()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Map renderer with caching.
///
/// Wraps another renderer and remembers the images it produced.
pub struct CachedMapRenderer<R> {
    renderer: R,
    images: MokaCache<String, Arc<RenderedImage>>,
}

impl<R: MapRenderer> CachedMapRenderer<R> {
    /// Create a new cached renderer.
    pub fn new(renderer: R, config: &CacheConfig) -> Self {
        let images = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { renderer, images }
    }

    /// Get the underlying renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Invalidate all cached images.
    pub fn invalidate_cache(&self) {
        self.images.invalidate_all();
    }
}

impl<R: MapRenderer> MapRenderer for CachedMapRenderer<R> {
    async fn render(&self, stops: &[RouteStop]) -> Result<RenderedImage, MapError> {
        let key = route_key(stops);

        if let Some(cached) = self.images.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let image = self.renderer.render(stops).await?;
        self.images.insert(key, Arc::new(image.clone())).await;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::Coordinates;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Renderer that counts calls and fails on demand.
    struct CountingRenderer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingRenderer {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl MapRenderer for CountingRenderer {
        async fn render(&self, stops: &[RouteStop]) -> Result<RenderedImage, MapError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MapError::Unauthorized);
            }
            Ok(RenderedImage {
                content_type: "image/png".to_string(),
                bytes: vec![stops.len() as u8],
            })
        }
    }

    fn stops(n: usize) -> Vec<RouteStop> {
        (1..=n)
            .map(|order| RouteStop {
                coordinates: Coordinates::new(15.0 + order as f64, 74.0),
                label: String::new(),
                address: String::new(),
                order,
            })
            .collect()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 256);
    }

    #[test]
    fn key_depends_on_coordinates() {
        assert_eq!(route_key(&stops(2)), route_key(&stops(2)));
        assert_ne!(route_key(&stops(2)), route_key(&stops(3)));
        assert_eq!(route_key(&[]), "");
    }

    #[tokio::test]
    async fn second_render_is_cached() {
        let cached = CachedMapRenderer::new(CountingRenderer::new(false), &CacheConfig::default());

        let first = cached.render(&stops(2)).await.unwrap();
        let second = cached.render(&stops(2)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.renderer().calls.load(Ordering::SeqCst), 1);

        cached.render(&stops(3)).await.unwrap();
        assert_eq!(cached.renderer().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cached = CachedMapRenderer::new(CountingRenderer::new(true), &CacheConfig::default());

        assert!(cached.render(&stops(1)).await.is_err());
        assert!(cached.render(&stops(1)).await.is_err());
        assert_eq!(cached.renderer().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_rerender() {
        let cached = CachedMapRenderer::new(CountingRenderer::new(false), &CacheConfig::default());
        cached.render(&stops(1)).await.unwrap();
        cached.invalidate_cache();
        cached.render(&stops(1)).await.unwrap();
        assert_eq!(cached.renderer().calls.load(Ordering::SeqCst), 2);
    }
}
