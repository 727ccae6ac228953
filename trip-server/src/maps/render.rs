//! Static route-map rendering.
//!
//! Draws a day's stops as numbered markers joined by a path, using the
//! Google Static Maps API. The renderer is only built when an API key is
//! configured.

use std::future::Future;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::MapError;
use super::project::{Coordinates, RouteStop};

/// Default base URL for the static maps API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Goa, used to centre invented locations.
const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 15.2993,
    lng: 74.1240,
};

/// Configuration for map rendering.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// API key. Without one, maps are placeholders.
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to production Google)
    pub base_url: String,
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Centre used for stops without a known location
    pub center: Coordinates,
}

impl MapConfig {
    /// Create a config with no API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            width: 600,
            height: 400,
            timeout_secs: 10,
            center: DEFAULT_CENTER,
        }
    }

    /// Set the API key. Blank keys are ignored.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key)
        };
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_center(mut self, center: Coordinates) -> Self {
        self.center = center;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An image returned by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl RenderedImage {
    /// The image as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Something that can draw a route.
pub trait MapRenderer: Send + Sync {
    fn render(
        &self,
        stops: &[RouteStop],
    ) -> impl Future<Output = Result<RenderedImage, MapError>> + Send;
}

/// Renderer backed by the Google Static Maps API.
#[derive(Debug, Clone)]
pub struct StaticMapRenderer {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    size: String,
}

impl StaticMapRenderer {
    /// Build a renderer from the config.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &MapConfig) -> Result<Option<Self>, MapError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            size: format!("{}x{}", config.width, config.height),
        }))
    }

    /// Query parameters for a route, excluding the key.
    pub fn query(&self, stops: &[RouteStop]) -> Vec<(&'static str, String)> {
        let mut params = vec![("size", self.size.clone())];

        for stop in stops {
            // Marker labels are a single character
            let label = std::char::from_digit((stop.order % 36) as u32, 36)
                .unwrap_or('X')
                .to_ascii_uppercase();
            params.push((
                "markers",
                format!(
                    "color:0x3b82f6|label:{label}|{}",
                    stop.coordinates.to_param()
                ),
            ));
        }

        if stops.len() > 1 {
            let points: Vec<String> = stops.iter().map(|s| s.coordinates.to_param()).collect();
            params.push((
                "path",
                format!("color:0x3b82f6ff|weight:4|{}", points.join("|")),
            ));
        }

        params
    }
}

impl MapRenderer for StaticMapRenderer {
    async fn render(&self, stops: &[RouteStop]) -> Result<RenderedImage, MapError> {
        if stops.is_empty() {
            return Err(MapError::NoStops);
        }

        let mut params = self.query(stops);
        params.push(("key", self.api_key.clone()));

        let response = self.http.get(&self.base_url).query(&params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(MapError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("image/") {
            return Err(MapError::NotAnImage(content_type));
        }

        let bytes = response.bytes().await?;
        Ok(RenderedImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(order: usize, lat: f64, lng: f64) -> RouteStop {
        RouteStop {
            coordinates: Coordinates::new(lat, lng),
            label: format!("Stop {order}"),
            address: String::new(),
            order,
        }
    }

    fn renderer() -> StaticMapRenderer {
        StaticMapRenderer::from_config(&MapConfig::new().with_api_key("test-key"))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn config_builder() {
        let config = MapConfig::new()
            .with_api_key("key")
            .with_base_url("http://localhost:8080")
            .with_size(300, 200)
            .with_timeout(5);

        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!((config.width, config.height), (300, 200));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.center, DEFAULT_CENTER);
    }

    #[test]
    fn blank_key_is_no_key() {
        let config = MapConfig::new().with_api_key("   ");
        assert_eq!(config.api_key, None);
        assert!(StaticMapRenderer::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn query_has_markers_and_path() {
        let stops = vec![stop(1, 15.0, 74.0), stop(2, 15.5, 74.5)];
        let params = renderer().query(&stops);

        assert_eq!(params[0], ("size", "600x400".to_string()));
        let markers: Vec<&String> = params
            .iter()
            .filter(|(k, _)| *k == "markers")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(markers.len(), 2);
        assert!(markers[0].contains("label:1|15.000000,74.000000"));
        assert!(markers[1].contains("label:2|15.500000,74.500000"));

        let path = params.iter().find(|(k, _)| *k == "path").unwrap();
        assert!(path.1.ends_with("15.000000,74.000000|15.500000,74.500000"));

        // Key is only added when sending
        assert!(params.iter().all(|(k, _)| *k != "key"));
    }

    #[test]
    fn single_stop_has_no_path() {
        let params = renderer().query(&[stop(1, 15.0, 74.0)]);
        assert!(params.iter().all(|(k, _)| *k != "path"));
    }

    #[tokio::test]
    async fn empty_route_is_an_error() {
        let err = renderer().render(&[]).await.unwrap_err();
        assert!(matches!(err, MapError::NoStops));
    }

    #[test]
    fn data_uri_encoding() {
        let image = RenderedImage {
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(image.data_uri(), "data:image/png;base64,AQID");
    }
}
