//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::maps::{Coordinates, MapConfig};
use crate::selection::TaxPolicy;
use crate::session::SessionConfig;

/// Default listen address.
const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// A malformed environment variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}: {value:?} ({reason})")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub session: SessionConfig,
    pub maps: MapConfig,
    /// JSON file of explanation records; the built-in table if unset
    pub explanations: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `TRIP_ADDR`, `BOOKING_DELAY_MS`, `TAX_RATE_BP`, `MAPS_API_KEY`,
    /// `MAPS_CENTER` and `TRIP_EXPLANATIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = match lookup("TRIP_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError {
                name: "TRIP_ADDR",
                value,
                reason: "expected host:port",
            })?,
            None => SocketAddr::from(DEFAULT_ADDR),
        };

        let mut session = SessionConfig::default();
        if let Some(value) = lookup("BOOKING_DELAY_MS") {
            let millis: u64 = value.parse().map_err(|_| ConfigError {
                name: "BOOKING_DELAY_MS",
                value,
                reason: "expected milliseconds",
            })?;
            session = session.with_booking_delay(Duration::from_millis(millis));
        }
        if let Some(value) = lookup("TAX_RATE_BP") {
            let rate: u64 = match value.parse() {
                Ok(rate) if rate <= 10_000 => rate,
                _ => {
                    return Err(ConfigError {
                        name: "TAX_RATE_BP",
                        value,
                        reason: "expected basis points between 0 and 10000",
                    });
                }
            };
            let tax = TaxPolicy::new(rate, session.tax.rounding);
            session = session.with_tax(tax);
        }

        let mut maps = MapConfig::new();
        if let Some(key) = lookup("MAPS_API_KEY") {
            maps = maps.with_api_key(key);
        }
        if let Some(value) = lookup("MAPS_CENTER") {
            let center = parse_coordinates(&value).ok_or(ConfigError {
                name: "MAPS_CENTER",
                value,
                reason: "expected lat,lng",
            })?;
            maps = maps.with_center(center);
        }

        let explanations = lookup("TRIP_EXPLANATIONS")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            addr,
            session,
            maps,
            explanations,
        })
    }
}

/// Parse `lat,lng` in degrees.
fn parse_coordinates(s: &str) -> Option<Coordinates> {
    let (lat, lng) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng))
        .then(|| Coordinates::new(lat, lng))
}
