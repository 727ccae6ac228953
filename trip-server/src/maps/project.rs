//! Projection of a day's activities onto map stops.

use serde::Serialize;

use crate::domain::{Activity, Day};

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` with six decimal places, as map providers expect.
    pub fn to_param(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// One marker on a day's route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub coordinates: Coordinates,
    pub label: String,
    pub address: String,
    /// 1-based position in the day.
    pub order: usize,
}

/// Well-known places, keyed by location tag.
const KNOWN_PLACES: &[(&str, f64, f64, &str)] = &[
    ("hotel", 15.2993, 74.1240, "Panaji, Goa"),
    ("beach", 15.2832, 73.9712, "Calangute Beach, Goa"),
    ("fort", 15.4909, 73.8278, "Aguada Fort, Goa"),
    ("restaurant", 15.2760, 73.9673, "Baga Beach, Goa"),
    ("market", 15.2832, 74.1240, "Mapusa Market, Goa"),
    ("temple", 15.3004, 74.1402, "Mangeshi Temple, Goa"),
    ("wildlife", 15.4218, 74.1100, "Bhagwan Mahavir Sanctuary, Goa"),
    ("church", 15.5010, 73.9120, "Basilica of Bom Jesus, Goa"),
    ("cafe", 15.2760, 73.9673, "Anjuna Beach, Goa"),
    ("spice", 15.3820, 74.1500, "Sahakari Spice Farm, Goa"),
];

/// Offset applied per stop when a location has to be invented.
const FALLBACK_STEP: f64 = 0.01;

/// The first known place whose tag appears in `id`.
fn known_place(id: &str) -> Option<(Coordinates, &'static str)> {
    KNOWN_PLACES
        .iter()
        .find(|(tag, ..)| id.contains(tag))
        .map(|&(_, lat, lng, address)| (Coordinates::new(lat, lng), address))
}

/// Project a day onto map stops, one per activity, in order.
///
/// Each stop uses the activity's own location if it has one, then a
/// known place whose tag appears in the activity id, and finally a point
/// near `center` offset by the stop's index.
pub fn project_day(day: &Day, destination: &str, center: Coordinates) -> Vec<RouteStop> {
    day.activities
        .iter()
        .enumerate()
        .map(|(index, activity)| {
            let (coordinates, address) = locate(activity, index, destination, center);
            RouteStop {
                coordinates,
                label: activity.title.clone(),
                address,
                order: index + 1,
            }
        })
        .collect()
}

fn locate(
    activity: &Activity,
    index: usize,
    destination: &str,
    center: Coordinates,
) -> (Coordinates, String) {
    if let Some(location) = &activity.location {
        return (
            Coordinates::new(location.lat, location.lng),
            location.address.clone(),
        );
    }

    if let Some((coordinates, address)) = known_place(activity.id.as_str()) {
        return (coordinates, address.to_string());
    }

    let offset = index as f64 * FALLBACK_STEP;
    (
        Coordinates::new(center.lat + offset, center.lng + offset),
        format!("{}, {destination}", activity.title),
    )
}
