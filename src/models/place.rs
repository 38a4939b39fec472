//! Canonical destination record
//!
//! Search providers return place objects with inconsistent field names
//! (`title` or `name`, `thumbnail`, `photo` or `serpapi_thumbnail`, and four
//! different coordinate layouts). [`Place::from_json`] maps all of them onto
//! a single record so nothing downstream has to probe optional fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Coordinate;
use crate::{Result, TripEstimatorError};

const NAME_KEYS: [&str; 2] = ["title", "name"];
const ID_KEYS: [&str; 3] = ["place_id", "_id", "data_id"];
const THUMBNAIL_KEYS: [&str; 3] = ["thumbnail", "photo", "serpapi_thumbnail"];

/// Thumbnail hosts that only ever serve generic placeholder images
const PLACEHOLDER_HOSTS: [&str; 1] = ["placeholder.com"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub thumbnail: Option<String>,
    pub rating: Option<f64>,
    /// Only set when the provider reports a positive price
    pub price_per_day: Option<f64>,
}

impl Place {
    /// Normalize a provider place object
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TripEstimatorError::validation("place must be a JSON object"));
        }

        let name = first_string(value, &NAME_KEYS)
            .ok_or_else(|| TripEstimatorError::validation("place has no title or name"))?;

        let thumbnail = first_string(value, &THUMBNAIL_KEYS)
            .filter(|url| !PLACEHOLDER_HOSTS.iter().any(|host| url.contains(host)));

        Ok(Self {
            id: first_string(value, &ID_KEYS),
            name,
            address: first_string(value, &["address"]),
            coordinate: extract_coordinate(value)?,
            thumbnail,
            rating: value.get("rating").and_then(as_number),
            price_per_day: value
                .get("price")
                .and_then(as_number)
                .filter(|price| *price > 0.0),
        })
    }

    /// Price per day, or `default` when the provider did not report one
    #[must_use]
    pub fn price_per_day_or(&self, default: f64) -> f64 {
        self.price_per_day.unwrap_or(default)
    }
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .next()
}

/// Numbers sometimes arrive as strings ("4.5")
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn pair(value: &Value, lat_key: &str, lon_key: &str) -> Option<(f64, f64)> {
    let lat = value.get(lat_key).and_then(as_number)?;
    let lon = value.get(lon_key).and_then(as_number)?;
    Some((lat, lon))
}

fn extract_coordinate(value: &Value) -> Result<Option<Coordinate>> {
    let found = pair(value, "latitude", "longitude")
        .or_else(|| pair(value, "lat", "lng"))
        .or_else(|| value.get("location").and_then(|l| pair(l, "lat", "lng")))
        .or_else(|| {
            value
                .get("gps_coordinates")
                .and_then(|g| pair(g, "latitude", "longitude"))
        });

    found
        .map(|(lat, lon)| Coordinate::new(lat, lon))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serpapi_shape() {
        let raw = json!({
            "title": "Pantai Kuta",
            "place_id": "abc123",
            "address": "Kuta, Badung, Bali",
            "gps_coordinates": { "latitude": -8.7184, "longitude": 115.1686 },
            "serpapi_thumbnail": "https://serpapi.com/thumb.jpg",
            "rating": 4.6
        });
        let place = Place::from_json(&raw).unwrap();
        assert_eq!(place.name, "Pantai Kuta");
        assert_eq!(place.id.as_deref(), Some("abc123"));
        assert_eq!(place.coordinate.unwrap().latitude, -8.7184);
        assert_eq!(place.thumbnail.as_deref(), Some("https://serpapi.com/thumb.jpg"));
        assert_eq!(place.rating, Some(4.6));
        assert!(place.price_per_day.is_none());
    }

    #[test]
    fn test_legacy_shape() {
        let raw = json!({
            "name": "Monas",
            "_id": "65f1",
            "location": { "lat": -6.1754, "lng": 106.8272 },
            "photo": "https://example.com/monas.jpg",
            "price": "20000",
            "rating": "4.7"
        });
        let place = Place::from_json(&raw).unwrap();
        assert_eq!(place.name, "Monas");
        assert_eq!(place.id.as_deref(), Some("65f1"));
        assert_eq!(place.coordinate.unwrap().longitude, 106.8272);
        assert_eq!(place.price_per_day, Some(20000.0));
        assert_eq!(place.rating, Some(4.7));
    }

    #[test]
    fn test_title_wins_over_name() {
        let raw = json!({ "title": "Title", "name": "Name" });
        assert_eq!(Place::from_json(&raw).unwrap().name, "Title");
    }

    #[test]
    fn test_placeholder_thumbnail_dropped() {
        let raw = json!({
            "title": "Tempat Wisata 1",
            "thumbnail": "https://via.placeholder.com/500x300",
            "price": 0
        });
        let place = Place::from_json(&raw).unwrap();
        assert!(place.thumbnail.is_none());
        assert_eq!(place.price_per_day_or(150_000.0), 150_000.0);
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = Place::from_json(&json!({ "address": "Jl. Contoh" })).unwrap_err();
        assert!(matches!(err, TripEstimatorError::Validation { .. }));
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        let raw = json!({ "title": "Nowhere", "lat": 123.0, "lng": 10.0 });
        let err = Place::from_json(&raw).unwrap_err();
        assert!(matches!(err, TripEstimatorError::InvalidCoordinate { .. }));
    }
}
