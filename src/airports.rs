//! Nearest-airport resolution and the flight-suggestion policy
//!
//! The airport table is loaded once at start-up and shared read-only. It is
//! non-empty by construction, so lookups on an [`AirportTable`] never fail;
//! an empty table is reported as a configuration error when it is built.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::geo::distance_km;
use crate::models::{Airport, Coordinate, FlightRoute};
use crate::{Result, TripEstimatorError};

/// Default distance above which a flight is suggested
pub const DEFAULT_FLIGHT_THRESHOLD_KM: f64 = 200.0;

/// Ordered, non-empty airport reference table
#[derive(Debug, Clone)]
pub struct AirportTable {
    airports: Vec<Airport>,
}

impl AirportTable {
    /// Build a table, validating every entry
    pub fn new(airports: Vec<Airport>) -> Result<Self> {
        if airports.is_empty() {
            return Err(TripEstimatorError::EmptyAirportTable);
        }

        let mut seen = HashSet::new();
        for airport in &airports {
            if !airport.has_valid_code() {
                return Err(TripEstimatorError::config(format!(
                    "Invalid IATA code '{}' for {}",
                    airport.code, airport.name
                )));
            }
            if !seen.insert(airport.code.as_str()) {
                return Err(TripEstimatorError::config(format!(
                    "Duplicate airport code '{}'",
                    airport.code
                )));
            }
            airport.coordinate.validate()?;
        }

        Ok(Self { airports })
    }

    /// Load a table from a JSON array of airports
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let airports: Vec<Airport> = serde_json::from_str(&raw)?;
        let table = Self::new(airports)?;
        info!(
            "Loaded {} airports from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// The built-in table of major Indonesian airports
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            airports: builtin_airports(),
        }
    }

    /// Nearest airport to `point`; ties go to the earlier table entry
    #[must_use]
    pub fn nearest(&self, point: &Coordinate) -> &Airport {
        // The table is never empty, so the scan always finds an entry
        nearest_airport(point, &self.airports).unwrap_or(&self.airports[0])
    }

    /// Look up an airport by IATA code (case-insensitive)
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Airport] {
        &self.airports
    }
}

/// Nearest airport in an arbitrary slice.
///
/// Returns `EmptyAirportTable` when `table` is empty.
pub fn nearest_airport<'a>(point: &Coordinate, table: &'a [Airport]) -> Result<&'a Airport> {
    let mut airports = table.iter();
    let first = airports.next().ok_or(TripEstimatorError::EmptyAirportTable)?;

    let (nearest, nearest_distance) = airports.fold(
        (first, distance_km(point, &first.coordinate)),
        |(best, best_distance), airport| {
            let d = distance_km(point, &airport.coordinate);
            if d < best_distance {
                (airport, d)
            } else {
                (best, best_distance)
            }
        },
    );

    debug!(
        "Nearest airport to ({}) is {} at {:.1} km",
        point.format_coordinates(),
        nearest.code,
        nearest_distance
    );
    Ok(nearest)
}

/// Decide whether a flight is worth suggesting between two points.
///
/// A flight is suggested when the points are more than `threshold_km` apart
/// and resolve to different nearest airports.
#[must_use]
pub fn suggest_flight(
    origin: &Coordinate,
    destination: &Coordinate,
    table: &AirportTable,
    threshold_km: f64,
) -> Option<FlightRoute> {
    let trip_distance = distance_km(origin, destination);
    if trip_distance <= threshold_km {
        debug!(
            "Trip distance {:.1} km within {:.0} km threshold, no flight",
            trip_distance, threshold_km
        );
        return None;
    }

    let from = table.nearest(origin);
    let to = table.nearest(destination);
    if from.code == to.code {
        debug!("Origin and destination share airport {}, no flight", from.code);
        return None;
    }

    Some(FlightRoute {
        origin: from.clone(),
        destination: to.clone(),
        distance_km: distance_km(&from.coordinate, &to.coordinate),
    })
}

fn builtin_airports() -> Vec<Airport> {
    vec![
        Airport::new("CGK", "Soekarno-Hatta International Airport", "Jakarta", -6.1256, 106.6558),
        Airport::new("DPS", "I Gusti Ngurah Rai International Airport", "Denpasar", -8.7482, 115.1672),
        Airport::new("SUB", "Juanda International Airport", "Surabaya", -7.3798, 112.7869),
        Airport::new("YIA", "Yogyakarta International Airport", "Yogyakarta", -7.9001, 110.0573),
        Airport::new("SRG", "Jenderal Ahmad Yani International Airport", "Semarang", -6.9727, 110.3750),
        Airport::new("SOC", "Adi Soemarmo International Airport", "Surakarta", -7.5161, 110.7569),
        Airport::new("BDO", "Husein Sastranegara International Airport", "Bandung", -6.9006, 107.5763),
        Airport::new("KNO", "Kualanamu International Airport", "Medan", 3.6422, 98.8853),
        Airport::new("BTJ", "Sultan Iskandar Muda International Airport", "Banda Aceh", 5.5229, 95.4206),
        Airport::new("PDG", "Minangkabau International Airport", "Padang", -0.7869, 100.2808),
        Airport::new("PKU", "Sultan Syarif Kasim II International Airport", "Pekanbaru", 0.4608, 101.4445),
        Airport::new("BTH", "Hang Nadim International Airport", "Batam", 1.1210, 104.1186),
        Airport::new("PLM", "Sultan Mahmud Badaruddin II International Airport", "Palembang", -2.8982, 104.6997),
        Airport::new("PNK", "Supadio International Airport", "Pontianak", -0.1507, 109.4039),
        Airport::new("BPN", "Sultan Aji Muhammad Sulaiman Sepinggan Airport", "Balikpapan", -1.2683, 116.8945),
        Airport::new("UPG", "Sultan Hasanuddin International Airport", "Makassar", -5.0617, 119.5540),
        Airport::new("MDC", "Sam Ratulangi International Airport", "Manado", 1.5493, 124.9260),
        Airport::new("LOP", "Lombok International Airport", "Praya", -8.7573, 116.2767),
        Airport::new("LBJ", "Komodo Airport", "Labuan Bajo", -8.4867, 119.8890),
        Airport::new("KOE", "El Tari International Airport", "Kupang", -10.1716, 123.6711),
        Airport::new("AMQ", "Pattimura International Airport", "Ambon", -3.7103, 128.0891),
        Airport::new("DJJ", "Sentani International Airport", "Jayapura", -2.5770, 140.5164),
    ]
}
