//! Great-circle distance on a spherical Earth (R = 6371 km)

use haversine::{Units, distance};

use crate::models::Coordinate;

/// Mean Earth radius used by the haversine crate for `Units::Kilometers`
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres.
///
/// Uses a spherical Earth; no ellipsoidal correction is applied. Identical
/// points yield exactly `0.0`, antipodal points half the circumference.
#[must_use]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d = distance((*a).into(), (*b).into(), Units::Kilometers);
    // Near-antipodal points round the haversine term just past 1
    if d.is_nan() {
        std::f64::consts::PI * EARTH_RADIUS_KM
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    const JAKARTA: (f64, f64) = (-6.2088, 106.8456);
    const DENPASAR: (f64, f64) = (-8.7462, 115.1669);

    #[rstest]
    #[case(JAKARTA)]
    #[case(DENPASAR)]
    #[case((0.0, 0.0))]
    #[case((90.0, 180.0))]
    #[case((-45.5, -120.25))]
    fn test_identical_points(#[case] p: (f64, f64)) {
        let a = c(p.0, p.1);
        assert_eq!(distance_km(&a, &a), 0.0);
    }

    #[rstest]
    #[case(JAKARTA, DENPASAR)]
    #[case((52.52, 13.405), (-33.8688, 151.2093))]
    #[case((0.0, -179.9), (0.0, 179.9))]
    fn test_symmetry(#[case] p: (f64, f64), #[case] q: (f64, f64)) {
        let a = c(p.0, p.1);
        let b = c(q.0, q.1);
        assert!((distance_km(&a, &b) - distance_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_inequality() {
        let points = [
            c(JAKARTA.0, JAKARTA.1),
            c(DENPASAR.0, DENPASAR.1),
            c(3.5952, 98.6722),
            c(-5.1477, 119.4327),
            c(48.8566, 2.3522),
        ];
        for a in &points {
            for b in &points {
                for m in &points {
                    let direct = distance_km(a, b);
                    let via = distance_km(a, m) + distance_km(m, b);
                    assert!(direct <= via + 1e-6, "{direct} > {via}");
                }
            }
        }
    }

    #[test]
    fn test_jakarta_to_denpasar() {
        let d = distance_km(&c(JAKARTA.0, JAKARTA.1), &c(DENPASAR.0, DENPASAR.1));
        assert!((d - 960.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_across_antimeridian() {
        let d = distance_km(&c(0.0, -179.9), &c(0.0, 179.9));
        assert!(d < 25.0, "got {d}");
    }

    #[test]
    fn test_non_negative() {
        let d = distance_km(&c(-90.0, 0.0), &c(90.0, 0.0));
        assert!(d > 0.0);
        assert!((d - std::f64::consts::PI * 6371.0).abs() < 1.0);
    }

    #[rstest]
    #[case(89.33)]
    #[case(-89.33)]
    #[case(-88.17)]
    #[case(45.0)]
    #[case(0.0)]
    fn test_antipodal_pair(#[case] lat: f64) {
        let d = distance_km(&c(lat, 0.0), &c(-lat, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_antipodal_sweep_is_finite() {
        for step in -9000..=9000 {
            let lat = f64::from(step) / 100.0;
            for lon in [0.0, 106.8456, -179.5] {
                let other = if lon > 0.0 { lon - 180.0 } else { lon + 180.0 };
                let d = distance_km(&c(lat, lon), &c(-lat, other));
                assert!(d.is_finite() && d >= 0.0, "({lat}, {lon}) gave {d}");
            }
        }
    }
}
