//! Great-circle distance on a spherical Earth.

use crate::CoreError;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two `(latitude, longitude)` points in degrees.
///
/// Pure and unguarded: NaN or infinite inputs propagate into the result.
/// Callers that accept user input should run [`validate_coordinate`] first.
#[must_use]
pub fn compute_distance_meters(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Reject non-finite or out-of-range coordinates.
///
/// # Errors
///
/// Returns [`CoreError::InvalidArgument`] when latitude is outside
/// `[-90, 90]`, longitude is outside `[-180, 180]`, or either is not finite.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::InvalidArgument {
            name: "latitude",
            reason: format!("{latitude} is not within [-90, 90]"),
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::InvalidArgument {
            name: "longitude",
            reason: format!("{longitude} is not within [-180, 180]"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC: (f64, f64) = (40.7128, -74.006);
    const LONDON: (f64, f64) = (51.5074, -0.1278);

    #[test]
    fn distance_to_self_is_zero() {
        for p in [NYC, LONDON, (0.0, 0.0), (-89.9, 179.9)] {
            assert!(compute_distance_meters(p, p).abs() < f64::EPSILON, "{p:?}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = compute_distance_meters(NYC, LONDON);
        let ba = compute_distance_meters(LONDON, NYC);
        assert!((ab - ba).abs() < 1e-6, "ab={ab} ba={ba}");
    }

    #[test]
    fn one_degree_of_latitude_at_equator() {
        let d = compute_distance_meters((0.0, 0.0), (1.0, 0.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn nyc_to_london_is_about_5570_km() {
        let d = compute_distance_meters(NYC, LONDON);
        assert!((d - 5_570_000.0).abs() < 10_000.0, "got {d}");
    }

    #[test]
    fn nan_input_propagates() {
        assert!(compute_distance_meters((f64::NAN, 0.0), (0.0, 0.0)).is_nan());
    }

    #[test]
    fn validate_accepts_bounds() {
        assert!(validate_coordinate(90.0, 180.0).is_ok());
        assert!(validate_coordinate(-90.0, -180.0).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_latitude() {
        let err = validate_coordinate(91.0, 0.0).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidArgument { name: "latitude", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn validate_rejects_non_finite_longitude() {
        let err = validate_coordinate(0.0, f64::INFINITY).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidArgument { name: "longitude", .. }),
            "got {err:?}"
        );
    }
}
