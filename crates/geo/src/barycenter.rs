//! Mean position of a set of points.

use crate::{GeoError, GeoPoint, Result};

/// Name given to a barycenter when the caller has none.
pub const DEFAULT_BARYCENTER_NAME: &str = "Barycenter";

/// Arithmetic mean of the latitudes and longitudes of `points`.
///
/// This is not a spherical centroid: it averages degree values directly, so
/// it is only meaningful for points that lie close together and do not
/// straddle the antimeridian.
///
/// # Example
/// ```
/// use geoclass_geo::{barycenter, GeoPoint};
///
/// let points = [
///     GeoPoint::from_degrees("a", 50.0, 8.0),
///     GeoPoint::from_degrees("b", 52.0, 10.0),
/// ];
/// let center = barycenter(&points, "center").unwrap();
/// assert_eq!((center.latitude(), center.longitude()), (51.0, 9.0));
/// ```
pub fn barycenter(points: &[GeoPoint], name: impl Into<String>) -> Result<GeoPoint> {
    if points.is_empty() {
        return Err(GeoError::EmptyInput("barycenter of zero points".into()));
    }

    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.latitude(), lon + p.longitude()));
    let count = points.len() as f64;

    Ok(GeoPoint::from_degrees(name, lat_sum / count, lon_sum / count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        let result = barycenter(&[], DEFAULT_BARYCENTER_NAME);
        assert!(matches!(result, Err(GeoError::EmptyInput(_))));
    }

    #[test]
    fn test_small_coordinates_stay_degrees() {
        // means below π must not be mistaken for radians
        let points = [
            GeoPoint::from_degrees("a", 1.0, 2.0),
            GeoPoint::from_degrees("b", 2.0, 3.0),
        ];
        let center = barycenter(&points, DEFAULT_BARYCENTER_NAME).unwrap();
        assert_eq!(center.latitude(), 1.5);
        assert_eq!(center.longitude(), 2.5);
        assert_eq!(center.name(), "Barycenter");
    }

    proptest! {
        #[test]
        fn prop_single_point_is_its_own_barycenter(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let p = GeoPoint::from_degrees("p", lat, lon);
            let center = barycenter(std::slice::from_ref(&p), "p").unwrap();
            prop_assert_eq!(center, p);
        }
    }
}
