//! Batch distance calculations with optional parallelism.
//!
//! These helpers back proximity searches over in-memory point sets. Results are
//! annotated copies (see [`GeoPoint::annotated_with_distance`]); the input
//! points are never modified.

use crate::{cmp_by_distance, GeoPoint, Unit};

/// Distances from `origin` to each of `points`, in input order.
///
/// # Example
/// ```
/// use geoclass_geo::{batch::distances_from, GeoPoint, Unit};
///
/// let frankfurt = GeoPoint::from_degrees("Frankfurt", 50.1109, 8.6821);
/// let points = vec![
///     GeoPoint::from_degrees("Berlin", 52.52, 13.405),
///     GeoPoint::from_degrees("Paris", 48.8566, 2.3522),
/// ];
///
/// let distances = distances_from(&frankfurt, &points, Unit::Kilometer);
/// assert_eq!(distances.len(), 2);
/// ```
pub fn distances_from(origin: &GeoPoint, points: &[GeoPoint], unit: Unit) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|point| origin.distance_to(point, unit))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|point| origin.distance_to(point, unit))
            .collect()
    }
}

/// Annotated copies of `points`, sorted nearest first.
///
/// # Arguments
/// * `origin` - Point to measure from
/// * `points` - Candidates
/// * `unit` - Unit of the stamped distances
/// * `max_results` - Maximum number of results to return (None for all)
pub fn nearest(
    origin: &GeoPoint,
    points: &[GeoPoint],
    unit: Unit,
    max_results: Option<usize>,
) -> Vec<GeoPoint> {
    let mut results = annotate(origin, points, unit);
    sort_by_distance(&mut results);

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Annotated copies of the points within `radius` of `origin`, sorted nearest first.
///
/// When `max_hits` is set, only the first `max_hits` matches in input order
/// are kept, and those are then sorted. This is not the same as the
/// `max_hits` nearest points.
pub fn within_radius(
    origin: &GeoPoint,
    points: &[GeoPoint],
    radius: f64,
    unit: Unit,
    max_hits: Option<usize>,
) -> Vec<GeoPoint> {
    let distances = distances_from(origin, points, unit);

    let mut results: Vec<GeoPoint> = points
        .iter()
        .zip(distances)
        .filter(|(_, distance)| *distance <= radius)
        .take(max_hits.unwrap_or(usize::MAX))
        .map(|(point, distance)| point.annotated_with_distance(origin, distance))
        .collect();

    tracing::debug!(
        origin = %origin.name(),
        candidates = points.len(),
        matches = results.len(),
        radius,
        unit = %unit,
        "Radius search"
    );

    sort_by_distance(&mut results);
    results
}

/// Stable sort by the `distance` attribute.
pub fn sort_by_distance(points: &mut [GeoPoint]) {
    points.sort_by(cmp_by_distance);
}

fn annotate(origin: &GeoPoint, points: &[GeoPoint], unit: Unit) -> Vec<GeoPoint> {
    points
        .iter()
        .zip(distances_from(origin, points, unit))
        .map(|(point, distance)| point.annotated_with_distance(origin, distance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frankfurt() -> GeoPoint {
        GeoPoint::from_degrees("Frankfurt", 50.1109, 8.6821)
    }

    fn create_test_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::from_degrees("London", 51.5074, -0.1276),
            GeoPoint::from_degrees("Berlin", 52.5200, 13.4050),
            GeoPoint::from_degrees("Paris", 48.8566, 2.3522),
        ]
    }

    #[test]
    fn test_batch_distances() {
        let points = create_test_points();
        let distances = distances_from(&frankfurt(), &points, Unit::Kilometer);

        assert_eq!(distances.len(), 3);
        // Berlin is ~424 km from Frankfurt
        assert!((distances[1] - 424.0).abs() < 10.0, "Berlin: {}", distances[1]);
    }

    #[test]
    fn test_nearest_sorted_and_annotated() {
        let points = create_test_points();
        let results = nearest(&frankfurt(), &points, Unit::Kilometer, None);

        let names: Vec<_> = results.iter().map(GeoPoint::name).collect();
        assert_eq!(names, ["Berlin", "Paris", "London"]);
        for window in results.windows(2) {
            assert!(window[0].distance_attribute() <= window[1].distance_attribute());
        }
        assert_eq!(results[0].attribute("distanceTo"), Some(&serde_json::json!("Frankfurt")));
        // inputs untouched
        assert!(points.iter().all(|p| p.attributes().is_empty()));
    }

    #[test]
    fn test_max_results() {
        let results = nearest(&frankfurt(), &create_test_points(), Unit::Kilometer, Some(2));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_radius_filter() {
        let results = within_radius(&frankfurt(), &create_test_points(), 500.0, Unit::Kilometer, None);
        // London (~640 km) is outside
        assert!(results.iter().all(|r| r.distance_attribute().unwrap() <= 500.0));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_max_hits_applies_in_input_order() {
        // London is first in input order but furthest away
        let results = within_radius(&frankfurt(), &create_test_points(), 1000.0, Unit::Kilometer, Some(1));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "London");
    }

    #[test]
    fn test_radius_in_miles() {
        let results = within_radius(&frankfurt(), &create_test_points(), 350.0, Unit::Mile, None);
        let names: Vec<_> = results.iter().map(GeoPoint::name).collect();
        assert_eq!(names, ["Berlin", "Paris"]);
    }
}
