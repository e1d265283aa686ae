//! SQL rendering of the great-circle distance.

use crate::FieldMap;
use geoclass_geo::{GeoPoint, Unit};

/// SQL expression for the distance between `origin` and each row, in `unit`.
///
/// Mirrors [`GeoPoint::distance_to`] using the row's degree columns named in
/// `fields`. Rows where the database yields `NULL` (typically an `ACOS`
/// domain error for coincident points) evaluate to 0.
///
/// # Example
/// ```
/// use geoclass_sources::{distance_formula, FieldMap};
/// use geoclass_geo::{GeoPoint, Unit};
///
/// let origin = GeoPoint::from_radians("o", 0.5, 0.25);
/// let sql = distance_formula(&origin, &FieldMap::new("name", "lat", "lon"), Unit::Kilometer);
/// assert!(sql.starts_with("COALESCE((ACOS((SIN(0.5)*SIN(RADIANS(lat)))"));
/// assert!(sql.ends_with("* 6371),0)"));
/// ```
pub fn distance_formula(origin: &GeoPoint, fields: &FieldMap, unit: Unit) -> String {
    let lat_rad = origin.latitude_rad();
    // `--` would open an SQL comment
    let lon_rad = match origin.longitude_rad() {
        v if v.is_sign_negative() => format!("({v})"),
        v => v.to_string(),
    };
    let lat = &fields.latitude;
    let lon = &fields.longitude;
    let radius = unit.earth_radius();

    format!(
        "COALESCE((ACOS((SIN({lat_rad})*SIN(RADIANS({lat}))) + \
         (COS({lat_rad})*COS(RADIANS({lat}))*COS(RADIANS({lon})-{lon_rad}))) * {radius}),0)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_expression() {
        let origin = GeoPoint::from_radians("o", 0.5, -0.25);
        let sql = distance_formula(&origin, &FieldMap::new("n", "DD_LAT", "DD_LONG"), Unit::Kilometer);
        assert_eq!(
            sql,
            "COALESCE((ACOS((SIN(0.5)*SIN(RADIANS(DD_LAT))) + \
             (COS(0.5)*COS(RADIANS(DD_LAT))*COS(RADIANS(DD_LONG)-(-0.25)))) * 6371),0)"
        );
    }

    #[test]
    fn test_radius_follows_unit() {
        let origin = GeoPoint::from_degrees("o", 50.0, 8.0);
        let km = distance_formula(&origin, &FieldMap::default(), Unit::Kilometer);
        let nm = distance_formula(&origin, &FieldMap::default(), Unit::NauticalMile);
        let nm_radius = Unit::NauticalMile.earth_radius().to_string();
        assert!(km.ends_with(" * 6371),0)"));
        assert!(nm.ends_with(&format!(" * {nm_radius}),0)")));
        assert!(!nm_radius.contains('e'), "no exponent notation: {nm_radius}");
    }

    proptest! {
        #[test]
        fn prop_never_opens_a_comment(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let origin = GeoPoint::from_degrees("o", lat, lon);
            let sql = distance_formula(&origin, &FieldMap::default(), Unit::Mile);
            prop_assert!(!sql.contains("--"), "{}", sql);
        }
    }
}
