//! Geodesic computation and unit conversion for named locations.
//!
//! This crate provides:
//! - Great-circle distances on a mean-radius sphere, in several units
//! - North-south / west-east component distances and 8-point compass bearings
//! - Degrees/minutes/seconds parsing and formatting
//! - Barycenters of point sets
//! - English and German direction names
//! - Batch proximity helpers with optional parallelism
//! - RDF (W3C basic geo) export
//!
//! All operations are pure and synchronous; [`GeoPoint`] values can be shared
//! across threads freely.
//!
//! # Example
//!
//! ```
//! use geoclass_geo::{Form, GeoPoint, Language, Unit};
//!
//! let berlin = GeoPoint::new("Berlin", 52.52, 13.405, true);
//! let paris = GeoPoint::new("Paris", 48.8566, 2.3522, true);
//!
//! let km = berlin.distance_to(&paris, Unit::Kilometer);
//! assert!((km - 878.0).abs() < 5.0); // ~878 km
//! assert_eq!(berlin.bearing_to(&paris, Form::Short, Language::En), "SW");
//! ```

mod barycenter;
mod dms;
mod error;
mod locale;
mod point;
mod unit;
pub mod batch;
pub mod rdf;

pub use barycenter::{barycenter, DEFAULT_BARYCENTER_NAME};
pub use dms::{format_dms, parse_dms, Dms};
pub use error::{GeoError, GeoErrorCode, Result};
pub use locale::{compass_table, error_label, negative_hemispheres, no_name_label, Direction, Form, Language};
pub use point::{
    cmp_by_distance, cmp_by_name, Attributes, CoordInput, GeoPoint, DISTANCE_ATTRIBUTE,
    DISTANCE_TO_ATTRIBUTE,
};
pub use unit::{earth_radius_for_code, unit_label_for_code, Unit, EARTH_RADIUS_KM};
