//! Named geographic points.
//!
//! A [`GeoPoint`] stores its position in degrees and radians. Both are set
//! together at construction and never change afterwards; only the attribute
//! bag can be modified.

use crate::dms::{format_dms, parse_dms};
use crate::locale::{Direction, Form, Language};
use crate::unit::Unit;
use crate::{rdf, GeoError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Attribute stamped on search results: distance to the search origin.
pub const DISTANCE_ATTRIBUTE: &str = "distance";

/// Attribute stamped on search results: name of the search origin.
pub const DISTANCE_TO_ATTRIBUTE: &str = "distanceTo";

/// Free-form values carried along with a point (database columns, search results, ...).
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A coordinate as handed over by a caller: a number, or text that is either
/// a decimal number or a DMS angle.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordInput {
    /// A numeric value, degrees or radians
    Number(f64),
    /// Text from a document or database field
    Text(String),
}

impl CoordInput {
    fn to_number(&self) -> Result<f64> {
        match self {
            CoordInput::Number(value) => Ok(*value),
            CoordInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| GeoError::InvalidFormat(text.clone())),
        }
    }
}

impl From<f64> for CoordInput {
    fn from(value: f64) -> Self {
        CoordInput::Number(value)
    }
}

impl From<&str> for CoordInput {
    fn from(value: &str) -> Self {
        CoordInput::Text(value.to_string())
    }
}

impl From<String> for CoordInput {
    fn from(value: String) -> Self {
        CoordInput::Text(value)
    }
}

/// A named point on the Earth's surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GeoPointRecord")]
pub struct GeoPoint {
    name: String,
    latitude: f64,
    longitude: f64,
    latitude_rad: f64,
    longitude_rad: f64,
    attributes: Attributes,
}

/// Serialized form; radians are always derived from the degrees.
#[derive(Deserialize)]
struct GeoPointRecord {
    #[serde(default)]
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    attributes: Attributes,
}

impl From<GeoPointRecord> for GeoPoint {
    fn from(record: GeoPointRecord) -> Self {
        GeoPoint::from_degrees(record.name, record.latitude, record.longitude)
            .with_attributes(record.attributes)
    }
}

impl GeoPoint {
    /// Creates a point from numeric coordinates.
    ///
    /// With `degree == false` the values are taken as radians, unless either
    /// one's magnitude exceeds π. No radian value can be that large, so both
    /// are then read as degrees.
    ///
    /// # Example
    /// ```
    /// use geoclass_geo::GeoPoint;
    ///
    /// // 52.52 > π, so this is read as degrees even without the flag
    /// let berlin = GeoPoint::new("Berlin", 52.52, 13.405, false);
    /// assert_eq!(berlin.latitude(), 52.52);
    /// ```
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, degree: bool) -> Self {
        let degree = degree || latitude.abs() > PI || longitude.abs() > PI;
        if degree {
            Self::from_degrees(name, latitude, longitude)
        } else {
            Self::from_radians(name, latitude, longitude)
        }
    }

    /// Creates a point from decimal degrees.
    pub fn from_degrees(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            latitude_rad: latitude.to_radians(),
            longitude_rad: longitude.to_radians(),
            attributes: Attributes::new(),
        }
    }

    /// Creates a point from radians, without magnitude auto-detection.
    pub fn from_radians(name: impl Into<String>, latitude_rad: f64, longitude_rad: f64) -> Self {
        Self {
            name: name.into(),
            latitude: latitude_rad.to_degrees(),
            longitude: longitude_rad.to_degrees(),
            latitude_rad,
            longitude_rad,
            attributes: Attributes::new(),
        }
    }

    /// Creates a point from loosely typed coordinates.
    ///
    /// Precedence:
    /// 1. both inputs are text containing a space: both are parsed as DMS
    ///    (English hemisphere letters), always degrees;
    /// 2. otherwise both are read as numbers and handed to [`GeoPoint::new`],
    ///    which applies the π magnitude rule to the `degree` flag.
    ///
    /// Text that is neither DMS nor a number fails with [`GeoError::InvalidFormat`].
    pub fn parse(
        name: impl Into<String>,
        latitude: impl Into<CoordInput>,
        longitude: impl Into<CoordInput>,
        degree: bool,
    ) -> Result<Self> {
        let latitude = latitude.into();
        let longitude = longitude.into();

        if let (CoordInput::Text(lat), CoordInput::Text(lon)) = (&latitude, &longitude) {
            if lat.contains(' ') && lon.contains(' ') {
                let lat = parse_dms(lat, Language::En)?;
                let lon = parse_dms(lon, Language::En)?;
                return Ok(Self::from_degrees(name, lat, lon));
            }
        }

        Ok(Self::new(name, latitude.to_number()?, longitude.to_number()?, degree))
    }

    /// Display name (not unique).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in decimal degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in radians.
    #[inline]
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    /// Longitude in radians.
    #[inline]
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_rad
    }

    /// Values carried along from whatever produced the point.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// One attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Inserts or replaces an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Builder form of [`GeoPoint::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Replaces the whole attribute bag.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns a copy carrying `distance` and the origin's name.
    pub fn annotated_with_distance(&self, origin: &GeoPoint, distance: f64) -> GeoPoint {
        self.clone()
            .with_attribute(DISTANCE_ATTRIBUTE, distance)
            .with_attribute(DISTANCE_TO_ATTRIBUTE, origin.name.clone())
    }

    /// Distance stamped by a proximity search, if any.
    pub fn distance_attribute(&self) -> Option<f64> {
        self.attribute(DISTANCE_ATTRIBUTE).and_then(serde_json::Value::as_f64)
    }

    /// Great-circle distance on the mean-radius sphere (spherical law of cosines).
    ///
    /// # Example
    /// ```
    /// use geoclass_geo::{GeoPoint, Unit};
    ///
    /// let berlin = GeoPoint::from_degrees("Berlin", 52.52, 13.405);
    /// let paris = GeoPoint::from_degrees("Paris", 48.8566, 2.3522);
    /// assert!((berlin.distance_to(&paris, Unit::Kilometer) - 878.0).abs() < 5.0);
    /// ```
    ///
    /// Coincident points are exactly 0 apart. The cosine sum can round to just
    /// below 1 for them, which `acos` turns into a spurious ~0.1 m.
    pub fn distance_to(&self, other: &GeoPoint, unit: Unit) -> f64 {
        if self.latitude_rad == other.latitude_rad && self.longitude_rad == other.longitude_rad {
            return 0.0;
        }
        let cos_angle = self.latitude_rad.sin() * other.latitude_rad.sin()
            + self.latitude_rad.cos()
                * other.latitude_rad.cos()
                * (self.longitude_rad - other.longitude_rad).cos();
        central_angle(cos_angle) * unit.earth_radius()
    }

    /// Signed distance along the meridian; negative when `other` lies further south.
    pub fn north_south_distance(&self, other: &GeoPoint, unit: Unit) -> f64 {
        let direction = if self.latitude_rad > other.latitude_rad { -1.0 } else { 1.0 };
        let cos_angle = self.latitude_rad.sin() * other.latitude_rad.sin()
            + self.latitude_rad.cos() * other.latitude_rad.cos();
        direction * central_angle(cos_angle) * unit.earth_radius()
    }

    /// Signed west-east distance at this point's latitude; negative when
    /// `other` lies further west.
    ///
    /// Uses `acos(sin²φ + cos²φ·cos Δλ)`, the great-circle distance between two
    /// points on the same parallel, rather than the arc along the parallel.
    pub fn west_east_distance(&self, other: &GeoPoint, unit: Unit) -> f64 {
        let direction = if self.longitude_rad > other.longitude_rad { -1.0 } else { 1.0 };
        let cos_angle = self.latitude_rad.sin().powi(2)
            + self.latitude_rad.cos().powi(2) * (self.longitude_rad - other.longitude_rad).cos();
        direction * central_angle(cos_angle) * unit.earth_radius()
    }

    /// Compass sector in which `other` lies, seen from this point.
    ///
    /// `None` only when the component distances are NaN.
    pub fn direction_to(&self, other: &GeoPoint) -> Option<Direction> {
        let x = self.west_east_distance(other, Unit::Kilometer);
        let y = self.north_south_distance(other, Unit::Kilometer);
        Direction::from_angle(y.atan2(x).to_degrees())
    }

    /// Localized compass direction of `other`, e.g. "SW" or "Südwesten".
    ///
    /// Returns an empty string if no sector matches.
    pub fn bearing_to(&self, other: &GeoPoint, form: Form, language: Language) -> &'static str {
        self.direction_to(other)
            .map_or("", |direction| direction.label(form, language))
    }

    /// Distance rounded to two decimals followed by the unit label, e.g. "878.43 km".
    pub fn distance_string(&self, other: &GeoPoint, unit: Unit) -> String {
        let rounded = (self.distance_to(other, unit) * 100.0).round() / 100.0;
        format!("{} {}", rounded, unit.label())
    }

    /// Latitude as hemisphere letter plus DMS, e.g. "N 52° 31' 12''".
    pub fn latitude_dms(&self) -> String {
        let hemisphere = if self.latitude > 0.0 { Direction::N } else { Direction::S };
        format!("{} {}", hemisphere, format_dms(self.latitude, 0))
    }

    /// Longitude as hemisphere letter plus DMS, e.g. "E 13° 24' 18''".
    pub fn longitude_dms(&self) -> String {
        let hemisphere = if self.longitude > 0.0 { Direction::E } else { Direction::W };
        format!("{} {}", hemisphere, format_dms(self.longitude, 0))
    }

    /// Short description: "name (lat/lon)".
    pub fn info(&self) -> String {
        format!("{} ({}/{})", self.name, self.latitude, self.longitude)
    }

    /// W3C `geo:Point` element for this point.
    pub fn rdf_point_entry(&self, indent: usize) -> String {
        rdf::point_entry(self, indent)
    }

    /// Complete RDF document containing only this point.
    pub fn rdf_document(&self) -> String {
        rdf::document(std::slice::from_ref(self))
    }
}

/// Case-insensitive ordering by name.
pub fn cmp_by_name(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Ordering by the `distance` attribute; points without one compare equal.
pub fn cmp_by_distance(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    match (a.distance_attribute(), b.distance_attribute()) {
        (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// `acos` with its argument clamped to [-1, 1].
///
/// Rounding can push the cosine of a zero or straight angle just past ±1,
/// where `acos` would return NaN.
#[inline]
fn central_angle(cos_angle: f64) -> f64 {
    cos_angle.clamp(-1.0, 1.0).acos()
}
