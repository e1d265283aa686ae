//! Distance units and Earth radius lookups.
//!
//! Every unit is defined by a fixed factor relative to kilometers. The Earth is
//! modelled as a sphere with the mean radius of 6371 km (the WGS84 equatorial
//! radius would be 6378.137 km).

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per mile.
pub const MILE_TO_KM: f64 = 1.609343994;
/// Kilometers per inch.
pub const INCH_TO_KM: f64 = 0.0000254;
/// Kilometers per nautical mile.
pub const NAUTICAL_MILE_TO_KM: f64 = 1.852;
/// Kilometers per foot.
pub const FOOT_TO_KM: f64 = 0.0003048;
/// Kilometers per yard.
pub const YARD_TO_KM: f64 = 0.0009144;

/// Supported distance units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Kilometers
    #[default]
    Kilometer,
    /// Statute miles
    Mile,
    /// Inches
    Inch,
    /// Nautical (sea) miles
    NauticalMile,
    /// Feet
    Foot,
    /// Yards
    Yard,
}

impl Unit {
    /// All units, in code order.
    pub const ALL: [Unit; 6] = [
        Unit::Kilometer,
        Unit::Mile,
        Unit::Inch,
        Unit::NauticalMile,
        Unit::Foot,
        Unit::Yard,
    ];

    /// Length of one unit in kilometers.
    #[inline]
    pub fn km_per_unit(self) -> f64 {
        match self {
            Unit::Kilometer => 1.0,
            Unit::Mile => MILE_TO_KM,
            Unit::Inch => INCH_TO_KM,
            Unit::NauticalMile => NAUTICAL_MILE_TO_KM,
            Unit::Foot => FOOT_TO_KM,
            Unit::Yard => YARD_TO_KM,
        }
    }

    /// Number of units in one kilometer.
    #[inline]
    pub fn units_per_km(self) -> f64 {
        1.0 / self.km_per_unit()
    }

    /// Converts a distance in kilometers to this unit.
    #[inline]
    pub fn from_km(self, km: f64) -> f64 {
        km * self.units_per_km()
    }

    /// Converts a distance in this unit to kilometers.
    #[inline]
    pub fn to_km(self, value: f64) -> f64 {
        value * self.km_per_unit()
    }

    /// Earth's mean radius expressed in this unit.
    #[inline]
    pub fn earth_radius(self) -> f64 {
        match self {
            Unit::Kilometer => EARTH_RADIUS_KM,
            other => EARTH_RADIUS_KM * other.units_per_km(),
        }
    }

    /// Short display label ("km", "miles", "inch", "sm", "ft", "yd").
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kilometer => "km",
            Unit::Mile => "miles",
            Unit::Inch => "inch",
            Unit::NauticalMile => "sm",
            Unit::Foot => "ft",
            Unit::Yard => "yd",
        }
    }

    /// Numeric identifier used by older callers and stored configurations.
    pub fn code(self) -> u32 {
        match self {
            Unit::Kilometer => 1,
            Unit::Mile => 2,
            Unit::Inch => 3,
            Unit::NauticalMile => 4,
            Unit::Foot => 11,
            Unit::Yard => 12,
        }
    }

    /// Looks up a unit by its numeric identifier.
    pub fn from_code(code: u32) -> Option<Unit> {
        Unit::ALL.into_iter().find(|unit| unit.code() == code)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Unit::Kilometer),
            "mi" | "mile" | "miles" => Ok(Unit::Mile),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            "sm" | "nm" | "nmi" | "nautical_mile" | "nautical_miles" => Ok(Unit::NauticalMile),
            "ft" | "foot" | "feet" => Ok(Unit::Foot),
            "yd" | "yard" | "yards" => Ok(Unit::Yard),
            _ => Err(GeoError::UnknownUnit(s.to_string())),
        }
    }
}

/// Earth radius for a numeric unit identifier.
///
/// Unmapped identifiers fall back to kilometers. Use [`unit_label_for_code`]
/// when an unknown identifier must be reported instead.
pub fn earth_radius_for_code(code: u32) -> f64 {
    Unit::from_code(code).unwrap_or_default().earth_radius()
}

/// Display label for a numeric unit identifier.
///
/// Unlike [`earth_radius_for_code`] there is no fallback: an unmapped identifier
/// fails with [`GeoError::UnknownUnit`].
pub fn unit_label_for_code(code: u32) -> Result<&'static str> {
    Unit::from_code(code)
        .map(Unit::label)
        .ok_or_else(|| GeoError::UnknownUnit(format!("unit code {}", code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_radius_km() {
        assert_eq!(Unit::Kilometer.earth_radius(), 6371.0);
    }

    #[test]
    fn test_earth_radius_miles() {
        let expected = 6371.0 * (1.0 / 1.609343994);
        assert!((Unit::Mile.earth_radius() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Unit::ALL.iter().map(|u| u.label()).collect();
        assert_eq!(labels, ["km", "miles", "inch", "sm", "ft", "yd"]);
    }

    #[test]
    fn test_code_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_code(unit.code()), Some(unit));
        }
        assert_eq!(Unit::from_code(5), None);
    }

    #[test]
    fn test_unknown_code_radius_falls_back_to_km() {
        assert_eq!(earth_radius_for_code(99), EARTH_RADIUS_KM);
        assert_eq!(earth_radius_for_code(4), Unit::NauticalMile.earth_radius());
    }

    #[test]
    fn test_unknown_code_label_fails() {
        assert_eq!(unit_label_for_code(11), Ok("ft"));
        assert!(matches!(unit_label_for_code(99), Err(GeoError::UnknownUnit(_))));
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("km".parse::<Unit>().unwrap(), Unit::Kilometer);
        assert_eq!("Miles".parse::<Unit>().unwrap(), Unit::Mile);
        assert_eq!("sm".parse::<Unit>().unwrap(), Unit::NauticalMile);
        assert!("parsec".parse::<Unit>().is_err());
    }

    #[test]
    fn test_conversions() {
        assert!((Unit::Foot.to_km(1000.0) - 0.3048).abs() < 1e-12);
        assert!((Unit::NauticalMile.from_km(1.852) - 1.0).abs() < 1e-12);
    }
}
