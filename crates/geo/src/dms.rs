//! Degrees/minutes/seconds conversion.
//!
//! Parsing accepts loosely formatted text such as `51° 24' 32.123'' W`,
//! `-51 24 32` or the compact `512432`. The sign comes from a leading or
//! trailing `+`/`-` or from a localized south/west hemisphere letter.

use crate::locale::{negative_hemispheres, Language};
use crate::{GeoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// One compiled pattern per [`Language`], in `Language` order.
static DMS_PATTERNS: Lazy<[Regex; 2]> =
    Lazy::new(|| [build_pattern(Language::En), build_pattern(Language::De)]);

fn build_pattern(language: Language) -> Regex {
    let signs: String = negative_hemispheres(language)
        .iter()
        .map(|token| regex::escape(token))
        .collect();

    let pattern = format!(
        r#"(?i)\s*([{signs}\-+]?)\s*([0-9]{{1,3}})[°\s]*([0-9]{{1,2}})['\s]*([0-9]{{1,2}})([,.]*)([0-9]*)['"\s]*([{signs}\-+]?)"#
    );
    Regex::new(&pattern).unwrap()
}

/// A parsed sexagesimal angle.
///
/// Components are range-checked but not geographically validated: degrees may
/// be anything up to 360.
#[derive(Debug, Clone, PartialEq)]
pub struct Dms {
    /// True when a negative sign or south/west hemisphere token was present
    pub negative: bool,
    /// Whole degrees (0..=360)
    pub degrees: u32,
    /// Whole minutes (0..60)
    pub minutes: u32,
    /// Seconds including the fractional part
    pub seconds: f64,
}

impl Dms {
    /// Parses DMS text using the hemisphere letters of `language`.
    ///
    /// Input of exactly five or six characters is left-padded with zeros so
    /// that compact forms like `512432` split into degrees, minutes, seconds.
    pub fn parse(text: &str, language: Language) -> Result<Dms> {
        let padded;
        let text = match text.chars().count() {
            6 => {
                padded = format!("0{}", text);
                padded.as_str()
            }
            5 => {
                padded = format!("00{}", text);
                padded.as_str()
            }
            _ => text,
        };

        let caps = DMS_PATTERNS[language as usize]
            .captures(text)
            .ok_or_else(|| GeoError::InvalidFormat(text.to_string()))?;

        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let number = |i: usize| {
            group(i)
                .parse::<u32>()
                .map_err(|_| GeoError::InvalidFormat(text.to_string()))
        };

        let negatives = negative_hemispheres(language);
        let is_negative = |token: &str| {
            let token = token.to_uppercase();
            token == "-" || negatives.contains(&token.as_str())
        };
        let negative = is_negative(group(1)) || is_negative(group(7));

        let degrees = number(2)?;
        let minutes = number(3)?;
        let whole_seconds = number(4)?;

        // Only the integer part of the seconds is bounded.
        if degrees > 360 || minutes >= 60 || whole_seconds >= 60 {
            return Err(GeoError::OutOfRange(format!(
                "{}° {}' {}'' in {:?}",
                degrees, minutes, whole_seconds, text
            )));
        }

        let fraction = group(6);
        let seconds = if fraction.is_empty() {
            f64::from(whole_seconds)
        } else {
            format!("{}.{}", whole_seconds, fraction)
                .parse::<f64>()
                .map_err(|_| GeoError::InvalidFormat(text.to_string()))?
        };

        Ok(Dms {
            negative,
            degrees,
            minutes,
            seconds,
        })
    }

    /// Decimal degrees.
    ///
    /// Evaluated as `D + (M + S·10/6/100)·10/6/100`, which is `D + M/60 + S/3600`
    /// with a fixed operation order. Existing stored values depend on the exact
    /// rounding of this order.
    pub fn to_degrees(&self) -> f64 {
        let sign = if self.negative { -1.0 } else { 1.0 };
        let minutes = f64::from(self.minutes) + (self.seconds * 10.0 / 6.0) / 100.0;
        sign * (f64::from(self.degrees) + (minutes * 10.0 / 6.0) / 100.0)
    }
}

/// Converts DMS text to decimal degrees.
///
/// # Example
/// ```
/// use geoclass_geo::{parse_dms, Language};
///
/// let lon = parse_dms("51° 24' 32.123'' W", Language::En).unwrap();
/// assert!((lon + 51.4089).abs() < 1e-4);
/// ```
pub fn parse_dms(text: &str, language: Language) -> Result<f64> {
    Dms::parse(text, language).map(|dms| dms.to_degrees())
}

/// Formats the absolute value of `degrees` as `D° M' S[.fff]''`.
///
/// Seconds carry `decimal_places` fractional digits. A half unit of the last
/// printed place is added before the components are truncated, so the output
/// is rounded. The hemisphere letter is left to the caller.
pub fn format_dms(degrees: f64, decimal_places: u32) -> String {
    let scale = 10f64.powi(decimal_places as i32);

    let mut rest = degrees.abs() + 0.5 / 3600.0 / scale;
    let whole = rest.floor();
    rest = 60.0 * (rest - whole);
    let minutes = rest.floor();
    rest = 60.0 * (rest - minutes);
    let seconds = rest.floor();

    let mut sub = rest - seconds;
    for _ in 0..decimal_places {
        sub *= 10.0;
    }
    let sub = sub.floor();

    let seconds = if decimal_places > 0 {
        format!(
            "{}.{:0>width$}",
            seconds as u64,
            sub as u64,
            width = decimal_places as usize
        )
    } else {
        (seconds as u64).to_string()
    };

    format!("{}° {}' {}''", whole as u64, minutes as u64, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_west_is_negative() {
        let value = parse_dms("51° 24' 32.123'' W", Language::En).unwrap();
        assert!((value - (-51.4089)).abs() < 1e-4, "got {}", value);
    }

    #[test]
    fn test_parse_plain_positive() {
        let value = parse_dms("50° 10' 60''", Language::En);
        // 60 seconds is out of range
        assert!(matches!(value, Err(GeoError::OutOfRange(_))));

        let value = parse_dms("7° 26' 31''", Language::En).unwrap();
        assert!((value - 7.441944).abs() < 1e-6);
    }

    #[test]
    fn test_parse_leading_signs() {
        assert!(parse_dms("S 33 52 4", Language::En).unwrap() < 0.0);
        assert!(parse_dms("- 33 52 4", Language::En).unwrap() < 0.0);
        assert!(parse_dms("+ 33 52 4", Language::En).unwrap() > 0.0);
        assert!(parse_dms("w 33 52 4", Language::De).unwrap() < 0.0);
        // East and north are positive
        assert!(parse_dms("33 52 4 N", Language::En).unwrap() > 0.0);
    }

    #[test]
    fn test_parse_comma_fraction() {
        let dms = Dms::parse("12° 30' 15,5''", Language::De).unwrap();
        assert_eq!(dms.seconds, 15.5);
        assert!(!dms.negative);
    }

    #[test]
    fn test_compact_forms_are_padded() {
        let dms = Dms::parse("512432", Language::En).unwrap();
        assert_eq!((dms.degrees, dms.minutes), (51, 24));
        assert_eq!(dms.seconds, 32.0);

        let dms = Dms::parse("51243", Language::En).unwrap();
        assert_eq!((dms.degrees, dms.minutes), (5, 12));
        assert_eq!(dms.seconds, 43.0);
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(matches!(parse_dms("north pole", Language::En), Err(GeoError::InvalidFormat(_))));
        assert!(matches!(parse_dms("", Language::En), Err(GeoError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(parse_dms("361 0 0", Language::En), Err(GeoError::OutOfRange(_))));
        assert!(matches!(parse_dms("10 60 0", Language::En), Err(GeoError::OutOfRange(_))));
        assert!(parse_dms("360 59 59.99", Language::En).is_ok());
    }

    #[test]
    fn test_operation_order_matches_textbook_closely() {
        let dms = Dms::parse("51 24 32.123", Language::En).unwrap();
        let textbook = 51.0 + 24.0 / 60.0 + 32.123 / 3600.0;
        assert!((dms.to_degrees() - textbook).abs() < 1e-12);
    }

    #[test]
    fn test_format_dms() {
        assert_eq!(format_dms(50.18333, 0), "50° 11' 0''");
        assert_eq!(format_dms(7.441944, 0), "7° 26' 31''");
        assert_eq!(format_dms(-45.5, 3), "45° 30' 0.000''");
        assert_eq!(format_dms(0.0, 2), "0° 0' 0.00''");
    }

    #[test]
    fn test_format_rounds_up_into_next_minute() {
        // 59.9999 seconds rounds to a full minute at zero decimal places
        let value = 10.0 + 59.0 / 60.0 + 59.9999 / 3600.0;
        assert_eq!(format_dms(value, 0), "11° 0' 0''");
    }

    #[test]
    fn test_round_trip_representative_values() {
        let tolerance = 1e-3 / 3600.0 + 1e-9;
        for (value, hemisphere) in [(0.0, "N"), (45.5, "N"), (-89.999, "S"), (179.999, "E")] {
            let text = format!("{} {}", hemisphere, format_dms(value, 3));
            let parsed = parse_dms(&text, Language::En).unwrap();
            assert!((parsed - value).abs() <= tolerance, "{} -> {} -> {}", value, text, parsed);
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_rounding(value in -180.0f64..180.0, places in 0u32..5) {
            let sign = if value < 0.0 { "-" } else { "+" };
            let text = format!("{} {}", sign, format_dms(value, places));
            let parsed = parse_dms(&text, Language::En).unwrap();
            let tolerance = 0.5 / 3600.0 / 10f64.powi(places as i32) + 1e-9;
            prop_assert!((parsed - value).abs() <= tolerance);
        }
    }
}
