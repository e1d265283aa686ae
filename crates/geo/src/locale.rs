//! Localized compass directions and labels.
//!
//! The tables are immutable statics indexed by [`Form`], [`Language`] and
//! [`Direction`]. Lookups never fail: unknown language or form names resolve
//! to English and the short form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported output languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// German
    De,
}

impl Language {
    /// Resolves a language code, falling back to English.
    pub fn from_code(code: &str) -> Language {
        match code.trim().to_lowercase().as_str() {
            "de" | "deu" | "ger" | "german" | "deutsch" => Language::De,
            _ => Language::En,
        }
    }

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Form of a compass direction string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    /// Abbreviations: N, NE, E, ...
    #[default]
    Short,
    /// Words: north, north east, ...
    Long,
}

impl Form {
    /// Resolves a form name, falling back to the short form.
    pub fn from_name(name: &str) -> Form {
        match name.trim().to_lowercase().as_str() {
            "long" => Form::Long,
            _ => Form::Short,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// The eight compass points, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

impl Direction {
    /// All directions in table order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Returns true if `angle` (degrees, counter-clockwise from east, as
    /// produced by `atan2(y, x)`) lies in this direction's 45° sector.
    ///
    /// Sectors are open at the lower and closed at the upper boundary, except
    /// west which wraps around ±180°.
    pub fn sector_contains(self, angle: f64) -> bool {
        match self {
            Direction::N => 67.5 < angle && angle <= 112.5,
            Direction::NE => 22.5 < angle && angle <= 67.5,
            Direction::E => -22.5 < angle && angle <= 22.5,
            Direction::SE => -67.5 < angle && angle <= -22.5,
            Direction::S => -112.5 < angle && angle <= -67.5,
            Direction::SW => -157.5 < angle && angle <= -112.5,
            Direction::W => 157.5 < angle || angle <= -157.5,
            Direction::NW => 112.5 < angle && angle <= 157.5,
        }
    }

    /// Maps an angle in degrees to its sector. `None` only for NaN.
    pub fn from_angle(angle: f64) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.sector_contains(angle))
    }

    /// Localized name of this direction.
    pub fn label(self, form: Form, language: Language) -> &'static str {
        COMPASS[form.index()][language.index()][self as usize]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Form::Short, Language::En))
    }
}

/// Compass strings: `[form][language][direction]`.
static COMPASS: [[[&str; 8]; 2]; 2] = [
    // Form::Short
    [
        ["N", "NE", "E", "SE", "S", "SW", "W", "NW"],
        ["N", "NO", "O", "SO", "S", "SW", "W", "NW"],
    ],
    // Form::Long
    [
        [
            "north",
            "north east",
            "east",
            "south east",
            "south",
            "south west",
            "west",
            "north west",
        ],
        [
            "Norden",
            "Nordosten",
            "Osten",
            "Südosten",
            "Süden",
            "Südwesten",
            "Westen",
            "Nordwesten",
        ],
    ],
];

static ERROR_LABEL: [&str; 2] = ["Error", "Fehler"];

static NO_NAME_LABEL: [&str; 2] = ["unknown", "Ohne Namen"];

/// The eight direction strings for a form and language, in table order.
pub fn compass_table(form: Form, language: Language) -> &'static [&'static str; 8] {
    &COMPASS[form.index()][language.index()]
}

/// Word used to prefix error messages.
pub fn error_label(language: Language) -> &'static str {
    ERROR_LABEL[language.index()]
}

/// Placeholder name for locations without a proper name.
pub fn no_name_label(language: Language) -> &'static str {
    NO_NAME_LABEL[language.index()]
}

/// Hemisphere tokens that make a DMS angle negative (south and west, short form).
pub fn negative_hemispheres(language: Language) -> [&'static str; 2] {
    let table = compass_table(Form::Short, language);
    [table[Direction::S as usize], table[Direction::W as usize]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Direction::NE.label(Form::Short, Language::En), "NE");
        assert_eq!(Direction::NE.label(Form::Short, Language::De), "NO");
        assert_eq!(Direction::SW.label(Form::Long, Language::En), "south west");
        assert_eq!(Direction::E.label(Form::Long, Language::De), "Osten");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code("DE"), Language::De);
        assert_eq!(Form::from_name("medium"), Form::Short);
        assert_eq!(Form::from_name("long"), Form::Long);
    }

    #[test]
    fn test_negative_hemispheres() {
        assert_eq!(negative_hemispheres(Language::En), ["S", "W"]);
        assert_eq!(negative_hemispheres(Language::De), ["S", "W"]);
    }

    #[test]
    fn test_misc_labels() {
        assert_eq!(error_label(Language::De), "Fehler");
        assert_eq!(no_name_label(Language::En), "unknown");
    }

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(Direction::from_angle(22.5), Some(Direction::E));
        assert_eq!(Direction::from_angle(67.5), Some(Direction::NE));
        assert_eq!(Direction::from_angle(112.5), Some(Direction::N));
        assert_eq!(Direction::from_angle(157.5), Some(Direction::NW));
        assert_eq!(Direction::from_angle(-22.5), Some(Direction::SE));
        assert_eq!(Direction::from_angle(-67.5), Some(Direction::S));
        assert_eq!(Direction::from_angle(-112.5), Some(Direction::SW));
        assert_eq!(Direction::from_angle(-157.5), Some(Direction::W));
        assert_eq!(Direction::from_angle(180.0), Some(Direction::W));
        assert_eq!(Direction::from_angle(-180.0), Some(Direction::W));
        assert_eq!(Direction::from_angle(f64::NAN), None);
    }

    #[test]
    fn test_sectors_partition_circle() {
        // -180.0 ..= 180.0 in 0.1° steps
        for step in 0..=3600 {
            let angle = -180.0 + step as f64 * 0.1;
            let hits = Direction::ALL
                .iter()
                .filter(|d| d.sector_contains(angle))
                .count();
            assert_eq!(hits, 1, "angle {} matched {} sectors", angle, hits);
        }
    }
}
