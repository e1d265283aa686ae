//! Per-source options with backend defaults and TOML overrides.

use crate::{Result, SourceError, SourceKind};
use geoclass_geo::{Language, Unit};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names holding a point's name and coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl FieldMap {
    pub fn new(
        name: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new("name", "latitude", "longitude")
    }
}

/// Effective options of a source.
///
/// Obtain the defaults for a backend with [`SourceOptions::for_kind`] and
/// apply caller settings with [`SourceOptions::merged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOptions {
    pub language: Language,
    pub unit: Unit,
    pub table: String,
    pub joins: Vec<String>,
    pub fields: FieldMap,
    pub key: Option<String>,
    pub order: String,
    /// Coordinates in rows are degrees rather than radians
    pub degree: bool,
    /// Nima: restrict proximity searches to native names
    pub native: bool,
    /// OpenGeoDB: prefix of the `textdata`/`hierarchies`/`coordinates` tables
    pub table_prefix: Option<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            language: Language::En,
            unit: Unit::Kilometer,
            table: String::new(),
            joins: Vec::new(),
            fields: FieldMap::default(),
            key: None,
            order: String::new(),
            degree: true,
            native: false,
            table_prefix: None,
        }
    }
}

impl SourceOptions {
    /// Defaults for the given backend.
    pub fn for_kind(kind: SourceKind) -> Self {
        let base = Self::default();
        match kind {
            SourceKind::Db => Self {
                table: "geo".into(),
                order: "ort".into(),
                ..base
            },
            SourceKind::Relational => Self {
                table: "coordinates co, further_information fi".into(),
                joins: vec!["co.id = fi.id".into()],
                fields: FieldMap::new("name", "lat", "lon"),
                key: Some("id".into()),
                order: "name".into(),
                ..base
            },
            SourceKind::OpenGeoDb => Self {
                table: "geodb_textdata td, geodb_coordinates co".into(),
                joins: vec!["td.loc_id = co.loc_id".into()],
                fields: FieldMap::new("text_val", "lat", "lon"),
                key: Some("loc_id".into()),
                order: "td.text_val".into(),
                table_prefix: Some("geodb_".into()),
                ..base
            },
            SourceKind::Nima => Self {
                table: "nima".into(),
                fields: FieldMap::new("FULL_NAME", "DD_LAT", "DD_LONG"),
                order: "SORT_NAME".into(),
                native: true,
                ..base
            },
            SourceKind::Rdf => base,
        }
    }

    /// These options with every field set in `overrides` replaced.
    ///
    /// The merge is shallow: an overridden `fields` or `joins` value replaces
    /// the default wholesale.
    pub fn merged(mut self, overrides: OptionsOverrides) -> Self {
        let OptionsOverrides {
            language,
            unit,
            table,
            joins,
            fields,
            key,
            order,
            degree,
            native,
            table_prefix,
        } = overrides;

        if let Some(v) = language {
            self.language = v;
        }
        if let Some(v) = unit {
            self.unit = v;
        }
        if let Some(v) = table {
            self.table = v;
        }
        if let Some(v) = joins {
            self.joins = v;
        }
        if let Some(v) = fields {
            self.fields = v;
        }
        if let Some(v) = key {
            self.key = Some(v);
        }
        if let Some(v) = order {
            self.order = v;
        }
        if let Some(v) = degree {
            self.degree = v;
        }
        if let Some(v) = native {
            self.native = v;
        }
        if let Some(v) = table_prefix {
            self.table_prefix = Some(v);
        }
        self
    }

    /// Rejects options a `kind` source cannot build queries from.
    ///
    /// SQL kinds need a table and all three field names. RDF sources read
    /// none of them.
    pub fn validate(&self, kind: SourceKind) -> Result<()> {
        if kind == SourceKind::Rdf {
            return Ok(());
        }
        if self.table.trim().is_empty() {
            return Err(SourceError::Config(format!("{kind} source needs a table")));
        }
        let fields = [
            ("name", &self.fields.name),
            ("latitude", &self.fields.latitude),
            ("longitude", &self.fields.longitude),
        ];
        if let Some((role, _)) = fields.iter().find(|(_, column)| column.trim().is_empty()) {
            return Err(SourceError::Config(format!("{kind} source has no {role} field")));
        }
        Ok(())
    }
}

/// A partial set of options; absent fields keep the backend default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverrides {
    pub language: Option<Language>,
    pub unit: Option<Unit>,
    pub table: Option<String>,
    pub joins: Option<Vec<String>>,
    pub fields: Option<FieldMap>,
    pub key: Option<String>,
    pub order: Option<String>,
    pub degree: Option<bool>,
    pub native: Option<bool>,
    pub table_prefix: Option<String>,
}

impl OptionsOverrides {
    /// Parse overrides from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load overrides from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded source options");
        Self::from_toml_str(&content)
    }
}
