//! NIMA/NGA GeoNames country files loaded into a database table.
//!
//! Rows are classified by feature class (`FC`: A = administrative,
//! P = populated place, ...) and populated places additionally by size
//! (`PC`: 1 = big ... 5 = small, 0 = unclassified). `NT = 'N'` marks the
//! native name of a feature.

use crate::query::limit_clause;
use crate::{
    distance_formula, sql_literal, DbSource, QueryExecutor, Result, SearchQuery, Source, SourceKind,
    SourceOptions,
};
use geoclass_geo::{no_name_label, GeoPoint};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// All feature classes.
pub const ALL_FEATURE_CLASSES: &[&str] = &["A", "P", "V", "L", "U", "R", "T", "H", "S"];

/// All place classes.
pub const ALL_PLACE_CLASSES: &[u8] = &[0, 1, 2, 3, 4, 5, 6];

/// Place classes considered by [`NimaSource::find_classified_populated_place`] by default.
pub const POPULATED_PLACE_CLASSES: &[u8] = &[1, 2, 3, 4, 5, 0];

pub struct NimaSource {
    db: DbSource,
    country: String,
    states: BTreeMap<String, String>,
}

impl NimaSource {
    /// Connects the source and loads the country and state names.
    pub fn new(executor: Arc<dyn QueryExecutor>, options: SourceOptions) -> Result<Self> {
        let mut source = Self {
            db: DbSource::new(executor, options),
            country: String::new(),
            states: BTreeMap::new(),
        };
        source.load_names()?;
        Ok(source)
    }

    /// Native name of the country the table covers.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Native names of the first-order administrative divisions, keyed by ADM1 code.
    pub fn states(&self) -> &BTreeMap<String, String> {
        &self.states
    }

    /// Populated places (`FC = 'P'`) named like `name` in the given size classes.
    pub fn find_classified_populated_place(&self, name: &str, place_classes: &[u8]) -> Result<Vec<GeoPoint>> {
        self.find_classified(name, &["P"], place_classes)
    }

    /// Features named like `name` (SQL `LIKE`) within the given classification sets.
    pub fn find_classified(
        &self,
        name: &str,
        feature_classes: &[&str],
        place_classes: &[u8],
    ) -> Result<Vec<GeoPoint>> {
        let options = self.options();
        let sql = format!(
            "SELECT * FROM {} WHERE {} AND {} LIKE {} ORDER BY {}",
            options.table,
            classification_filter(feature_classes, place_classes),
            options.fields.name,
            sql_literal(name),
            options.order
        );
        self.db.perform_query(&sql)
    }

    /// Proximity search within the given classification sets.
    ///
    /// With the `native` option set only native names are returned.
    pub fn find_near_classified(
        &self,
        origin: &GeoPoint,
        max_radius: f64,
        max_hits: usize,
        feature_classes: &[&str],
        place_classes: &[u8],
    ) -> Result<Vec<GeoPoint>> {
        let options = self.options();
        let formula = distance_formula(origin, &options.fields, options.unit);
        let native = if options.native { " AND NT = 'N'" } else { "" };
        let sql = format!(
            "SELECT *, {formula} AS distance FROM {} WHERE {} AND {formula} < {max_radius}{native} \
             ORDER BY distance{}",
            options.table,
            classification_filter(feature_classes, place_classes),
            limit_clause(max_hits)
        );
        self.db.perform_query(&sql)
    }

    fn load_names(&mut self) -> Result<()> {
        let table = &self.db.options().table;
        let fallback = no_name_label(self.db.options().language);

        let countries = self
            .db
            .perform_query(&format!("SELECT * FROM {table} WHERE DSG = 'PCLI' AND NT = 'N'"))?;
        self.country = match countries.as_slice() {
            [country] => display_name(country).unwrap_or(fallback).to_string(),
            _ => fallback.to_string(),
        };

        let states = self.db.perform_query(&format!(
            "SELECT * FROM {table} WHERE DSG = 'ADM1' AND NT = 'N' ORDER BY ADM1"
        ))?;
        self.states = states
            .iter()
            .map(|state| {
                let key = state.attribute("ADM1").map(text_of).unwrap_or_default();
                let name = display_name(state).unwrap_or(fallback).to_string();
                (key, name)
            })
            .collect();

        tracing::debug!(country = %self.country, states = self.states.len(), "Loaded Nima names");
        Ok(())
    }
}

impl Source for NimaSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Nima
    }

    fn options(&self) -> &SourceOptions {
        self.db.options()
    }

    /// Name searches consider every classification; condition lists run
    /// against the table unfiltered.
    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>> {
        match query.like_pattern() {
            Some(pattern) => self.find_classified(pattern, ALL_FEATURE_CLASSES, ALL_PLACE_CLASSES),
            None => self.db.find(query),
        }
    }

    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>> {
        self.find_near_classified(origin, max_radius, max_hits, ALL_FEATURE_CLASSES, ALL_PLACE_CLASSES)
    }
}

fn classification_filter(feature_classes: &[&str], place_classes: &[u8]) -> String {
    let features: Vec<String> = feature_classes.iter().map(|fc| sql_literal(fc)).collect();
    let places: Vec<String> = place_classes.iter().map(u8::to_string).collect();
    format!("FC IN ({}) AND PC IN ({})", features.join(","), places.join(","))
}

/// The short form if present, else the full name.
fn display_name(point: &GeoPoint) -> Option<&str> {
    match point.attribute("SHORT_FORM") {
        Some(Value::String(short)) if !short.is_empty() => Some(short),
        _ if !point.name().is_empty() => Some(point.name()),
        _ => None,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_filter() {
        assert_eq!(
            classification_filter(ALL_FEATURE_CLASSES, ALL_PLACE_CLASSES),
            "FC IN ('A','P','V','L','U','R','T','H','S') AND PC IN (0,1,2,3,4,5,6)"
        );
        assert_eq!(
            classification_filter(&["P"], POPULATED_PLACE_CLASSES),
            "FC IN ('P') AND PC IN (1,2,3,4,5,0)"
        );
    }

    #[test]
    fn test_display_name() {
        let plain = GeoPoint::from_degrees("Deutschland", 51.0, 9.0);
        assert_eq!(display_name(&plain), Some("Deutschland"));

        let short = plain.clone().with_attribute("SHORT_FORM", "DE");
        assert_eq!(display_name(&short), Some("DE"));

        let empty_short = plain.clone().with_attribute("SHORT_FORM", "");
        assert_eq!(display_name(&empty_short), Some("Deutschland"));

        let unnamed = GeoPoint::from_degrees("", 51.0, 9.0);
        assert_eq!(display_name(&unnamed), None);
    }
}
