//! Access to OpenGeoDB databases (<http://opengeodb.de>).
//!
//! OpenGeoDB stores every text of a location (names, area codes, licence
//! plate codes, ...) as a typed row in `textdata`, with coordinates and the
//! administrative hierarchy in separate tables. All of them carry validity
//! dates, so proximity searches are pinned to a day to avoid duplicate rows.

use crate::query::limit_clause;
use crate::{
    distance_formula, Condition, QueryExecutor, RelationalSource, Result, SearchQuery, Source,
    SourceError, SourceKind, SourceOptions,
};
use chrono::{Datelike, Local, NaiveDate};
use geoclass_geo::{barycenter, GeoPoint};
use serde_json::Value;
use std::sync::Arc;

/// Numeric type identifiers used throughout the OpenGeoDB schema.
pub mod types {
    pub const UNKNOWN: u32 = 0;

    // locations
    pub const CONTINENT: u32 = 100_100_000;
    pub const STATE: u32 = 100_200_000;
    pub const COUNTRY: u32 = 100_300_000;
    pub const REGBEZIRK: u32 = 100_400_000;
    pub const LANDKREIS: u32 = 100_500_000;
    pub const POL_DIVISION: u32 = 100_600_000;
    pub const POPULATED_AREA: u32 = 100_700_000;

    // coordinates
    pub const WGS84: u32 = 200_100_000;

    // dates
    pub const EXACT_DATE: u32 = 300_100_000;
    pub const EXACT_TO_YEAR: u32 = 300_300_000;
    pub const UNKNOWN_FUTURE_DATE: u32 = 300_500_000;

    // textdata
    pub const NAME: u32 = 500_100_000;
    pub const NAME_ISO_3166: u32 = 500_100_001;
    /// 7 bit, lower case
    pub const NAME_7BITLC: u32 = 500_100_002;
    pub const AREA_CODE: u32 = 500_300_000;
    pub const KFZ: u32 = 500_500_000;
    pub const AGS: u32 = 500_600_000;
    pub const NAME_VG: u32 = 500_700_000;
    /// 7 bit, lower case
    pub const NAME_VG_7BITLC: u32 = 500_700_001;

    // intdata
    pub const POPULATION: u32 = 600_700_000;
    pub const EST_POPULATION: u32 = 650_700_001;
    pub const EXACT_POPULATION: u32 = 650_700_002;
}

/// Lowest hierarchy level returned by proximity searches (municipalities and below).
const MIN_NEAR_LEVEL: u32 = 6;

pub struct OpenGeoDbSource {
    relational: RelationalSource,
}

impl OpenGeoDbSource {
    pub fn new(executor: Arc<dyn QueryExecutor>, options: SourceOptions) -> Self {
        Self {
            relational: RelationalSource::new(executor, options),
        }
    }

    /// The location for a telephone area code.
    ///
    /// Several locations sharing the code are merged into their barycenter,
    /// named `"<code> (<count>)"`.
    pub fn find_area_code(&self, area_code: &str) -> Result<Option<GeoPoint>> {
        let query = SearchQuery::Conditions(vec![
            Condition::raw(format!("td.text_val LIKE {}", crate::sql_literal(area_code))),
            Condition::raw(format!("td.text_type = {}", types::AREA_CODE)),
        ]);
        let mut found = self.find(&query)?;

        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            count => Ok(Some(barycenter(&found, format!("{area_code} ({count})"))?)),
        }
    }

    /// Area code rows of the location `point` was loaded from.
    ///
    /// `point` must carry the `loc_id` attribute set by this source.
    pub fn area_codes_of(&self, point: &GeoPoint) -> Result<Vec<GeoPoint>> {
        let loc_id = loc_id_of(point)?;
        self.find(&SearchQuery::Conditions(vec![
            Condition::raw(format!("td.text_type = {}", types::AREA_CODE)),
            Condition::raw(format!("td.loc_id = {loc_id}")),
        ]))
    }

    /// All text rows of one location.
    pub fn by_loc_id(&self, loc_id: i64) -> Result<Vec<GeoPoint>> {
        self.find(&SearchQuery::Conditions(vec![Condition::raw(format!(
            "td.loc_id = {loc_id}"
        ))]))
    }

    /// [`Source::find_near`] restricted to rows valid on `date`.
    pub fn find_near_on(
        &self,
        origin: &GeoPoint,
        max_radius: f64,
        max_hits: usize,
        date: NaiveDate,
    ) -> Result<Vec<GeoPoint>> {
        self.relational.perform_query(&self.near_sql(origin, max_radius, max_hits, date))
    }

    fn find_sql(&self, query: &SearchQuery) -> String {
        match query.like_pattern() {
            Some(pattern) => {
                let name_field = &self.options().fields.name;
                let restricted = SearchQuery::Conditions(vec![
                    Condition::raw(format!("{name_field} LIKE {}", crate::sql_literal(pattern))),
                    Condition::raw(
                        "(td.is_default_name = 1 or (td.is_default_name is null and td.is_native_lang = 1))",
                    ),
                    Condition::raw(format!(
                        "td.text_type IN ({}, {})",
                        types::NAME,
                        types::AREA_CODE
                    )),
                ]);
                self.relational.find_sql(&restricted)
            }
            None => self.relational.find_sql(query),
        }
    }

    fn near_sql(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize, date: NaiveDate) -> String {
        let options = self.options();
        let prefix = options.table_prefix.as_deref().unwrap_or_default();
        let formula = distance_formula(origin, &options.fields, options.unit);
        let day = format!("'{}-{}-{}'", date.year(), date.month(), date.day());

        format!(
            "SELECT td.loc_id, td.text_val, {formula} AS distance, hi.level AS 'typ', lon, lat \
             FROM {prefix}textdata td, {prefix}hierarchies hi, {prefix}coordinates co \
             WHERE td.text_type={name} AND td.is_default_name = 1 \
             AND hi.loc_id = td.loc_id AND hi.level >= {MIN_NEAR_LEVEL} \
             AND co.loc_id = td.loc_id AND {formula} < {max_radius} \
             AND td.valid_until >= {day} AND hi.valid_until >= {day} AND co.valid_until >= {day} \
             ORDER BY distance ASC{limit}",
            name = types::NAME,
            limit = limit_clause(max_hits),
        )
    }
}

impl Source for OpenGeoDbSource {
    fn kind(&self) -> SourceKind {
        SourceKind::OpenGeoDb
    }

    fn options(&self) -> &SourceOptions {
        self.relational.options()
    }

    /// Name searches only consider default or native-language names and
    /// area codes; condition lists are passed through unchanged.
    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>> {
        self.relational.perform_query(&self.find_sql(query))
    }

    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>> {
        self.find_near_on(origin, max_radius, max_hits, Local::now().date_naive())
    }
}

fn loc_id_of(point: &GeoPoint) -> Result<i64> {
    match point.attribute("loc_id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| SourceError::MissingField("loc_id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Row;
    use serde_json::json;

    struct NoRows;

    impl QueryExecutor for NoRows {
        fn query(&self, _sql: &str) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }
    }

    fn source() -> OpenGeoDbSource {
        OpenGeoDbSource::new(Arc::new(NoRows), SourceOptions::for_kind(SourceKind::OpenGeoDb))
    }

    #[test]
    fn test_name_search_is_restricted() {
        assert_eq!(
            source().find_sql(&SearchQuery::pattern("Köln")),
            "SELECT * FROM geodb_textdata td, geodb_coordinates co \
             WHERE td.loc_id = co.loc_id AND text_val LIKE 'Köln' \
             AND (td.is_default_name = 1 or (td.is_default_name is null and td.is_native_lang = 1)) \
             AND td.text_type IN (500100000, 500300000) ORDER BY td.text_val"
        );
    }

    #[test]
    fn test_near_sql_pins_date() {
        let origin = GeoPoint::from_degrees("o", 50.9, 6.9);
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let sql = source().near_sql(&origin, 20.0, 5, date);

        assert!(sql.starts_with("SELECT td.loc_id, td.text_val, COALESCE("));
        assert!(sql.contains("FROM geodb_textdata td, geodb_hierarchies hi, geodb_coordinates co"));
        assert!(sql.contains("td.text_type=500100000 AND td.is_default_name = 1"));
        assert!(sql.contains("hi.level >= 6"));
        assert!(sql.contains("td.valid_until >= '2024-3-7' AND hi.valid_until >= '2024-3-7'"));
        assert!(sql.ends_with("ORDER BY distance ASC LIMIT 0, 5"));
    }

    #[test]
    fn test_custom_table_prefix() {
        let options = SourceOptions {
            table_prefix: Some("ogdb_".into()),
            ..SourceOptions::for_kind(SourceKind::OpenGeoDb)
        };
        let source = OpenGeoDbSource::new(Arc::new(NoRows), options);
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let sql = source.near_sql(&GeoPoint::from_degrees("o", 50.0, 7.0), 10.0, 0, date);
        assert!(sql.contains("FROM ogdb_textdata td, ogdb_hierarchies hi, ogdb_coordinates co"));
    }

    #[test]
    fn test_loc_id_of() {
        let point = GeoPoint::from_degrees("x", 0.0, 0.0).with_attribute("loc_id", json!(42));
        assert_eq!(loc_id_of(&point).unwrap(), 42);

        let point = GeoPoint::from_degrees("x", 0.0, 0.0).with_attribute("loc_id", "17");
        assert_eq!(loc_id_of(&point).unwrap(), 17);

        let point = GeoPoint::from_degrees("x", 0.0, 0.0);
        assert!(matches!(loc_id_of(&point), Err(SourceError::MissingField(_))));
    }
}
