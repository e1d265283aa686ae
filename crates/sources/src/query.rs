//! Search descriptions, the executor seam, and row conversion.

use crate::{Result, SourceError, SourceOptions};
use geoclass_geo::{CoordInput, GeoPoint};
use serde_json::Value;
use std::collections::BTreeMap;

/// One result row, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// Runs SQL on behalf of a database-backed source.
///
/// Implementations own the connection. Sources only build statements and
/// interpret the returned rows.
pub trait QueryExecutor: Send + Sync {
    fn query(&self, sql: &str) -> Result<Vec<Row>>;
}

/// What a [`Source::find`](crate::Source::find) call looks for.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchQuery {
    /// Every point
    #[default]
    All,
    /// Name pattern: an SQL `LIKE` pattern for database sources, a regular
    /// expression for RDF documents
    Pattern(String),
    /// Conditions joined with `AND`
    Conditions(Vec<Condition>),
}

impl SearchQuery {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        SearchQuery::Pattern(pattern.into())
    }

    /// The `LIKE` pattern for database sources.
    pub(crate) fn like_pattern(&self) -> Option<&str> {
        match self {
            SearchQuery::All => Some("%"),
            SearchQuery::Pattern(p) => Some(p),
            SearchQuery::Conditions(_) => None,
        }
    }
}

/// A single `WHERE` term.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = 'value'`
    Equals { field: String, value: String },
    /// Verbatim SQL
    Raw(String),
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    pub fn to_sql(&self) -> String {
        match self {
            Condition::Equals { field, value } => format!("{field} = {}", sql_literal(value)),
            Condition::Raw(sql) => sql.clone(),
        }
    }
}

/// Quote `value` as an SQL string literal.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// ` LIMIT 0, n` unless `max_hits` is 0 (unlimited).
pub(crate) fn limit_clause(max_hits: usize) -> String {
    if max_hits == 0 {
        String::new()
    } else {
        format!(" LIMIT 0, {max_hits}")
    }
}

/// Build a point from a row using the field mapping in `options`.
///
/// The whole row becomes the point's attributes.
pub fn row_to_point(row: Row, options: &SourceOptions) -> Result<GeoPoint> {
    let fields = &options.fields;

    let name = match row.get(&fields.name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
        None => return Err(SourceError::MissingField(fields.name.clone())),
    };
    let latitude = coordinate(&row, &fields.latitude)?;
    let longitude = coordinate(&row, &fields.longitude)?;

    Ok(GeoPoint::parse(name, latitude, longitude, options.degree)?.with_attributes(row))
}

fn coordinate(row: &Row, field: &str) -> Result<CoordInput> {
    match row.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(CoordInput::Number)
            .ok_or_else(|| SourceError::MissingField(field.to_string())),
        Some(Value::String(s)) => Ok(CoordInput::Text(s.clone())),
        _ => Err(SourceError::MissingField(field.to_string())),
    }
}
