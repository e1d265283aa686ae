//! Single-table SQL source.

use crate::query::limit_clause;
use crate::{
    distance_formula, row_to_point, sql_literal, QueryExecutor, Result, SearchQuery, Source,
    SourceKind, SourceOptions,
};
use geoclass_geo::GeoPoint;
use std::sync::Arc;

/// Points stored one per row in a single table.
pub struct DbSource {
    executor: Arc<dyn QueryExecutor>,
    options: SourceOptions,
}

impl DbSource {
    pub fn new(executor: Arc<dyn QueryExecutor>, options: SourceOptions) -> Self {
        Self { executor, options }
    }

    /// Run `sql` and convert every row into a point.
    ///
    /// Fails on the first row lacking a mapped field.
    pub fn perform_query(&self, sql: &str) -> Result<Vec<GeoPoint>> {
        tracing::debug!(sql, "Executing query");
        let rows = self.executor.query(sql)?;
        let points = rows
            .into_iter()
            .map(|row| row_to_point(row, &self.options))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(results = points.len(), "Query completed");
        Ok(points)
    }

    /// The `SELECT` statement for `query`, with `joins` prefixed to the
    /// `WHERE` clause.
    pub(crate) fn find_sql(&self, query: &SearchQuery, joins: &[String]) -> String {
        let mut terms: Vec<String> = joins.to_vec();
        match query.like_pattern() {
            Some(pattern) => terms.push(format!(
                "{} LIKE {}",
                self.options.fields.name,
                sql_literal(pattern)
            )),
            None => {
                if let SearchQuery::Conditions(conditions) = query {
                    terms.extend(conditions.iter().map(|c| c.to_sql()));
                }
            }
        }
        let mut sql = format!("SELECT * FROM {}", self.options.table);
        if !terms.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&terms.join(" AND "));
        }
        if !self.options.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.options.order);
        }
        sql
    }

    pub(crate) fn near_sql(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize, joins: &[String]) -> String {
        let formula = distance_formula(origin, &self.options.fields, self.options.unit);
        let mut terms: Vec<String> = joins.to_vec();
        terms.push(format!("{formula} < {max_radius}"));
        format!(
            "SELECT *, {formula} AS distance FROM {} WHERE {} ORDER BY distance ASC{}",
            self.options.table,
            terms.join(" AND "),
            limit_clause(max_hits)
        )
    }
}

impl Source for DbSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Db
    }

    fn options(&self) -> &SourceOptions {
        &self.options
    }

    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>> {
        self.perform_query(&self.find_sql(query, &[]))
    }

    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>> {
        self.perform_query(&self.near_sql(origin, max_radius, max_hits, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Row};

    struct NoRows;

    impl QueryExecutor for NoRows {
        fn query(&self, _sql: &str) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }
    }

    fn source() -> DbSource {
        DbSource::new(Arc::new(NoRows), SourceOptions::for_kind(SourceKind::Db))
    }

    #[test]
    fn test_find_by_pattern() {
        assert_eq!(
            source().find_sql(&SearchQuery::pattern("K%ln"), &[]),
            "SELECT * FROM geo WHERE name LIKE 'K%ln' ORDER BY ort"
        );
    }

    #[test]
    fn test_find_all() {
        assert_eq!(
            source().find_sql(&SearchQuery::All, &[]),
            "SELECT * FROM geo WHERE name LIKE '%' ORDER BY ort"
        );
    }

    #[test]
    fn test_find_by_conditions() {
        let query = SearchQuery::Conditions(vec![
            Condition::equals("plz", "50667"),
            Condition::raw("einwohner > 1000"),
        ]);
        assert_eq!(
            source().find_sql(&query, &[]),
            "SELECT * FROM geo WHERE plz = '50667' AND einwohner > 1000 ORDER BY ort"
        );
    }

    #[test]
    fn test_empty_conditions_omit_where() {
        assert_eq!(
            source().find_sql(&SearchQuery::Conditions(Vec::new()), &[]),
            "SELECT * FROM geo ORDER BY ort"
        );
    }

    #[test]
    fn test_near_sql() {
        let origin = GeoPoint::from_degrees("o", 50.0, 8.0);
        let sql = source().near_sql(&origin, 25.0, 10, &[]);
        assert!(sql.starts_with("SELECT *, COALESCE("));
        assert!(sql.contains(" AS distance FROM geo WHERE COALESCE("));
        assert!(sql.contains(" < 25 ORDER BY distance ASC LIMIT 0, 10"));
    }

    #[test]
    fn test_near_without_limit() {
        let origin = GeoPoint::from_degrees("o", 50.0, 8.0);
        assert!(source().near_sql(&origin, 100.0, 0, &[]).ends_with("ORDER BY distance ASC"));
    }
}
