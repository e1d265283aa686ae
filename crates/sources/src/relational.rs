//! SQL source spread over joined tables.

use crate::{DbSource, QueryExecutor, Result, SearchQuery, Source, SourceKind, SourceOptions};
use geoclass_geo::GeoPoint;
use std::sync::Arc;

/// Coordinates and descriptive data kept in separate tables.
///
/// The join conditions from [`SourceOptions::joins`] open every `WHERE`
/// clause. Mapped field names must be unique across the joined tables.
pub struct RelationalSource {
    db: DbSource,
}

impl RelationalSource {
    pub fn new(executor: Arc<dyn QueryExecutor>, options: SourceOptions) -> Self {
        Self {
            db: DbSource::new(executor, options),
        }
    }

    /// Run `sql` and convert every row into a point.
    pub fn perform_query(&self, sql: &str) -> Result<Vec<GeoPoint>> {
        self.db.perform_query(sql)
    }

    pub(crate) fn find_sql(&self, query: &SearchQuery) -> String {
        self.db.find_sql(query, &self.db.options().joins)
    }

    pub(crate) fn near_sql(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> String {
        self.db.near_sql(origin, max_radius, max_hits, &self.db.options().joins)
    }
}

impl Source for RelationalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Relational
    }

    fn options(&self) -> &SourceOptions {
        self.db.options()
    }

    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>> {
        self.perform_query(&self.find_sql(query))
    }

    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>> {
        self.perform_query(&self.near_sql(origin, max_radius, max_hits))
    }
}
