//! The capability shared by every location source.

use crate::{Result, SearchQuery, SourceKind, SourceOptions};
use geoclass_geo::GeoPoint;

/// Default proximity radius, in the source's unit.
pub const DEFAULT_MAX_RADIUS: f64 = 100.0;

/// Default cap on proximity results.
pub const DEFAULT_MAX_HITS: usize = 50;

/// A searchable collection of named points.
pub trait Source: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> SourceKind;

    /// Effective options.
    fn options(&self) -> &SourceOptions;

    /// Points matching `query`.
    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>>;

    /// Points within `max_radius` (in the options unit) of `origin`, nearest
    /// first, each carrying a `distance` attribute. A `max_hits` of 0 means
    /// no limit.
    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>>;

    /// [`Source::find_near`] with the default radius and hit limit.
    fn find_near_default(&self, origin: &GeoPoint) -> Result<Vec<GeoPoint>> {
        self.find_near(origin, DEFAULT_MAX_RADIUS, DEFAULT_MAX_HITS)
    }
}
