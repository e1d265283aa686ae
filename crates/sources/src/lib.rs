//! Location sources for GeoClass
//!
//! This crate provides:
//! - SQL sources over a caller-supplied [`QueryExecutor`]: a single table
//!   ([`DbSource`]), joined tables ([`RelationalSource`]), OpenGeoDB
//!   ([`OpenGeoDbSource`]) and NIMA country files ([`NimaSource`])
//! - An in-memory source over RDF/XML documents ([`RdfSource`])
//! - The SQL rendering of the great-circle distance
//! - Per-backend default options with TOML overrides
//!
//! All sources implement [`Source`]; [`setup_source`] builds one by kind.

mod db;
mod error;
mod formula;
mod nima;
mod opengeodb;
mod options;
mod query;
mod rdf;
mod registry;
mod relational;
mod source;

pub use db::DbSource;
pub use error::{Result, SourceError, SourceErrorCode};
pub use formula::distance_formula;
pub use nima::{NimaSource, ALL_FEATURE_CLASSES, ALL_PLACE_CLASSES, POPULATED_PLACE_CLASSES};
pub use opengeodb::{types as opengeodb_types, OpenGeoDbSource};
pub use options::{FieldMap, OptionsOverrides, SourceOptions};
pub use query::{row_to_point, sql_literal, Condition, QueryExecutor, Row, SearchQuery};
pub use rdf::{parse_points, RdfSource};
pub use registry::{setup_source, Backend, SourceKind};
pub use relational::RelationalSource;
pub use source::{Source, DEFAULT_MAX_HITS, DEFAULT_MAX_RADIUS};
