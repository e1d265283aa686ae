//! Source construction by kind.

use crate::{
    DbSource, NimaSource, OpenGeoDbSource, OptionsOverrides, QueryExecutor, RdfSource,
    RelationalSource, Result, Source, SourceError, SourceOptions,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The available source backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Db,
    Relational,
    OpenGeoDb,
    Nima,
    Rdf,
}

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Db,
        SourceKind::Relational,
        SourceKind::OpenGeoDb,
        SourceKind::Nima,
        SourceKind::Rdf,
    ];

    /// Identifier accepted by [`FromStr`].
    pub fn identifier(self) -> &'static str {
        match self {
            SourceKind::Db => "DB",
            SourceKind::Relational => "DB_Relational",
            SourceKind::OpenGeoDb => "DB_OpenGeoDB",
            SourceKind::Nima => "DB_Nima",
            SourceKind::Rdf => "RDF",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.identifier().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SourceError::UnknownSource(s.to_string()))
    }
}

/// What a source reads from.
#[derive(Clone)]
pub enum Backend {
    /// A database connection, for the SQL kinds
    Executor(Arc<dyn QueryExecutor>),
    /// RDF/XML document text
    Document(String),
}

impl Backend {
    fn describe(&self) -> &'static str {
        match self {
            Backend::Executor(_) => "query executor",
            Backend::Document(_) => "document",
        }
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Executor(_) => f.write_str("Executor(..)"),
            Backend::Document(doc) => f.debug_tuple("Document").field(&doc.len()).finish(),
        }
    }
}

/// Create a source of `kind` over `backend`, with `overrides` applied to
/// the kind's default options.
///
/// # Example
/// ```
/// use geoclass_sources::{setup_source, Backend, OptionsOverrides, SearchQuery, Source};
///
/// let doc = "<geo:Point><rdfs:label>Bonn</rdfs:label>\
///            <geo:lat>50.7333</geo:lat><geo:long>7.1</geo:long></geo:Point>";
/// let kind = "rdf".parse().unwrap();
/// let source = setup_source(kind, Backend::Document(doc.into()), OptionsOverrides::default()).unwrap();
/// assert_eq!(source.find(&SearchQuery::All).unwrap().len(), 1);
/// ```
pub fn setup_source(kind: SourceKind, backend: Backend, overrides: OptionsOverrides) -> Result<Box<dyn Source>> {
    let options = SourceOptions::for_kind(kind).merged(overrides);
    options.validate(kind)?;
    tracing::debug!(kind = %kind, backend = backend.describe(), "Setting up source");

    match (kind, backend) {
        (SourceKind::Db, Backend::Executor(executor)) => Ok(Box::new(DbSource::new(executor, options))),
        (SourceKind::Relational, Backend::Executor(executor)) => {
            Ok(Box::new(RelationalSource::new(executor, options)))
        }
        (SourceKind::OpenGeoDb, Backend::Executor(executor)) => {
            Ok(Box::new(OpenGeoDbSource::new(executor, options)))
        }
        (SourceKind::Nima, Backend::Executor(executor)) => Ok(Box::new(NimaSource::new(executor, options)?)),
        (SourceKind::Rdf, Backend::Document(content)) => Ok(Box::new(RdfSource::from_document(&content, options))),
        (kind, backend) => Err(SourceError::BackendMismatch {
            kind: kind.to_string(),
            backend: backend.describe(),
        }),
    }
}
