//! In-memory source over an RDF/XML document in the W3C basic geo vocabulary.

use crate::{Result, SearchQuery, Source, SourceError, SourceKind, SourceOptions};
use geoclass_geo::rdf::{document, unescape_xml};
use geoclass_geo::{batch, no_name_label, GeoPoint, Language};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<rdfs:label>(.*?)</rdfs:label>").unwrap());
static LATITUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<geo:lat>(.*?)</geo:lat>").unwrap());
static LONGITUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<geo:long>(.*?)</geo:long>").unwrap());

pub struct RdfSource {
    points: Vec<GeoPoint>,
    options: SourceOptions,
}

impl RdfSource {
    /// Parses `content`; points that cannot be read are skipped.
    pub fn from_document(content: &str, options: SourceOptions) -> Self {
        let points = parse_points(content, options.language);
        tracing::debug!(points = points.len(), "Loaded RDF document");
        Self { points, options }
    }

    /// Reads and parses an RDF file.
    pub fn from_path(path: impl AsRef<Path>, options: SourceOptions) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_document(&content, options))
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The loaded points as an RDF document.
    pub fn to_document(&self) -> String {
        document(&self.points)
    }
}

impl Source for RdfSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Rdf
    }

    fn options(&self) -> &SourceOptions {
        &self.options
    }

    /// Patterns are regular expressions matched against point names.
    fn find(&self, query: &SearchQuery) -> Result<Vec<GeoPoint>> {
        match query {
            SearchQuery::All => Ok(self.points.clone()),
            SearchQuery::Pattern(pattern) => {
                let regex = Regex::new(pattern)?;
                Ok(self
                    .points
                    .iter()
                    .filter(|p| regex.is_match(p.name()))
                    .cloned()
                    .collect())
            }
            SearchQuery::Conditions(_) => Err(SourceError::Unsupported(
                "RDF sources only search by name pattern".to_string(),
            )),
        }
    }

    /// Keeps the first `max_hits` matches in document order, then sorts them.
    fn find_near(&self, origin: &GeoPoint, max_radius: f64, max_hits: usize) -> Result<Vec<GeoPoint>> {
        let max_hits = (max_hits > 0).then_some(max_hits);
        Ok(batch::within_radius(
            origin,
            &self.points,
            max_radius,
            self.options.unit,
            max_hits,
        ))
    }
}

/// Extracts every `geo:Point` block of `content`.
///
/// Unlabelled points get the "no name" label of `language`. Points without
/// both `geo:lat` and `geo:long`, or with unreadable coordinates, are skipped.
pub fn parse_points(content: &str, language: Language) -> Vec<GeoPoint> {
    let flat: String = content.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

    flat.split("</geo:Point>")
        .filter_map(|chunk| chunk.split("<geo:Point>").nth(1))
        .filter_map(|block| parse_point(block, language))
        .collect()
}

fn parse_point(block: &str, language: Language) -> Option<GeoPoint> {
    let capture = |regex: &Regex| regex.captures(block).map(|c| c[1].trim().to_string());

    let name = capture(&LABEL)
        .map(|label| unescape_xml(&label))
        .unwrap_or_else(|| no_name_label(language).to_string());
    let (Some(latitude), Some(longitude)) = (capture(&LATITUDE), capture(&LONGITUDE)) else {
        tracing::warn!(name = %name, "Skipping point without coordinates");
        return None;
    };

    match GeoPoint::parse(name, latitude, longitude, true) {
        Ok(point) => Some(point),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping point with unreadable coordinates");
            None
        }
    }
}
