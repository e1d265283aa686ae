//! RDF export using the W3C basic geo vocabulary.
//!
//! See <http://www.w3.org/2003/01/geo/> for the vocabulary. Labels are
//! XML-escaped; coordinates are written in decimal degrees.

use crate::GeoPoint;

const RDF_HEADER: &str = "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n\
\txmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\"\n\
\txmlns:geo=\"http://www.w3.org/2003/01/geo/wgs84_pos#\">\n\n";

const RDF_FOOTER: &str = "</rdf:RDF>";

/// A single `geo:Point` element, indented by `indent` tabs.
pub fn point_entry(point: &GeoPoint, indent: usize) -> String {
    let pad = "\t".repeat(indent);
    format!(
        "{pad}<geo:Point>\n\
         {pad}\t<rdfs:label>{label}</rdfs:label>\n\
         {pad}\t<geo:lat>{lat}</geo:lat>\n\
         {pad}\t<geo:long>{lon}</geo:long>\n\
         {pad}</geo:Point>\n",
        label = escape_xml(point.name()),
        lat = point.latitude(),
        lon = point.longitude(),
    )
}

/// A complete `rdf:RDF` document listing `points`.
pub fn document(points: &[GeoPoint]) -> String {
    let mut out = String::from(RDF_HEADER);
    for point in points {
        out.push_str(&point_entry(point, 1));
        out.push('\n');
    }
    out.push_str(RDF_FOOTER);
    out
}

/// Escapes the characters that may not appear verbatim in XML text.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_xml`].
pub fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_entry() {
        let p = GeoPoint::from_degrees("Los Angeles", 34.05, -118.25);
        let expected = "\t<geo:Point>\n\
                        \t\t<rdfs:label>Los Angeles</rdfs:label>\n\
                        \t\t<geo:lat>34.05</geo:lat>\n\
                        \t\t<geo:long>-118.25</geo:long>\n\
                        \t</geo:Point>\n";
        assert_eq!(point_entry(&p, 1), expected);
    }

    #[test]
    fn test_document_envelope() {
        let points = [
            GeoPoint::from_degrees("A", 1.5, 2.5),
            GeoPoint::from_degrees("B", -3.0, 4.0),
        ];
        let doc = document(&points);
        assert!(doc.starts_with("<rdf:RDF xmlns:rdf="));
        assert!(doc.contains("xmlns:geo=\"http://www.w3.org/2003/01/geo/wgs84_pos#\""));
        assert!(doc.ends_with("</geo:Point>\n\n</rdf:RDF>"));
        assert_eq!(doc.matches("<geo:Point>").count(), 2);
    }

    #[test]
    fn test_single_point_document() {
        let p = GeoPoint::from_degrees("A", 1.5, 2.5);
        assert_eq!(p.rdf_document(), document(&[p.clone()]));
    }

    #[test]
    fn test_labels_are_escaped() {
        let p = GeoPoint::from_degrees("Smith & <Sons>", 0.0, 0.0);
        let entry = p.rdf_point_entry(0);
        assert!(entry.contains("<rdfs:label>Smith &amp; &lt;Sons&gt;</rdfs:label>"));
        assert_eq!(unescape_xml("Smith &amp; &lt;Sons&gt;"), "Smith & <Sons>");
    }
}
