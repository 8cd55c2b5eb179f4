// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVG subset parser using quick-xml
//!
//! Walks the root element's direct children and maps `rect`, `circle` and
//! `polygon` elements to [`ShapeElement`]s. Deeper descendants are never
//! inspected.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::shape::{ShapeElement, ShapeKind};
use nalgebra::Point2;

/// Tags that carry no geometry and are skipped without a diagnostic
const IGNORED_TAGS: [&str; 2] = ["title", "desc"];

/// Attribute values of one element, keyed by attribute name
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: FxHashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw attribute text
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Attribute read as a number; missing or unparsable text reads as 0
    #[inline]
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).map(parse_number).unwrap_or(0.0)
    }

    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Self::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| Error::malformed(format!("bad attribute: {}", e)))?;
            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::malformed(format!("bad value for '{}': {}", name, e)))?;
            attributes.insert(name, value.into_owned());
        }
        Ok(attributes)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

/// Result of parsing one document
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// Local name of the root element
    pub root_tag: String,
    /// Shapes in document order
    pub shapes: Vec<ShapeElement>,
    /// Non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDocument {
    /// Whether at least one rect, circle or polygon was found
    #[inline]
    pub fn has_supported_elements(&self) -> bool {
        !self.shapes.is_empty()
    }
}

/// Parse a number the way C `atof` does: leading whitespace is skipped and
/// the longest numeric prefix is used. Returns `None` when no prefix parses
/// or the value is not finite (`inf`, `nan`, overflow).
#[inline]
pub fn parse_number_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    match fast_float::parse_partial::<f64, _>(trimmed) {
        Ok((value, consumed)) if consumed > 0 && value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse text that must be a finite number in its entirety (surrounding
/// whitespace allowed)
#[inline]
pub fn parse_number_strict(text: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(text.trim())
        .ok()
        .filter(|value| value.is_finite())
}

/// Best-effort number parse; unparsable text reads as 0
#[inline]
pub fn parse_number(text: &str) -> f64 {
    parse_number_prefix(text).unwrap_or(0.0)
}

/// Parse a polygon `points` attribute: whitespace-separated `x,y` tokens.
///
/// Tokens that do not split into exactly two numeric parts are dropped.
pub fn parse_points(text: &str) -> Vec<Point2<f64>> {
    let mut points = Vec::new();

    for token in text.split_whitespace() {
        let parts: SmallVec<[&str; 2]> = token.split(',').filter(|p| !p.is_empty()).collect();
        if parts.len() != 2 {
            tracing::trace!(token, "Dropping malformed point pair");
            continue;
        }
        match (parse_number_prefix(parts[0]), parse_number_prefix(parts[1])) {
            (Some(x), Some(y)) => points.push(Point2::new(x, y)),
            _ => tracing::trace!(token, "Dropping non-numeric point pair"),
        }
    }

    points
}

/// Build a rectangle from `x`, `y`, `width`, `height`
pub fn parse_rect(attrs: &Attributes) -> ShapeElement {
    let element = ShapeElement::rect(
        attrs.number("x"),
        attrs.number("y"),
        attrs.number("width"),
        attrs.number("height"),
    );
    tracing::debug!(parameters = ?element.parameters.as_slice(), "Rectangle found");
    element
}

/// Build a circle from `cx`, `cy`, `r`
pub fn parse_circle(attrs: &Attributes) -> ShapeElement {
    let element = ShapeElement::circle(attrs.number("cx"), attrs.number("cy"), attrs.number("r"));
    tracing::debug!(parameters = ?element.parameters.as_slice(), "Circle found");
    element
}

/// Build a polygon from its `points` attribute
pub fn parse_polygon(attrs: &Attributes) -> ShapeElement {
    let vertices = attrs.get("points").map(parse_points).unwrap_or_default();
    tracing::debug!(vertices = vertices.len(), "Polygon found");
    ShapeElement::polygon(vertices)
}

fn parse_shape(kind: ShapeKind, attrs: &Attributes) -> ShapeElement {
    match kind {
        ShapeKind::Rect => parse_rect(attrs),
        ShapeKind::Circle => parse_circle(attrs),
        ShapeKind::Polygon => parse_polygon(attrs),
    }
}

fn local_tag(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Classify one direct child of the root
fn visit_child(element: &BytesStart<'_>, document: &mut ParsedDocument) -> Result<()> {
    let tag = local_tag(element);

    if let Some(kind) = ShapeKind::from_tag(&tag) {
        let attrs = Attributes::from_element(element)?;
        document.shapes.push(parse_shape(kind, &attrs));
    } else if IGNORED_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
        // Metadata, no geometry
    } else {
        tracing::warn!(tag = %tag, "Unsupported SVG element encountered (ignored)");
        document
            .diagnostics
            .push(Diagnostic::UnsupportedElement { tag });
    }

    Ok(())
}

/// Parse a whole document
///
/// Fails with [`Error::MalformedInput`] when the markup is not well formed or
/// has no root element. A root without supported children is not an error;
/// the returned document simply has no shapes.
pub fn parse_document(markup: &str) -> Result<ParsedDocument> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut document = ParsedDocument::default();
    let mut root_seen = false;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::malformed(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    if root_seen {
                        return Err(Error::malformed("multiple root elements"));
                    }
                    root_seen = true;
                    document.root_tag = local_tag(&element);
                } else if depth == 1 {
                    visit_child(&element, &mut document)?;
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    if root_seen {
                        return Err(Error::malformed("multiple root elements"));
                    }
                    root_seen = true;
                    document.root_tag = local_tag(&element);
                } else if depth == 1 {
                    visit_child(&element, &mut document)?;
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::malformed("closing tag without opening tag"))?;
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(Error::malformed("text outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(Error::malformed("no root element found"));
    }
    if depth != 0 {
        return Err(Error::malformed(format!(
            "{} element(s) left unclosed",
            depth
        )));
    }

    tracing::debug!(
        root = %document.root_tag,
        shapes = document.shapes.len(),
        diagnostics = document.diagnostics.len(),
        "Parsed SVG document"
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("-3.5"), -3.5);
        assert_eq!(parse_number("  7"), 7.0);
        assert_eq!(parse_number("10px"), 10.0);
        assert_eq!(parse_number("1e2"), 100.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(""), 0.0);
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number_prefix("2.5cm"), Some(2.5));
        assert_eq!(parse_number_prefix("cm"), None);
    }

    #[test]
    fn test_parse_number_strict() {
        assert_eq!(parse_number_strict(" 12.5 "), Some(12.5));
        assert_eq!(parse_number_strict("12.5mm"), None);
        assert_eq!(parse_number_strict(""), None);
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert_eq!(parse_number_prefix("inf"), None);
        assert_eq!(parse_number_prefix("-infinity"), None);
        assert_eq!(parse_number_prefix("nan"), None);
        assert_eq!(parse_number_prefix("1e400"), None);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number_strict("nan"), None);
        assert_eq!(parse_number_strict("1e400"), None);
        assert_eq!(parse_number_strict("1e300"), Some(1e300));
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("0,0 4,0 4,4 0,4");
        assert_eq!(
            points,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(4.0, 4.0),
                Point2::new(0.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_parse_points_drops_malformed_tokens() {
        let points = parse_points("0,0 5 2,2");
        assert_eq!(points, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)]);

        let points = parse_points("1,2,3 a,b 4,5");
        assert_eq!(points, vec![Point2::new(4.0, 5.0)]);
    }

    #[test]
    fn test_parse_points_tolerates_extra_whitespace() {
        let points = parse_points("  1,1\n\t2,2   3,3 ");
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_parse_rect_attributes() {
        let attrs: Attributes = [("x", "1"), ("y", "2"), ("width", "10"), ("height", "5")]
            .into_iter()
            .collect();
        let rect = parse_rect(&attrs);
        assert_eq!(rect.kind, ShapeKind::Rect);
        assert_eq!(rect.parameters.as_slice(), &[1.0, 2.0, 10.0, 5.0]);
    }

    #[test]
    fn test_parse_rect_missing_attributes_read_as_zero() {
        let attrs: Attributes = [("width", "3")].into_iter().collect();
        let rect = parse_rect(&attrs);
        assert_eq!(rect.parameters.as_slice(), &[0.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_parse_circle_attributes() {
        let attrs: Attributes = [("cx", "5"), ("cy", "-5"), ("r", "2.5")].into_iter().collect();
        let circle = parse_circle(&attrs);
        assert_eq!(circle.kind, ShapeKind::Circle);
        assert_eq!(circle.parameters.as_slice(), &[5.0, -5.0, 2.5]);
    }

    #[test]
    fn test_parse_polygon_without_points() {
        let polygon = parse_polygon(&Attributes::new());
        assert_eq!(polygon.kind, ShapeKind::Polygon);
        assert!(polygon.vertices.is_empty());
    }

    #[test]
    fn test_parse_document_all_shapes() {
        let svg = r#"<?xml version="1.0"?>
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <title>Shapes</title>
                <desc>Three supported primitives</desc>
                <rect x="0" y="0" width="10" height="5"/>
                <circle cx="0" cy="0" r="1"></circle>
                <polygon points="0,0 4,0 4,4 0,4"/>
            </svg>"#;

        let document = parse_document(svg).unwrap();
        assert_eq!(document.root_tag, "svg");
        assert!(document.diagnostics.is_empty());

        let kinds: Vec<ShapeKind> = document.shapes.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Rect, ShapeKind::Circle, ShapeKind::Polygon]);
        assert_eq!(document.shapes[2].vertices.len(), 4);
    }

    #[test]
    fn test_unsupported_element_is_diagnostic() {
        let svg = r#"<svg><line x1="0" y1="0" x2="1" y2="1"/></svg>"#;

        let document = parse_document(svg).unwrap();
        assert!(document.shapes.is_empty());
        assert!(!document.has_supported_elements());
        assert_eq!(
            document.diagnostics,
            vec![Diagnostic::UnsupportedElement {
                tag: "line".to_string()
            }]
        );
    }

    #[test]
    fn test_tags_match_case_insensitively() {
        let svg = r#"<svg><RECT x="1" y="1" width="2" height="2"/><Circle r="1"/></svg>"#;
        let document = parse_document(svg).unwrap();
        assert_eq!(document.shapes.len(), 2);
    }

    #[test]
    fn test_namespaced_tags_use_local_name() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:rect width="1" height="1"/></svg:svg>"#;
        let document = parse_document(svg).unwrap();
        assert_eq!(document.root_tag, "svg");
        assert_eq!(document.shapes.len(), 1);
    }

    #[test]
    fn test_only_direct_children_are_visited() {
        let svg = r#"<svg><g><rect width="1" height="1"/></g></svg>"#;
        let document = parse_document(svg).unwrap();
        assert!(document.shapes.is_empty());
        assert_eq!(document.diagnostics.len(), 1); // the <g>
    }

    #[test]
    fn test_root_without_children() {
        let document = parse_document("<svg/>").unwrap();
        assert_eq!(document.root_tag, "svg");
        assert!(document.shapes.is_empty());
        assert!(document.diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_documents_fail() {
        assert!(matches!(parse_document(""), Err(Error::MalformedInput(_))));
        assert!(matches!(parse_document("   "), Err(Error::MalformedInput(_))));
        assert!(matches!(parse_document("not markup"), Err(Error::MalformedInput(_))));
        assert!(matches!(parse_document("<svg><rect/>"), Err(Error::MalformedInput(_))));
        assert!(matches!(parse_document("<svg></g>"), Err(Error::MalformedInput(_))));
        assert!(matches!(parse_document("<a/><b/>"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_non_finite_attributes_never_reach_shapes() {
        let svg = r#"<svg>
            <circle cx="1" cy="2" r="inf"/>
            <polygon points="nan,0 1,0 1,1"/>
            <rect x="0" y="0" width="1e400" height="1"/>
        </svg>"#;
        let document = parse_document(svg).unwrap();

        assert_eq!(document.shapes[0].parameters.as_slice(), &[1.0, 2.0, 0.0]);
        assert_eq!(
            document.shapes[1].vertices,
            vec![Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)]
        );
        assert_eq!(document.shapes[2].parameters.as_slice(), &[0.0, 0.0, 0.0, 1.0]);
        assert!(document
            .shapes
            .iter()
            .flat_map(|s| s.parameters.iter().copied().chain(s.vertices.iter().flat_map(|v| [v.x, v.y])))
            .all(f64::is_finite));
    }

    #[test]
    fn test_malformed_point_pairs_do_not_fail_document() {
        let svg = r#"<svg><polygon points="0,0 5 2,2"/></svg>"#;
        let document = parse_document(svg).unwrap();
        assert_eq!(document.shapes.len(), 1);
        assert_eq!(document.shapes[0].vertices.len(), 2);
        assert!(document.diagnostics.is_empty());
    }
}
