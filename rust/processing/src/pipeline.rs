// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parse -> triangulate -> extrude, one shape at a time.

use crate::sink::MeshSink;
use crate::types::{GenerationReport, SkippedShape};
use svg_extrude_core::{parse_document, Diagnostic, ShapeElement, ShapeKind};
use svg_extrude_geometry::{extrude, triangulate, ExtrusionDepth, Mesh};

/// Result of processing a whole document.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Local name of the document root.
    pub root_tag: String,
    pub report: GenerationReport,
    pub diagnostics: Vec<Diagnostic>,
}

/// Name of the mesh section for the shape at `index`.
#[inline]
pub fn section_name(kind: ShapeKind, index: usize) -> String {
    format!("{}_{}", kind, index)
}

/// Triangulate and extrude a single shape.
pub fn build_mesh(shape: &mut ShapeElement, depth: ExtrusionDepth) -> svg_extrude_geometry::Result<Mesh> {
    triangulate(shape)?;
    extrude(shape, depth)
}

/// Turn every shape into a mesh section on `sink`.
///
/// Shapes are handled in order and independently: a shape that cannot be
/// triangulated or extruded is logged, recorded in the report, and skipped.
pub fn generate(
    shapes: Vec<ShapeElement>,
    depth: ExtrusionDepth,
    sink: &mut dyn MeshSink,
) -> GenerationReport {
    let mut report = GenerationReport {
        depth: depth.get(),
        shapes_total: shapes.len(),
        ..Default::default()
    };

    for (index, mut shape) in shapes.into_iter().enumerate() {
        let kind = shape.kind;
        match build_mesh(&mut shape, depth) {
            Ok(mesh) => {
                report.meshes_emitted += 1;
                report.vertices_emitted += mesh.vertex_count();
                report.triangles_emitted += mesh.triangle_count();
                sink.create_mesh_section(&section_name(kind, index), mesh);
            }
            Err(error) => {
                tracing::warn!(index, kind = %kind, error = %error, "Skipping shape");
                report.skipped.push(SkippedShape {
                    index,
                    kind,
                    reason: error.to_string(),
                });
            }
        }
    }

    tracing::info!(
        shapes = report.shapes_total,
        meshes = report.meshes_emitted,
        skipped = report.skipped.len(),
        triangles = report.triangles_emitted,
        depth = report.depth,
        "Generation complete"
    );

    report
}

/// Parse `markup` and generate meshes for its shapes.
///
/// Only malformed markup is an error; everything else is reported in the
/// result.
pub fn process_svg(
    markup: &str,
    depth: ExtrusionDepth,
    sink: &mut dyn MeshSink,
) -> svg_extrude_core::Result<ProcessingResult> {
    tracing::info!(content_size = markup.len(), "Starting SVG processing");

    let document = parse_document(markup)?;
    if !document.has_supported_elements() {
        tracing::warn!(root = %document.root_tag, "No supported SVG elements found");
    }

    let report = generate(document.shapes, depth, sink);

    Ok(ProcessingResult {
        root_tag: document.root_tag,
        report,
        diagnostics: document.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MeshCollector;
    use svg_extrude_core::Point2;

    #[test]
    fn test_generate_all_kinds() {
        let shapes = vec![
            ShapeElement::rect(0.0, 0.0, 10.0, 5.0),
            ShapeElement::circle(0.0, 0.0, 1.0),
            ShapeElement::polygon(vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(4.0, 4.0),
                Point2::new(0.0, 4.0),
            ]),
        ];

        let mut sink = MeshCollector::new();
        let report = generate(shapes, ExtrusionDepth::new(2.0), &mut sink);

        assert!(report.is_complete());
        assert_eq!(report.meshes_emitted, 3);
        assert_eq!(report.vertices_emitted, 8 + 66 + 8);
        assert_eq!(report.triangles_emitted, 12 + 128 + 12);
        assert_eq!(
            sink.names().collect::<Vec<_>>(),
            vec!["rect_0", "circle_1", "polygon_2"]
        );
    }

    #[test]
    fn test_failed_shape_does_not_stop_batch() {
        let svg = r#"<svg>
            <polygon points="0,0 5 2,2"/>
            <rect x="0" y="0" width="1" height="1"/>
        </svg>"#;

        let mut sink = MeshCollector::new();
        let result = process_svg(svg, ExtrusionDepth::new(1.0), &mut sink).unwrap();

        assert_eq!(result.report.shapes_total, 2);
        assert_eq!(result.report.meshes_emitted, 1);
        assert_eq!(result.report.skipped.len(), 1);
        assert_eq!(result.report.skipped[0].index, 0);
        assert_eq!(result.report.skipped[0].kind, ShapeKind::Polygon);
        assert!(sink.get("rect_1").is_some());
        assert!(sink.get("polygon_0").is_none());
    }

    #[test]
    fn test_insufficient_parameters_are_skipped() {
        let mut short_rect = ShapeElement::new(ShapeKind::Rect);
        short_rect.parameters.extend_from_slice(&[1.0, 2.0]);

        let mut sink = MeshCollector::new();
        let report = generate(
            vec![short_rect, ShapeElement::circle(0.0, 0.0, 2.0)],
            ExtrusionDepth::default(),
            &mut sink,
        );

        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("parameters"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_unsupported_only_document() {
        let svg = r#"<svg><line x1="0" y1="0" x2="1" y2="1"/></svg>"#;

        let mut sink = MeshCollector::new();
        let result = process_svg(svg, ExtrusionDepth::default(), &mut sink).unwrap();

        assert_eq!(result.root_tag, "svg");
        assert_eq!(result.report.shapes_total, 0);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_finite_attributes_yield_finite_meshes() {
        let svg = r#"<svg>
            <circle cx="0" cy="0" r="inf"/>
            <polygon points="nan,0 1,0 1,1"/>
            <rect x="0" y="0" width="1e400" height="1"/>
        </svg>"#;

        let mut sink = MeshCollector::new();
        let result = process_svg(svg, ExtrusionDepth::new(1.0), &mut sink).unwrap();

        // The polygon loses its "nan,0" pair and drops below three vertices
        assert_eq!(result.report.meshes_emitted, 2);
        assert_eq!(result.report.skipped.len(), 1);
        assert_eq!(result.report.skipped[0].kind, ShapeKind::Polygon);

        for name in ["circle_0", "rect_2"] {
            let mesh = sink.get(name).unwrap();
            assert!(mesh.vertices.iter().all(|v| v.coords.iter().all(|c| c.is_finite())));
            assert!(mesh.face_normals.iter().all(|n| n.iter().all(|c| c.is_finite())));

            let json = serde_json::to_string(&crate::types::MeshData::flat_shaded(name, mesh)).unwrap();
            assert!(!json.contains("null"));
        }
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let mut sink = MeshCollector::new();
        let result = process_svg("<svg><rect>", ExtrusionDepth::default(), &mut sink);
        assert!(result.is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_depth_is_clamped_before_use() {
        let mut sink = MeshCollector::new();
        let report = generate(
            vec![ShapeElement::rect(0.0, 0.0, 1.0, 1.0)],
            ExtrusionDepth::new(10_000.0),
            &mut sink,
        );

        assert_eq!(report.depth, svg_extrude_geometry::MAX_EXTRUSION_DEPTH);
        let (min, _) = sink.get("rect_0").unwrap().bounds();
        assert_eq!(min.z, -svg_extrude_geometry::MAX_EXTRUSION_DEPTH);
    }
}
