// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable output types.

use serde::{Deserialize, Serialize};
use svg_extrude_core::ShapeKind;
use svg_extrude_geometry::Mesh;

/// Render-ready mesh with its section name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Section name (e.g., "rect_0").
    pub name: String,
    /// Vertex positions (x, y, z triplets).
    pub positions: Vec<f32>,
    /// Vertex normals (x, y, z triplets).
    pub normals: Vec<f32>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Flat-shaded buffers, so each face renders with its own normal.
    pub fn flat_shaded(name: &str, mesh: &Mesh) -> Self {
        let buffers = mesh.to_flat_buffers();
        Self {
            name: name.to_string(),
            positions: buffers.positions,
            normals: buffers.normals,
            indices: buffers.indices,
        }
    }

    /// Indexed buffers with shared vertices and area-weighted normals, so
    /// faces blend across edges.
    pub fn smooth_shaded(name: &str, mesh: &Mesh) -> Self {
        let buffers = mesh.to_indexed_buffers();
        Self {
            name: name.to_string(),
            positions: buffers.positions,
            normals: buffers.normals,
            indices: buffers.indices,
        }
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}

/// A shape that produced no mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedShape {
    /// Position of the shape in the batch.
    pub index: usize,
    pub kind: ShapeKind,
    /// Human-readable cause.
    pub reason: String,
}

/// Summary of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Extrusion depth used for every shape.
    pub depth: f64,
    pub shapes_total: usize,
    pub meshes_emitted: usize,
    pub vertices_emitted: usize,
    pub triangles_emitted: usize,
    pub skipped: Vec<SkippedShape>,
}

impl GenerationReport {
    /// Whether every shape produced a mesh.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Everything written by the JSON output path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDocument {
    pub meshes: Vec<MeshData>,
    pub report: GenerationReport,
    /// Parse diagnostics, rendered as text.
    pub diagnostics: Vec<String>,
}

impl MeshDocument {
    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg_extrude_geometry::Point3;

    #[test]
    fn test_mesh_data_from_mesh() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_triangle(0, 1, 2);

        let data = MeshData::flat_shaded("polygon_0", &mesh);
        assert_eq!(data.name, "polygon_0");
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
        assert!(!data.is_empty());
        assert_eq!(&data.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_smooth_mesh_data_shares_vertices() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);

        let data = MeshData::smooth_shaded("rect_0", &mesh);
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.triangle_count(), 2);
        assert_eq!(data.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(&data.normals[6..9], &[0.0, 0.0, 1.0]);

        let flat = MeshData::flat_shaded("rect_0", &mesh);
        assert_eq!(flat.vertex_count(), 6);
    }

    #[test]
    fn test_mesh_document_json() {
        let document = MeshDocument {
            meshes: Vec::new(),
            report: GenerationReport {
                depth: 2.0,
                shapes_total: 1,
                skipped: vec![SkippedShape {
                    index: 0,
                    kind: ShapeKind::Polygon,
                    reason: "too few vertices".to_string(),
                }],
                ..Default::default()
            },
            diagnostics: vec!["Unsupported SVG element ignored: <line>".to_string()],
        };

        let json = document.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["report"]["skipped"][0]["kind"], "polygon");
        assert_eq!(value["report"]["depth"], 2.0);
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(1));
    }
}
