// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-format sinks for generated meshes.

use svg_extrude_geometry::Mesh;
use svg_extrude_processing::{GenerationReport, MeshData, MeshDocument, MeshSink};

use crate::config::Shading;

/// Collects mesh data for JSON output.
#[derive(Debug, Default)]
pub struct JsonSink {
    shading: Shading,
    meshes: Vec<MeshData>,
}

impl JsonSink {
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            meshes: Vec::new(),
        }
    }

    /// Wrap the collected meshes with the generation report.
    pub fn into_document(self, report: GenerationReport, diagnostics: Vec<String>) -> MeshDocument {
        MeshDocument {
            meshes: self.meshes,
            report,
            diagnostics,
        }
    }
}

impl MeshSink for JsonSink {
    fn create_mesh_section(&mut self, name: &str, mesh: Mesh) {
        let data = match self.shading {
            Shading::Flat => MeshData::flat_shaded(name, &mesh),
            Shading::Smooth => MeshData::smooth_shaded(name, &mesh),
        };
        match self.meshes.iter_mut().find(|m| m.name == name) {
            Some(existing) => *existing = data,
            None => self.meshes.push(data),
        }
    }
}

/// Writes sections as Wavefront OBJ objects.
///
/// Flat shading writes one `vn` per face; smooth shading writes one per
/// vertex, so faces share normals across edges.
#[derive(Debug)]
pub struct ObjSink {
    shading: Shading,
    out: String,
    /// Vertices written so far (OBJ indices are global and 1-based)
    vertex_base: usize,
    normal_base: usize,
}

impl ObjSink {
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            out: String::from("# svg-extrude\n"),
            vertex_base: 0,
            normal_base: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn push_line(&mut self, line: String) {
        self.out.push_str(&line);
        self.out.push('\n');
    }
}

impl MeshSink for ObjSink {
    // OBJ has no way to replace an earlier object, so a repeated name is
    // written again as a second object.
    fn create_mesh_section(&mut self, name: &str, mesh: Mesh) {
        self.push_line(format!("o {}", name));
        for v in &mesh.vertices {
            self.push_line(format!("v {} {} {}", v.x, v.y, v.z));
        }

        let normals = match self.shading {
            Shading::Flat => mesh.face_normals.clone(),
            Shading::Smooth => mesh.vertex_normals(),
        };
        for n in &normals {
            self.push_line(format!("vn {} {} {}", n.x, n.y, n.z));
        }

        for (face, triangle) in mesh.triangles.iter().enumerate() {
            let [a, b, c] = triangle.map(|i| self.vertex_base + i as usize + 1);
            let line = match self.shading {
                Shading::Flat => {
                    let n = self.normal_base + face + 1;
                    format!("f {a}//{n} {b}//{n} {c}//{n}")
                }
                Shading::Smooth => {
                    let [na, nb, nc] = triangle.map(|i| self.normal_base + i as usize + 1);
                    format!("f {a}//{na} {b}//{nb} {c}//{nc}")
                }
            };
            self.push_line(line);
        }

        self.vertex_base += mesh.vertex_count();
        self.normal_base += normals.len();
    }
}
