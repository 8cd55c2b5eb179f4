// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - lifting triangulated silhouettes into 3D solids
//!
//! The top layer sits at `z = 0` and the bottom layer at `z = -depth`. Caps
//! and walls are written for a counter-clockwise silhouette; a clockwise one
//! has every triangle flipped so all faces keep pointing out of the solid.

use crate::depth::ExtrusionDepth;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::normals::Winding;
use crate::triangulation::{fan_triangulate, CircleParams};
use nalgebra::{Point2, Point3};
use std::ops::Range;
use svg_extrude_core::{ShapeElement, ShapeKind};

/// Extrude a triangulated shape along -Z
pub fn extrude(element: &ShapeElement, depth: ExtrusionDepth) -> Result<Mesh> {
    let mesh = match element.kind {
        ShapeKind::Rect => extrude_rect(element, depth)?,
        ShapeKind::Circle => extrude_circle(element, depth)?,
        ShapeKind::Polygon => extrude_polygon(element, depth)?,
    };
    mesh.validate()?;

    tracing::debug!(
        kind = %element.kind,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        depth = depth.get(),
        "Extruded shape"
    );

    Ok(mesh)
}

/// Rectangle: 4 corners become 8 vertices and 12 triangles
pub fn extrude_rect(element: &ShapeElement, depth: ExtrusionDepth) -> Result<Mesh> {
    let corners = silhouette(element)?;
    let n = corners.len() as u32;
    let caps = fan_triangulate(corners.len());

    let mut solid = SolidBuilder::new(corners, corners.len() * 2, caps.len() * 2 + corners.len() * 2);
    let top = solid.push_layer(corners, 0.0);
    let bottom = solid.push_layer(corners, -depth.get());
    solid.push_top_cap(top, &caps);
    solid.push_bottom_cap(bottom, &caps);
    solid.push_side_walls(top..top + n, bottom - top);

    Ok(solid.finish())
}

/// Circle: a center vertex is added to each ring, so 32 perimeter vertices
/// become 66 vertices; both caps are closed fans around the centers
pub fn extrude_circle(element: &ShapeElement, depth: ExtrusionDepth) -> Result<Mesh> {
    let ring = silhouette(element)?;
    let center = CircleParams::from_element(element)?.center();
    let n = ring.len() as u32;

    // Fan around the center (index 0), closing back onto the first
    // perimeter vertex
    let caps: Vec<[u32; 3]> = (1..=n)
        .map(|i| [0, i, if i == n { 1 } else { i + 1 }])
        .collect();

    let layer: Vec<Point2<f64>> = std::iter::once(center).chain(ring.iter().copied()).collect();

    let mut solid = SolidBuilder::new(ring, layer.len() * 2, caps.len() * 2 + ring.len() * 2);
    let top = solid.push_layer(&layer, 0.0);
    let bottom = solid.push_layer(&layer, -depth.get());
    solid.push_top_cap(top, &caps);
    solid.push_bottom_cap(bottom, &caps);
    // Centers are not part of the walls
    solid.push_side_walls(top + 1..top + 1 + n, bottom - top);

    Ok(solid.finish())
}

/// Polygon: N outline vertices become 2N vertices; the caps reuse the
/// triangulation stored on the element
pub fn extrude_polygon(element: &ShapeElement, depth: ExtrusionDepth) -> Result<Mesh> {
    let outline = silhouette(element)?;
    let n = outline.len() as u32;

    if element.triangles.is_empty() {
        return Err(Error::NotTriangulated(element.kind));
    }
    if let Some(&index) = element.triangles.iter().flatten().find(|&&i| i >= n) {
        return Err(Error::IndexOutOfRange {
            index,
            vertex_count: outline.len(),
        });
    }

    let mut solid = SolidBuilder::new(
        outline,
        outline.len() * 2,
        element.triangles.len() * 2 + outline.len() * 2,
    );
    let top = solid.push_layer(outline, 0.0);
    let bottom = solid.push_layer(outline, -depth.get());
    solid.push_top_cap(top, &element.triangles);
    solid.push_bottom_cap(bottom, &element.triangles);
    solid.push_side_walls(top..top + n, bottom - top);

    Ok(solid.finish())
}

/// The element's silhouette, checked to be extrudable
fn silhouette(element: &ShapeElement) -> Result<&[Point2<f64>]> {
    let found = element.vertices.len();
    if found == 0 && element.kind != ShapeKind::Polygon {
        return Err(Error::NotTriangulated(element.kind));
    }
    if found < 3 {
        return Err(Error::InsufficientVertices {
            kind: element.kind,
            found,
        });
    }
    Ok(&element.vertices)
}

/// Accumulates layers, caps and walls with one winding convention
struct SolidBuilder {
    mesh: Mesh,
    winding: Winding,
}

impl SolidBuilder {
    fn new(silhouette: &[Point2<f64>], vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            mesh: Mesh::with_capacity(vertex_count, triangle_count),
            winding: Winding::of(silhouette),
        }
    }

    /// Add a copy of `points` at height `z`, returning the index of its first vertex
    fn push_layer(&mut self, points: &[Point2<f64>], z: f64) -> u32 {
        let base_index = self.mesh.vertex_count() as u32;
        for p in points {
            self.mesh.add_vertex(Point3::new(p.x, p.y, z));
        }
        base_index
    }

    #[inline]
    fn push_face(&mut self, triangle: [u32; 3]) {
        let [i0, i1, i2] = self.winding.orient(triangle);
        self.mesh.add_triangle(i0, i1, i2);
    }

    /// Cap facing +Z: triangles used as written
    fn push_top_cap(&mut self, base_index: u32, triangles: &[[u32; 3]]) {
        for &[a, b, c] in triangles {
            self.push_face([base_index + a, base_index + b, base_index + c]);
        }
    }

    /// Cap facing -Z: last two indices swapped
    fn push_bottom_cap(&mut self, base_index: u32, triangles: &[[u32; 3]]) {
        for &[a, b, c] in triangles {
            self.push_face([base_index + a, base_index + c, base_index + b]);
        }
    }

    /// Two triangles per edge of the closed ring `ring`, joining each top
    /// vertex to the vertex `bottom_offset` further on
    fn push_side_walls(&mut self, ring: Range<u32>, bottom_offset: u32) {
        let start = ring.start;
        let len = ring.end - ring.start;

        for k in 0..len {
            let top_a = start + k;
            let top_b = start + (k + 1) % len;
            let bottom_a = top_a + bottom_offset;
            let bottom_b = top_b + bottom_offset;

            self.push_face([top_a, bottom_a, top_b]);
            self.push_face([top_b, bottom_a, bottom_b]);
        }
    }

    fn finish(self) -> Mesh {
        self.mesh
    }
}
