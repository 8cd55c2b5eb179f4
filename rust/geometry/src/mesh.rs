// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::error::{Error, Result};
use crate::normals::face_normal;
use nalgebra::{Point3, Vector3};

/// Triangle mesh for one extruded shape
///
/// Every triangle carries a face normal computed from its own edges when the
/// triangle is added, so `face_normals` always lines up with `triangles`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Triangle index triples
    pub triangles: Vec<[u32; 3]>,
    /// Unit normal per triangle (zero for degenerate triangles)
    pub face_normals: Vec<Vector3<f64>>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            face_normals: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Add a triangle over existing vertices
    ///
    /// Indices that do not exist yet get a zero normal; [`Mesh::validate`]
    /// reports them.
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        let normal = match (
            self.vertices.get(i0 as usize),
            self.vertices.get(i1 as usize),
            self.vertices.get(i2 as usize),
        ) {
            (Some(a), Some(b), Some(c)) => face_normal(a, b, c),
            _ => Vector3::zeros(),
        };
        self.triangles.push([i0, i1, i2]);
        self.face_normals.push(normal);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that every triangle index refers to an existing vertex
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        match self
            .triangles
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertex_count)
        {
            Some(&index) => Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        (min, max)
    }

    /// Average of all vertex positions
    pub fn centroid(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Area-weighted vertex normals, accumulated from the unnormalized
    /// cross product of every face touching the vertex
    pub fn vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.triangles {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            if i0 >= normals.len() || i1 >= normals.len() || i2 >= normals.len() {
                continue;
            }
            let edge1 = self.vertices[i1] - self.vertices[i0];
            let edge2 = self.vertices[i2] - self.vertices[i0];
            let normal = edge1.cross(&edge2);

            normals[i0] += normal;
            normals[i1] += normal;
            normals[i2] += normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        }

        normals
    }

    /// Flat-shaded render buffers: three unshared corners per triangle, each
    /// carrying the face normal
    pub fn to_flat_buffers(&self) -> MeshBuffers {
        let mut buffers = MeshBuffers::with_capacity(self.triangles.len() * 3, self.triangles.len() * 3);

        for (triangle, normal) in self.triangles.iter().zip(&self.face_normals) {
            for &index in triangle {
                let position = self
                    .vertices
                    .get(index as usize)
                    .copied()
                    .unwrap_or_else(Point3::origin);
                let corner = buffers.vertex_count() as u32;
                buffers.push_vertex(&position, normal);
                buffers.indices.push(corner);
            }
        }

        buffers
    }

    /// Indexed render buffers sharing vertices, with area-weighted normals
    pub fn to_indexed_buffers(&self) -> MeshBuffers {
        let normals = self.vertex_normals();
        let mut buffers = MeshBuffers::with_capacity(self.vertices.len(), self.triangles.len() * 3);

        for (position, normal) in self.vertices.iter().zip(&normals) {
            buffers.push_vertex(position, normal);
        }
        buffers.indices.extend(self.triangles.iter().flatten().copied());

        buffers
    }
}

/// Flat f32 arrays as consumed by GPU upload paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Create buffers with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    #[inline]
    fn push_vertex(&mut self, position: &Point3<f64>, normal: &Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
