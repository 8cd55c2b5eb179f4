//! SVG-Extrude Geometry Processing
//!
//! Triangulates the silhouettes of parsed shapes and extrudes them into
//! closed triangle meshes, using nalgebra for points and vectors.

pub mod depth;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod normals;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use depth::{ExtrusionDepth, DEFAULT_EXTRUSION_DEPTH, MAX_EXTRUSION_DEPTH};
pub use error::{Error, Result};
pub use extrusion::{extrude, extrude_circle, extrude_polygon, extrude_rect};
pub use mesh::{Mesh, MeshBuffers};
pub use normals::{face_normal, signed_area, Winding};
pub use triangulation::{
    circle_silhouette, fan_triangulate, rect_silhouette, triangulate, CircleParams, RectParams,
    CIRCLE_SEGMENTS,
};
