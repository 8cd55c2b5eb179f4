use svg_extrude_core::ShapeKind;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during triangulation and extrusion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Not enough parameters for {kind}: expected {required}, found {found}")]
    InsufficientParameters {
        kind: ShapeKind,
        required: usize,
        found: usize,
    },

    #[error("Not enough vertices for {kind}: need at least 3, found {found}")]
    InsufficientVertices { kind: ShapeKind, found: usize },

    #[error("Shape has not been triangulated: {0}")]
    NotTriangulated(ShapeKind),

    #[error("Triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
