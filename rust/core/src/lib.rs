// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SVG-Extrude Core Parser
//!
//! Turns a small subset of SVG markup into typed shape records that the
//! geometry crate can triangulate and extrude.
//!
//! ## Overview
//!
//! - **Document parsing**: [`quick-xml`](https://docs.rs/quick-xml) tokenizes the
//!   markup; only the root element's direct children are inspected
//! - **Supported shapes**: `rect`, `circle` and `polygon`
//! - **Diagnostics**: unsupported elements are reported, never fatal
//! - **Number parsing**: prefix-tolerant, so `"10px"` reads as `10`, using
//!   [fast-float](https://docs.rs/fast-float)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use svg_extrude_core::{parse_document, ShapeKind};
//!
//! let svg = r#"<svg><rect x="0" y="0" width="10" height="5"/></svg>"#;
//! let document = parse_document(svg)?;
//!
//! assert_eq!(document.shapes.len(), 1);
//! assert_eq!(document.shapes[0].kind, ShapeKind::Rect);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for parsed shapes

pub mod diagnostic;
pub mod error;
pub mod parser;
pub mod shape;

pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use parser::{
    parse_circle, parse_document, parse_number, parse_number_prefix, parse_number_strict,
    parse_points, parse_polygon, parse_rect, Attributes, ParsedDocument,
};
pub use shape::{ShapeElement, ShapeKind};

// Re-export nalgebra point type so downstream crates agree on it
pub use nalgebra::Point2;
