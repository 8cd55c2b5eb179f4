// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape records produced by the parser

use nalgebra::Point2;
use smallvec::SmallVec;
use std::fmt;

/// Supported primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShapeKind {
    Rect,
    Circle,
    Polygon,
}

impl ShapeKind {
    /// Look up a kind from an element tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("rect") {
            Some(Self::Rect)
        } else if tag.eq_ignore_ascii_case("circle") {
            Some(Self::Circle)
        } else if tag.eq_ignore_ascii_case("polygon") {
            Some(Self::Polygon)
        } else {
            None
        }
    }

    /// Lower-case SVG tag for this kind
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
        }
    }

    /// Number of numeric parameters the kind needs before it can be triangulated
    #[inline]
    pub fn required_parameters(self) -> usize {
        match self {
            Self::Rect => 4,
            Self::Circle => 3,
            Self::Polygon => 0,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One parsed primitive
///
/// Created by the parser, filled in by the triangulator, then read by the
/// extruder. `parameters` holds `[x, y, width, height]` for rectangles and
/// `[cx, cy, r]` for circles; polygons carry their outline in `vertices`
/// straight from the `points` attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeElement {
    pub kind: ShapeKind,
    pub parameters: SmallVec<[f64; 4]>,
    /// Flat silhouette (counter-clockwise expected)
    pub vertices: Vec<Point2<f64>>,
    /// Triangle index triples into `vertices`
    pub triangles: Vec<[u32; 3]>,
}

impl ShapeElement {
    /// Create an empty element of the given kind
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            parameters: SmallVec::new(),
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Rectangle from its corner and size
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut element = Self::new(ShapeKind::Rect);
        element.parameters.extend_from_slice(&[x, y, width, height]);
        element
    }

    /// Circle from its center and radius
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        let mut element = Self::new(ShapeKind::Circle);
        element.parameters.extend_from_slice(&[cx, cy, radius]);
        element
    }

    /// Polygon from its outline
    pub fn polygon(vertices: Vec<Point2<f64>>) -> Self {
        Self {
            vertices,
            ..Self::new(ShapeKind::Polygon)
        }
    }

    /// Check that every triangle index refers to an existing vertex
    pub fn triangles_in_range(&self) -> bool {
        let count = self.vertices.len();
        self.triangles
            .iter()
            .flatten()
            .all(|&index| (index as usize) < count)
    }
}
