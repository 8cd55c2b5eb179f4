// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Silhouette triangulation
//!
//! Produces the flat outline of each shape and, for polygons, a triangle fan
//! over it. Rectangles and circles are capped during extrusion.

use crate::error::{Error, Result};
use nalgebra::Point2;
use svg_extrude_core::{ShapeElement, ShapeKind};

/// Number of perimeter vertices used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 32;

/// Rectangle parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Circle parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

fn require_parameters(element: &ShapeElement) -> Result<&[f64]> {
    let required = element.kind.required_parameters();
    let found = element.parameters.len();
    if found < required {
        return Err(Error::InsufficientParameters {
            kind: element.kind,
            required,
            found,
        });
    }
    Ok(&element.parameters[..required])
}

impl RectParams {
    /// Read `[x, y, width, height]` from a rect element
    pub fn from_element(element: &ShapeElement) -> Result<Self> {
        let p = require_parameters(element)?;
        Ok(Self {
            x: p[0],
            y: p[1],
            width: p[2],
            height: p[3],
        })
    }
}

impl CircleParams {
    /// Read `[cx, cy, r]` from a circle element
    pub fn from_element(element: &ShapeElement) -> Result<Self> {
        let p = require_parameters(element)?;
        Ok(Self {
            cx: p[0],
            cy: p[1],
            radius: p[2],
        })
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.cx, self.cy)
    }
}

/// Corners of a rectangle, starting at its origin corner and running
/// counter-clockwise for positive width and height
#[inline]
pub fn rect_silhouette(rect: &RectParams) -> [Point2<f64>; 4] {
    let RectParams {
        x,
        y,
        width,
        height,
    } = *rect;
    [
        Point2::new(x, y),
        Point2::new(x + width, y),
        Point2::new(x + width, y + height),
        Point2::new(x, y + height),
    ]
}

/// Perimeter of a circle at evenly spaced, increasing angles starting at 0
pub fn circle_silhouette(circle: &CircleParams, segments: usize) -> Vec<Point2<f64>> {
    (0..segments)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
            Point2::new(
                circle.cx + circle.radius * angle.cos(),
                circle.cy + circle.radius * angle.sin(),
            )
        })
        .collect()
}

/// Fan triangulation anchored at vertex 0: `(0, i, i + 1)` for `i = 1..n-2`
///
/// Only correct for convex outlines.
#[inline]
pub fn fan_triangulate(n: usize) -> Vec<[u32; 3]> {
    if n < 3 {
        return Vec::new();
    }
    (1..n - 1)
        .map(|i| [0, i as u32, (i + 1) as u32])
        .collect()
}

/// Triangulate a shape in place
///
/// On error the element is left untouched.
pub fn triangulate(element: &mut ShapeElement) -> Result<()> {
    match element.kind {
        ShapeKind::Rect => triangulate_rect(element),
        ShapeKind::Circle => triangulate_circle(element),
        ShapeKind::Polygon => triangulate_polygon(element),
    }
}

fn triangulate_rect(element: &mut ShapeElement) -> Result<()> {
    let rect = RectParams::from_element(element)?;
    let corners = rect_silhouette(&rect);

    element.vertices.clear();
    element.vertices.extend_from_slice(&corners);
    element.triangles.clear();

    tracing::debug!(corners = ?corners, "Triangulated rectangle vertices");
    Ok(())
}

fn triangulate_circle(element: &mut ShapeElement) -> Result<()> {
    let circle = CircleParams::from_element(element)?;

    element.vertices = circle_silhouette(&circle, CIRCLE_SEGMENTS);
    element.triangles.clear();

    tracing::debug!(
        cx = circle.cx,
        cy = circle.cy,
        radius = circle.radius,
        segments = CIRCLE_SEGMENTS,
        "Triangulated circle vertices"
    );
    Ok(())
}

fn triangulate_polygon(element: &mut ShapeElement) -> Result<()> {
    let n = element.vertices.len();
    if n < 3 {
        return Err(Error::InsufficientVertices {
            kind: element.kind,
            found: n,
        });
    }

    element.triangles = fan_triangulate(n);

    tracing::debug!(triangles = element.triangles.len(), "Triangulated polygon");
    Ok(())
}
