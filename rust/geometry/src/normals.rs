// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Winding and face normals
//!
//! All meshes use one convention: right-handed axes, counter-clockwise front
//! faces, normal = `(v1 - v0) x (v2 - v0)`.

use nalgebra::{Point2, Point3, Vector3};

/// Unit normal of the triangle `a, b, c`, or zero if it has no area
#[inline]
pub fn face_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    edge1
        .cross(&edge2)
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros)
}

/// Signed area of a closed 2D outline (shoelace). Positive when the outline
/// runs counter-clockwise.
#[inline]
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: f64 = (0..n)
        .map(|i| {
            let p0 = &points[i];
            let p1 = &points[(i + 1) % n];
            p0.x * p1.y - p1.x * p0.y
        })
        .sum();

    twice_area / 2.0
}

/// Direction a silhouette runs around its interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Winding of an outline; degenerate outlines count as counter-clockwise
    pub fn of(points: &[Point2<f64>]) -> Self {
        if signed_area(points) < 0.0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    /// Re-orient a triangle written for a counter-clockwise silhouette so it
    /// still faces outward for this winding
    #[inline]
    pub fn orient(self, [i0, i1, i2]: [u32; 3]) -> [u32; 3] {
        match self {
            Self::CounterClockwise => [i0, i1, i2],
            Self::Clockwise => [i0, i2, i1],
        }
    }
}
