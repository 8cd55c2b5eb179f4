// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion depth

use std::fmt;

/// Largest accepted extrusion depth
pub const MAX_EXTRUSION_DEPTH: f64 = 250.0;

/// Depth used when nothing else is configured
pub const DEFAULT_EXTRUSION_DEPTH: f64 = 10.0;

/// Extrusion depth, always within `[0, MAX_EXTRUSION_DEPTH]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ExtrusionDepth(f64);

impl ExtrusionDepth {
    /// Clamp `value` into the valid range. Non-finite values become 0.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, MAX_EXTRUSION_DEPTH))
        } else {
            Self(0.0)
        }
    }

    /// Parse user-entered text. Text that is not entirely numeric is
    /// rejected rather than read as 0.
    pub fn parse(text: &str) -> Option<Self> {
        svg_extrude_core::parse_number_strict(text).map(Self::new)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ExtrusionDepth {
    fn default() -> Self {
        Self(DEFAULT_EXTRUSION_DEPTH)
    }
}

impl From<f64> for ExtrusionDepth {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ExtrusionDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
