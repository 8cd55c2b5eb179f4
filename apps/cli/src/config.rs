// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI defaults loaded from environment variables.

use clap::ValueEnum;
use svg_extrude_geometry::ExtrusionDepth;

/// Mesh output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Mesh list plus generation report.
    #[default]
    Json,
    /// Wavefront OBJ, one object per section.
    Obj,
}

impl OutputFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }
}

/// How normals are assigned to generated meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Shading {
    /// One normal per face; corners are not shared.
    #[default]
    Flat,
    /// Shared vertices with area-weighted normals.
    Smooth,
}

impl Shading {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "flat" => Some(Self::Flat),
            "smooth" => Some(Self::Smooth),
            _ => None,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Extrusion depth used when `--depth` is not given.
    pub depth: ExtrusionDepth,
    /// Output format used when `--format` is not given.
    pub format: OutputFormat,
    /// Shading used when `--shading` is not given.
    pub shading: Shading,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            depth: lookup("SVG_EXTRUDE_DEPTH")
                .and_then(|value| ExtrusionDepth::parse(&value))
                .unwrap_or_default(),
            format: lookup("SVG_EXTRUDE_FORMAT")
                .and_then(|value| OutputFormat::from_name(&value))
                .unwrap_or_default(),
            shading: lookup("SVG_EXTRUDE_SHADING")
                .and_then(|value| Shading::from_name(&value))
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
