// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh consumers

use rustc_hash::FxHashMap;
use svg_extrude_geometry::Mesh;

/// Receives finished meshes
///
/// Each call creates the named section, or replaces it if the name is
/// already in use. The sink takes ownership of the mesh.
pub trait MeshSink {
    fn create_mesh_section(&mut self, name: &str, mesh: Mesh);
}

#[derive(Debug, Clone, PartialEq)]
struct Section {
    name: String,
    mesh: Mesh,
}

/// In-memory sink that keeps sections in creation order
#[derive(Debug, Clone, Default)]
pub struct MeshCollector {
    sections: Vec<Section>,
    by_name: FxHashMap<String, usize>,
}

impl MeshCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by name
    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.by_name.get(name).map(|&slot| &self.sections[slot].mesh)
    }

    /// Section names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}

impl MeshSink for MeshCollector {
    fn create_mesh_section(&mut self, name: &str, mesh: Mesh) {
        match self.by_name.get(name) {
            // Replacing keeps the original slot
            Some(&slot) => self.sections[slot].mesh = mesh,
            None => {
                self.by_name.insert(name.to_string(), self.sections.len());
                self.sections.push(Section {
                    name: name.to_string(),
                    mesh,
                });
            }
        }
    }
}
