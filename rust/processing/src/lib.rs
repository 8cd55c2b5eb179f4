// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation pipeline shared by the CLI and library users.
//!
//! Shapes, depth and the mesh consumer are all passed in explicitly; nothing
//! is held in global state.

pub mod pipeline;
pub mod sink;
pub mod types;

pub use pipeline::{build_mesh, generate, process_svg, section_name, ProcessingResult};
pub use sink::{MeshCollector, MeshSink};
pub use types::{GenerationReport, MeshData, MeshDocument, SkippedShape};
