// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-fatal parse diagnostics

use std::fmt;

/// Something worth reporting that did not stop the parse
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// A direct child of the root that is not a shape, `title` or `desc`
    UnsupportedElement { tag: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedElement { tag } => {
                write!(f, "Unsupported SVG element ignored: <{}>", tag)
            }
        }
    }
}
