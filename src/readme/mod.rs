// src/readme/mod.rs
// =============================================================================
// This module produces the Tech Stack section and puts it into the README.
//
// Submodules:
// - render: Builds the markdown block from the ranked languages
// - splice: Replaces, inserts or appends that block in the document text
// =============================================================================

mod render;
mod splice;

pub use render::render_section;
pub use splice::{update_file, SpliceAction};

/// First line of the managed block.
pub const START_MARKER: &str = "<!-- TECH-STACK-START -->";
/// Last line of the managed block.
pub const END_MARKER: &str = "<!-- TECH-STACK-END -->";
/// Heading the block is placed in front of the first time.
pub const ANCHOR_HEADING: &str = "## 📊 GitHub Stats";
