// src/readme/render.rs
// =============================================================================
// Builds the markdown that goes between the two sentinel comments.
//
// Output shape:
//
//   <!-- TECH-STACK-START -->
//   ## 🛠️ Tech Stack
//   > Auto-detected from my repositories
//
//   ![Rust](...)
//   ![Python](...)
//   <!-- Also detected (no badge yet): Zig, Nix -->
//
//   <!-- TECH-STACK-END -->
//
// The "Also detected" line only appears when some language has no badge.
// =============================================================================

use super::{END_MARKER, START_MARKER};
use crate::stack::badge_for;

const HEADING: &str = "## 🛠️ Tech Stack";
const SUBTITLE: &str = "> Auto-detected from my repositories";

/// Renders the full section for languages given in ranked order.
///
/// Languages with a badge keep their relative order as badge lines; the rest
/// keep theirs inside the trailing comment.
pub fn render_section<S: AsRef<str>>(languages: &[S]) -> String {
    let (known, unknown): (Vec<&str>, Vec<&str>) = languages
        .iter()
        .map(|language| language.as_ref())
        .partition(|language| badge_for(language).is_some());

    let badges = known
        .iter()
        .filter_map(|language| badge_for(language))
        .collect::<Vec<_>>()
        .join("\n");

    let note = if unknown.is_empty() {
        String::new()
    } else {
        format!("\n<!-- Also detected (no badge yet): {} -->", unknown.join(", "))
    };

    format!(
        "{START_MARKER}\n{HEADING}\n{SUBTITLE}\n\n{badges}{note}\n\n{END_MARKER}"
    )
}
