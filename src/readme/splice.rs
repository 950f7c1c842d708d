// src/readme/splice.rs
// =============================================================================
// This module puts a rendered section into a document.
//
// Strategy, first match wins:
// 1. The document already has START ... END blocks: replace each of them
// 2. The document has the "## 📊 GitHub Stats" heading: insert in front of it,
//    followed by a horizontal rule
// 3. Otherwise: append to the end after a blank line
//
// Writing goes through a temporary file in the same directory which is then
// renamed over the target, so a crash never leaves a half-written README.
// =============================================================================

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{ANCHOR_HEADING, END_MARKER, START_MARKER};

// Everything from a START marker to the nearest END marker, across lines
static EXISTING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(START_MARKER),
        regex::escape(END_MARKER)
    ))
    .unwrap()
});

/// Which path the splice took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceAction {
    /// An existing block was replaced
    Updated,
    /// The block was inserted before the anchor heading
    Inserted,
    /// The block was appended to the end
    Appended,
}

impl fmt::Display for SpliceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            SpliceAction::Updated => "updated",
            SpliceAction::Inserted => "inserted",
            SpliceAction::Appended => "appended",
        };
        f.write_str(word)
    }
}

/// Returns `content` with `section` spliced in, and how it got there.
pub fn splice(content: &str, section: &str) -> (String, SpliceAction) {
    if EXISTING_BLOCK.is_match(content) {
        // NoExpand: badge URLs may contain '$', which must not be read as a group
        let updated = EXISTING_BLOCK.replace_all(content, NoExpand(section));
        return (updated.into_owned(), SpliceAction::Updated);
    }

    if let Some(at) = content.find(ANCHOR_HEADING) {
        let mut updated = String::with_capacity(content.len() + section.len() + 8);
        updated.push_str(&content[..at]);
        updated.push_str(section);
        updated.push_str("\n\n---\n\n");
        updated.push_str(&content[at..]);
        return (updated, SpliceAction::Inserted);
    }

    (format!("{}\n\n{}", content, section), SpliceAction::Appended)
}

/// Reads `path`, splices `section` into it and writes it back atomically.
pub fn update_file(path: &Path, section: &str) -> Result<SpliceAction> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (updated, action) = splice(&content, section);

    if updated == content {
        debug!(path = %path.display(), "section unchanged, skipping write");
        return Ok(action);
    }

    // Follow a symlinked README so the link itself survives the rename
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    write_atomically(&target, &updated)?;
    Ok(action)
}

// Writes to a sibling temp file, keeps the original permissions, then renames
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
    tmp.as_file().sync_all()?;

    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    fs::set_permissions(tmp.path(), permissions)
        .with_context(|| format!("Failed to set permissions on {}", tmp.path().display()))?;

    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
