//! Changelog predicates used by the changelog gate.

use std::path::Path;

use crate::fs::FileSystem;

/// Header of the unreleased section followed by exactly one blank line.
pub const NEXT_SECTION_MARKER: &str = "## NEXT\n\n";

/// Whether `branch` starts with any of `prefixes`. Case-sensitive.
pub fn branch_matches_prefix<S: AsRef<str>>(branch: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .any(|prefix| branch.starts_with(prefix.as_ref()))
}

/// Whether a regular file exists at `path`.
pub fn changelog_exists<F: FileSystem>(fs: &F, path: &Path) -> bool {
    fs.is_file(path)
}

/// Number of non-overlapping NEXT markers in `content`.
pub fn count_next_sections(content: &str) -> usize {
    content.matches(NEXT_SECTION_MARKER).count()
}

/// A changelog is valid when the NEXT marker occurs exactly once.
///
/// The marker is matched anywhere in the text, including inside code blocks.
pub fn is_valid_next_section(content: &str) -> bool {
    count_next_sections(content) == 1
}

/// Read the changelog and validate its NEXT section.
///
/// Read failures are logged and reported as an invalid changelog.
pub fn has_valid_next_section<F: FileSystem>(fs: &F, path: &Path) -> bool {
    match fs.read_to_string(path) {
        Ok(content) => {
            let count = count_next_sections(&content);
            log::debug!("{}: found {count} NEXT section(s)", path.display());
            count == 1
        }
        Err(err) => {
            log::warn!("Error reading {}: {err}", path.display());
            false
        }
    }
}
