//! Recursive folder-tree rendering with ignore-pattern filtering.
//!
//! The output ordering is deliberate and byte-exact: at each level every
//! surviving subdirectory is emitted with `├── ` and fully expanded
//! depth-first before any file at that level is emitted with `└── `. This
//! differs from the usual `tree` utility, which interleaves names
//! alphabetically.

use crate::error::{Error, Result};
use crate::ignore::IgnorePatternSet;
use std::fs;
use std::path::Path;

const BRANCH_MARKER: &str = "├── ";
const LEAF_MARKER: &str = "└── ";
const PREFIX_EXTENSION: &str = "│   ";

/// Renders a directory tree as indented branch-art text.
#[derive(Debug)]
pub struct TreeRenderer<'a> {
    ignore: &'a IgnorePatternSet,
    max_depth: usize,
}

impl<'a> TreeRenderer<'a> {
    /// Creates a renderer over the given pattern set with a recursion cap.
    #[must_use]
    pub fn new(ignore: &'a IgnorePatternSet, max_depth: usize) -> Self {
        Self { ignore, max_depth }
    }

    /// Renders the tree rooted at `base`. An empty directory yields an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory in the tree cannot be read (a
    /// partial tree would be misleading, so nothing is skipped silently)
    /// or if recursion exceeds the depth cap.
    pub fn render(&self, base: &Path) -> Result<String> {
        self.render_level(base, "", 0)
    }

    fn render_level(&self, dir: &Path, prefix: &str, depth: usize) -> Result<String> {
        if depth >= self.max_depth {
            return Err(Error::DepthExceeded {
                path: dir.to_path_buf(),
                limit: self.max_depth,
            });
        }

        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;

            if self.ignore.is_ignored(&dir.join(&name)) {
                continue;
            }

            if file_type.is_dir() {
                subdirs.push(name);
            } else {
                files.push(name);
            }
        }

        // Ordinal byte-wise ordering within each partition
        subdirs.sort_unstable();
        files.sort_unstable();

        let mut out = String::new();
        for name in &subdirs {
            out.push_str(prefix);
            out.push_str(BRANCH_MARKER);
            out.push_str(name);
            out.push('\n');

            let child_prefix = format!("{prefix}{PREFIX_EXTENSION}");
            out.push_str(&self.render_level(&dir.join(name), &child_prefix, depth + 1)?);
        }

        for name in &files {
            out.push_str(prefix);
            out.push_str(LEAF_MARKER);
            out.push_str(name);
            out.push('\n');
        }

        Ok(out)
    }
}
