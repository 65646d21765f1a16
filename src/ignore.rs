//! Ignore-pattern loading and matching for the tree renderer.
//!
//! Patterns use shell-wildcard semantics (`*`, `?`, `[seq]`), with `*`
//! crossing path separators. Each pattern is also tried in the rewritten
//! form `*/pattern` so bare names match one or more levels down.
//!
//! Known limitations, kept deliberately: no `**` recursive globs beyond
//! what `*` already gives, and no `!pattern` negation.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Exclusions appended to every pattern set: the version-control metadata
/// directory and the MkDocs build output directory.
const BUILTIN_EXCLUDES: &[&str] = &[".git", "site"];

/// An ordered, immutable set of ignore patterns for a single render pass.
#[derive(Debug)]
pub struct IgnorePatternSet {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl IgnorePatternSet {
    /// Loads patterns from `file_name` under `base_dir`.
    ///
    /// One pattern per line; blank lines and lines starting with `#` are
    /// skipped. A missing file is not an error and yields only the built-in
    /// exclusions.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if a
    /// pattern fails to compile.
    pub fn load(base_dir: &Path, file_name: &str) -> Result<Self> {
        let path = base_dir.join(file_name);

        let mut patterns = Vec::new();
        if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                patterns.push(line.to_string());
            }
            debug!(
                "Loaded {} ignore patterns from {}",
                patterns.len(),
                path.display()
            );
        } else {
            debug!("No ignore file at {}, using built-ins only", path.display());
        }

        Self::from_patterns(patterns)
    }

    /// Builds a pattern set from explicit patterns plus the built-in
    /// exclusions.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile as a glob.
    pub fn from_patterns(mut patterns: Vec<String>) -> Result<Self> {
        patterns.extend(BUILTIN_EXCLUDES.iter().map(|s| (*s).to_string()));

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            // Each pattern matches either the whole path or a suffix one or
            // more components deep.
            for candidate in [pattern.clone(), format!("*/{pattern}")] {
                let glob = Glob::new(&candidate)
                    .map_err(|e| Error::pattern(pattern.clone(), e.to_string()))?;
                builder.add(glob);
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| Error::pattern("<set>", e.to_string()))?;

        Ok(Self { patterns, matcher })
    }

    /// Returns true if `path` matches any pattern in the set.
    ///
    /// Matching is tested against the path string exactly as constructed by
    /// the caller, so relative and absolute inputs behave differently for
    /// bare-name patterns (an absolute path only hits the `*/pattern` form).
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }

    /// The loaded patterns, in order, including the built-ins.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let set = IgnorePatternSet::load(temp.path(), ".gitignore").unwrap();

        // Only the built-ins remain
        assert_eq!(set.patterns(), &[".git".to_string(), "site".to_string()]);
    }

    #[test]
    fn test_loader_skips_blanks_and_comments() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".gitignore")
            .write_str("*.log\n\n# a comment\n  \ntarget\n")
            .unwrap();

        let set = IgnorePatternSet::load(temp.path(), ".gitignore").unwrap();
        assert_eq!(
            set.patterns(),
            &[
                "*.log".to_string(),
                "target".to_string(),
                ".git".to_string(),
                "site".to_string(),
            ]
        );
    }

    #[test]
    fn test_bare_name_matches_nested() {
        let set = IgnorePatternSet::from_patterns(vec!["target".to_string()]).unwrap();

        assert!(set.is_ignored(&PathBuf::from("target")));
        assert!(set.is_ignored(&PathBuf::from("project/target")));
        assert!(set.is_ignored(&PathBuf::from("a/b/target")));
        assert!(!set.is_ignored(&PathBuf::from("targets")));
    }

    #[test]
    fn test_extension_pattern() {
        let set = IgnorePatternSet::from_patterns(vec!["*.log".to_string()]).unwrap();

        assert!(set.is_ignored(&PathBuf::from("debug.log")));
        assert!(set.is_ignored(&PathBuf::from("logs/debug.log")));
        assert!(!set.is_ignored(&PathBuf::from("debug.txt")));
    }

    #[test]
    fn test_builtins_always_present() {
        let set = IgnorePatternSet::from_patterns(Vec::new()).unwrap();

        assert!(set.is_ignored(&PathBuf::from(".git")));
        assert!(set.is_ignored(&PathBuf::from("repo/.git")));
        assert!(set.is_ignored(&PathBuf::from("site")));
    }

    #[test]
    fn test_question_mark_and_class() {
        let set =
            IgnorePatternSet::from_patterns(vec!["v?".to_string(), "[ab].txt".to_string()])
                .unwrap();

        assert!(set.is_ignored(&PathBuf::from("v1")));
        assert!(!set.is_ignored(&PathBuf::from("v10")));
        assert!(set.is_ignored(&PathBuf::from("a.txt")));
        assert!(!set.is_ignored(&PathBuf::from("c.txt")));
    }

    #[test]
    fn test_negation_is_not_supported() {
        // '!' has no special meaning; the pattern is taken literally.
        let set = IgnorePatternSet::from_patterns(vec!["!keep.md".to_string()]).unwrap();

        assert!(!set.is_ignored(&PathBuf::from("keep.md")));
        assert!(set.is_ignored(&PathBuf::from("!keep.md")));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = IgnorePatternSet::from_patterns(vec!["[unclosed".to_string()]);
        assert!(result.is_err());
    }
}
