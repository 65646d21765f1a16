//! Changed-file detection against a git working tree.
//!
//! Shells out to the `git` binary rather than linking a libgit2 binding:
//! the pipeline only needs two porcelain queries and the working tree is
//! always local.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Handle to the git working tree being documented.
#[derive(Debug)]
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    /// Opens the working tree at `root`, verifying it is a git repository.
    ///
    /// # Errors
    ///
    /// Returns an error if `git` cannot be invoked or `root` is not inside
    /// a repository.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let output = Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(&root)
            .output()
            .map_err(|e| Error::command("git", e.to_string()))?;

        if !output.status.success() {
            return Err(Error::command(
                "git",
                format!("'{}' is not a git repository", root.display()),
            ));
        }

        Ok(Self { root })
    }

    /// Returns files with pending changes: unstaged modifications plus
    /// untracked files, deduplicated and sorted, relative to the repo root.
    ///
    /// # Errors
    ///
    /// Returns an error if either git query fails.
    pub fn changed_files(&self) -> Result<Vec<PathBuf>> {
        let mut paths = BTreeSet::new();

        for args in [
            &["diff", "--name-only"][..],
            &["ls-files", "--others", "--exclude-standard"][..],
        ] {
            for line in self.run_git(args)?.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    paths.insert(PathBuf::from(line));
                }
            }
        }

        let files: Vec<PathBuf> = paths.into_iter().collect();
        debug!("Found {} changed files", files.len());
        Ok(files)
    }

    /// The repository root this handle was opened on.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| Error::command("git", e.to_string()))?;

        if !output.status.success() {
            return Err(Error::command(
                "git",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_open_rejects_non_repository() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = WorkingTree::open(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_untracked_files_are_reported() {
        let temp = assert_fs::TempDir::new().unwrap();
        if !git(temp.path(), &["init", "-q"]) {
            return; // git unavailable in this environment
        }

        temp.child("new.pdf").write_str("%PDF").unwrap();
        temp.child("notes/new.md").write_str("hello").unwrap();

        let tree = WorkingTree::open(temp.path()).unwrap();
        let files = tree.changed_files().unwrap();

        assert!(files.contains(&PathBuf::from("new.pdf")));
        assert!(files.contains(&PathBuf::from("notes/new.md")));
    }

    #[test]
    fn test_changed_files_sorted_and_deduplicated() {
        let temp = assert_fs::TempDir::new().unwrap();
        if !git(temp.path(), &["init", "-q"]) {
            return;
        }

        temp.child("b.txt").write_str("b").unwrap();
        temp.child("a.txt").write_str("a").unwrap();

        let tree = WorkingTree::open(temp.path()).unwrap();
        let files = tree.changed_files().unwrap();

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }
}
