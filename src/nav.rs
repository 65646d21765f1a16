//! MkDocs navigation regeneration.
//!
//! Scans the docs directory for Markdown pages and rewrites only the
//! `nav:` key of `mkdocs.yml`, leaving the rest of the document intact.
//! Pages at the docs root land under `Home`; deeper pages are grouped by
//! their first directory component.

use crate::config::Config;
use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use walkdir::WalkDir;

const HOME_SECTION: &str = "Home";

/// Rebuilds the navigation structure of a MkDocs site.
#[derive(Debug)]
pub struct NavBuilder {
    docs_dir: PathBuf,
    mkdocs_path: PathBuf,
}

impl NavBuilder {
    /// Creates a builder from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            docs_dir: config.docs_path(),
            mkdocs_path: config.mkdocs_path(),
        }
    }

    /// Collects Markdown pages under the docs directory as `/`-separated
    /// paths relative to it, in deterministic walk order. A missing docs
    /// directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory inside the docs tree cannot be read.
    pub fn collect_pages(&self) -> Result<Vec<String>> {
        if !self.docs_dir.exists() {
            debug!("Docs directory {} is absent", self.docs_dir.display());
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for entry in WalkDir::new(&self.docs_dir)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map_or_else(|| self.docs_dir.clone(), PathBuf::from);
                Error::Io {
                    path,
                    message: e.to_string(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let relative = pathdiff::diff_paths(entry.path(), &self.docs_dir)
                .unwrap_or_else(|| entry.path().to_path_buf());
            pages.push(relative.to_string_lossy().replace('\\', "/"));
        }

        Ok(pages)
    }

    /// Groups pages into nav sections: root-level pages under `Home`
    /// (always first, possibly empty), others under their first directory
    /// component in order of first appearance.
    #[must_use]
    pub fn group_pages(pages: &[String]) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = vec![(HOME_SECTION.to_string(), Vec::new())];

        for page in pages {
            let key = match page.split_once('/') {
                None => HOME_SECTION,
                Some((first, _)) => first,
            };

            match groups.iter_mut().find(|(k, _)| k == key) {
                Some((_, entries)) => entries.push(page.clone()),
                None => groups.push((key.to_string(), vec![page.clone()])),
            }
        }

        groups
    }

    /// Rewrites the `nav:` key of `mkdocs.yml` from the current docs tree.
    /// Returns the number of pages placed into the navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if `mkdocs.yml` is missing, not a mapping, or
    /// cannot be written back.
    pub fn update(&self) -> Result<usize> {
        let raw = fs::read_to_string(&self.mkdocs_path)
            .map_err(|e| Error::io(&self.mkdocs_path, e))?;

        let mut doc: Value =
            serde_yaml::from_str(&raw).map_err(|e| Error::yaml(&self.mkdocs_path, e))?;

        let Some(mapping) = doc.as_mapping_mut() else {
            return Err(Error::Yaml {
                path: self.mkdocs_path.clone(),
                message: "top-level document is not a mapping".to_string(),
            });
        };

        let pages = self.collect_pages()?;
        let page_count = pages.len();
        let groups = Self::group_pages(&pages);

        mapping.insert(Value::from("nav"), Self::render_nav(&groups));

        let serialized =
            serde_yaml::to_string(&doc).map_err(|e| Error::yaml(&self.mkdocs_path, e))?;
        fs::write(&self.mkdocs_path, serialized).map_err(|e| Error::io(&self.mkdocs_path, e))?;

        info!(
            "Updated nav in {} with {} pages in {} sections",
            self.mkdocs_path.display(),
            page_count,
            groups.len()
        );
        Ok(page_count)
    }

    fn render_nav(groups: &[(String, Vec<String>)]) -> Value {
        let sections = groups
            .iter()
            .map(|(key, entries)| {
                let mut section = Mapping::new();
                section.insert(
                    Value::from(key.as_str()),
                    Value::Sequence(entries.iter().map(|e| Value::from(e.as_str())).collect()),
                );
                Value::Mapping(section)
            })
            .collect();

        Value::Sequence(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn builder_for(temp: &assert_fs::TempDir) -> NavBuilder {
        let config = Config::builder().root_dir(temp.path()).build().unwrap();
        NavBuilder::new(&config)
    }

    #[test]
    fn test_collect_pages_relative_and_sorted() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("docs/index.md").write_str("x").unwrap();
        temp.child("docs/algebra/intro.md").write_str("x").unwrap();
        temp.child("docs/algebra/sets.md").write_str("x").unwrap();
        temp.child("docs/algebra/notes.pdf").write_str("x").unwrap();

        let pages = builder_for(&temp).collect_pages().unwrap();
        assert_eq!(
            pages,
            vec![
                "algebra/intro.md".to_string(),
                "algebra/sets.md".to_string(),
                "index.md".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_docs_dir_yields_empty() {
        let temp = assert_fs::TempDir::new().unwrap();
        let pages = builder_for(&temp).collect_pages().unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_grouping_home_first() {
        let pages = vec![
            "algebra/intro.md".to_string(),
            "index.md".to_string(),
            "calculus/limits.md".to_string(),
            "algebra/sets.md".to_string(),
        ];

        let groups = NavBuilder::group_pages(&pages);
        assert_eq!(groups[0].0, "Home");
        assert_eq!(groups[0].1, vec!["index.md".to_string()]);
        assert_eq!(groups[1].0, "algebra");
        assert_eq!(
            groups[1].1,
            vec!["algebra/intro.md".to_string(), "algebra/sets.md".to_string()]
        );
        assert_eq!(groups[2].0, "calculus");
    }

    #[test]
    fn test_home_present_even_when_empty() {
        let groups = NavBuilder::group_pages(&["topic/page.md".to_string()]);
        assert_eq!(groups[0].0, "Home");
        assert!(groups[0].1.is_empty());
    }

    #[test]
    fn test_update_rewrites_only_nav() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("mkdocs.yml")
            .write_str("site_name: My Docs\ntheme: material\nnav:\n- old: [gone.md]\n")
            .unwrap();
        temp.child("docs/index.md").write_str("x").unwrap();
        temp.child("docs/algebra/sets.md").write_str("x").unwrap();

        let count = builder_for(&temp).update().unwrap();
        assert_eq!(count, 2);

        let raw = fs::read_to_string(temp.path().join("mkdocs.yml")).unwrap();
        let doc: Value = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(doc["site_name"], Value::from("My Docs"));
        assert_eq!(doc["theme"], Value::from("material"));

        let nav = doc["nav"].as_sequence().unwrap();
        assert_eq!(nav[0]["Home"][0], Value::from("index.md"));
        assert_eq!(nav[1]["algebra"][0], Value::from("algebra/sets.md"));
        assert!(!raw.contains("gone.md"));
    }

    #[test]
    fn test_update_fails_without_mkdocs_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("docs/index.md").write_str("x").unwrap();

        let result = builder_for(&temp).update();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rejects_non_mapping_document() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("mkdocs.yml").write_str("- just\n- a\n- list\n").unwrap();

        let result = builder_for(&temp).update();
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }
}
