//! # mkpilot
//!
//! Automation pipeline for a MkDocs documentation site kept in a git
//! working tree.
//!
//! ## Features
//!
//! - Changed-file detection via git (unstaged + untracked)
//! - PDF summarization through the Gemini API, written as Markdown
//!   wrapper pages
//! - `mkdocs.yml` navigation regeneration from the docs tree
//! - Folder-tree rendering with ignore-pattern filtering
//! - Site deployment via `mkdocs gh-deploy`
//!
//! ## Quick Start
//!
//! ```no_run
//! use mkpilot::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .root_dir(".")
//!     .dry_run(true)
//!     .build()?;
//!
//! let stats = Pipeline::new(config)?.run()?;
//! stats.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs four sequential stages:
//! 1. **Git scan**: finds new and modified files in the working tree
//! 2. **Summarize**: extracts text from changed PDFs and writes wrapper
//!    pages through a [`Summarizer`]
//! 3. **Regenerate**: rebuilds the `nav:` section and the folder tree
//! 4. **Deploy**: publishes the static site
//!
//! Everything is synchronous and single-threaded; external systems (git,
//! the LLM API, MkDocs) sit behind thin seams.

#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

mod config;
mod deploy;
mod error;
mod git;
mod ignore;
mod markdown;
mod nav;
mod pdf;
mod pipeline;
mod summarize;
mod tree;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use git::WorkingTree;
pub use ignore::IgnorePatternSet;
pub use markdown::{summary_page, write_summary_page, write_tree_document};
pub use nav::NavBuilder;
pub use pipeline::{Pipeline, PipelineStats};
pub use summarize::{GeminiClient, Summarizer};
pub use tree::TreeRenderer;

pub use deploy::deploy_site;
pub use pdf::extract_text;

/// Runs the complete documentation pipeline with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The root directory is not a git repository
/// - Navigation or tree files cannot be written
/// - Deployment fails
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
