use crate::{
    config::Config,
    error::Result,
    git::WorkingTree,
    ignore::IgnorePatternSet,
    markdown,
    nav::NavBuilder,
    pdf,
    summarize::{GeminiClient, Summarizer},
    tree::TreeRenderer,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Files reported changed by git
    pub changed_files: usize,

    /// Changed files that were PDFs
    pub pdf_files: usize,

    /// Wrapper pages written
    pub pages_written: usize,

    /// PDFs that failed to summarize
    pub summarize_failures: usize,

    /// Pages placed into the navigation
    pub nav_pages: usize,

    /// Lines in the rendered tree
    pub tree_lines: usize,

    /// Whether the site was deployed
    pub deployed: bool,

    /// Total execution time
    pub duration: Duration,

    /// Time spent summarizing
    pub summarize_duration: Duration,

    /// Generation timestamp
    pub generated_at: String,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════╗");
        println!("║         Pipeline Execution Summary       ║");
        println!("╠══════════════════════════════════════════╣");
        println!("║ Changed files:       {:>8}            ║", self.changed_files);
        println!("║ PDF files:           {:>8}            ║", self.pdf_files);
        println!("║ Pages written:       {:>8}            ║", self.pages_written);
        println!("║ Summarize failures:  {:>8}            ║", self.summarize_failures);
        println!("║ Nav pages:           {:>8}            ║", self.nav_pages);
        println!("║ Tree lines:          {:>8}            ║", self.tree_lines);
        println!(
            "║ Deployed:            {:>8}            ║",
            if self.deployed { "yes" } else { "no" }
        );
        println!(
            "║ Total time:          {:>7.2}s            ║",
            self.duration.as_secs_f64()
        );
        println!("╚══════════════════════════════════════════╝\n");
    }
}

/// Main orchestrator: git scan, PDF summarization, nav regeneration,
/// tree rendering, deployment.
pub struct Pipeline {
    config: Config,
    summarizer: Option<Box<dyn Summarizer>>,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    ///
    /// Builds a Gemini client unless dry-run mode is enabled, so a dry run
    /// never needs an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the API key is unavailable.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let summarizer: Option<Box<dyn Summarizer>> = if config.dry_run {
            None
        } else {
            Some(Box::new(GeminiClient::from_config(&config)?))
        };

        Ok(Self { config, summarizer })
    }

    /// Creates a pipeline with an explicit summarizer implementation.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn with_summarizer(config: Config, summarizer: Box<dyn Summarizer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            summarizer: Some(summarizer),
        })
    }

    /// Executes the complete pipeline and returns statistics.
    ///
    /// Stages: detect changed files, summarize each changed PDF into a
    /// wrapper page, regenerate the navigation, render the folder tree,
    /// deploy. Per-PDF summarization failures are logged and counted; any
    /// other stage failure terminates the run.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage fails.
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        info!("Starting pipeline execution");

        // Stage 1: changed-file detection
        info!("Stage 1/4: Detecting changed files...");
        let working_tree = WorkingTree::open(&self.config.root_dir)?;
        let changed = working_tree.changed_files()?;
        let pdfs: Vec<PathBuf> = changed
            .iter()
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
            })
            .cloned()
            .collect();
        info!("✓ {} changed files, {} PDFs", changed.len(), pdfs.len());

        // Stage 2: summarization
        info!("Stage 2/4: Summarizing changed PDFs...");
        let summarize_start = Instant::now();
        let (pages_written, summarize_failures) = self.summarize_pdfs(&pdfs)?;
        let summarize_duration = summarize_start.elapsed();
        info!(
            "✓ Wrote {} pages ({} failures) in {:.2}s",
            pages_written,
            summarize_failures,
            summarize_duration.as_secs_f64()
        );

        // Stage 3: navigation + tree
        info!("Stage 3/4: Regenerating navigation and folder tree...");
        let nav_pages = if self.config.dry_run {
            NavBuilder::new(&self.config).collect_pages()?.len()
        } else if summarize_failures == 0 {
            NavBuilder::new(&self.config).update()?
        } else {
            // Incomplete summaries would leave dangling nav entries
            warn!("Skipping nav update because {summarize_failures} PDFs failed");
            0
        };

        let tree_lines = self.render_tree()?;
        info!("✓ {} nav pages, {} tree lines", nav_pages, tree_lines);

        // Stage 4: deployment
        let deployed = if self.config.deploy && !self.config.dry_run {
            info!("Stage 4/4: Deploying site...");
            crate::deploy::deploy_site(&self.config.mkdocs_path())?;
            true
        } else {
            info!("Stage 4/4: Deployment skipped");
            false
        };

        let stats = PipelineStats {
            changed_files: changed.len(),
            pdf_files: pdfs.len(),
            pages_written,
            summarize_failures,
            nav_pages,
            tree_lines,
            deployed,
            duration: start_time.elapsed(),
            summarize_duration,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        info!(
            "✓ Pipeline completed in {:.2}s",
            stats.duration.as_secs_f64()
        );
        Ok(stats)
    }

    /// Summarizes each PDF and writes its wrapper page. Failures are
    /// logged per file so one broken PDF does not abort the batch.
    fn summarize_pdfs(&self, pdfs: &[PathBuf]) -> Result<(usize, usize)> {
        let mut written = 0;
        let mut failures = 0;

        for (i, relative) in pdfs.iter().enumerate() {
            let pdf_path = self.config.root_dir.join(relative);

            if self.config.dry_run {
                info!("[dry run] Would summarize {}", pdf_path.display());
                continue;
            }

            let Some(summarizer) = self.summarizer.as_deref() else {
                continue;
            };

            // Rate limit between consecutive API requests
            if i > 0 {
                std::thread::sleep(self.config.request_delay);
            }

            match Self::summarize_one(summarizer, &pdf_path) {
                Ok(page) => {
                    info!("Wrote {}", page.display());
                    written += 1;
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", pdf_path.display(), e);
                    failures += 1;
                }
            }
        }

        Ok((written, failures))
    }

    fn summarize_one(summarizer: &dyn Summarizer, pdf_path: &std::path::Path) -> Result<PathBuf> {
        let text = pdf::extract_text(pdf_path)?;
        let summary = summarizer.summarize(&text)?;
        markdown::write_summary_page(pdf_path, &summary)
    }

    /// Renders the folder tree into the configured output document.
    /// Returns the number of lines rendered.
    fn render_tree(&self) -> Result<usize> {
        let patterns =
            IgnorePatternSet::load(&self.config.root_dir, &self.config.ignore_file)?;
        let renderer = TreeRenderer::new(&patterns, self.config.max_depth);
        let tree = renderer.render(&self.config.root_dir)?;
        let lines = tree.lines().count();

        if self.config.dry_run {
            info!("[dry run] Would write tree document");
        } else {
            markdown::write_tree_document(&tree, &self.config.tree_output_path())?;
        }

        Ok(lines)
    }
}
