use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DOCS_DIR: &str = "docs";
const DEFAULT_MKDOCS_FILE: &str = "mkdocs.yml";
const DEFAULT_TREE_OUTPUT: &str = "README.md";
const DEFAULT_IGNORE_FILE: &str = ".gitignore";
const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_PROMPT: &str = "summarize the following text";
const DEFAULT_REQUEST_DELAY_SECS: u64 = 60;
const DEFAULT_MAX_DEPTH: usize = 1000;

/// Configuration for the mkpilot pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Repository root (the git working tree being documented)
    pub root_dir: PathBuf,

    /// Documentation directory scanned for Markdown pages, relative to the root
    pub docs_dir: PathBuf,

    /// MkDocs configuration file, relative to the root
    pub mkdocs_file: PathBuf,

    /// Output file for the rendered folder tree, relative to the root
    pub tree_output: PathBuf,

    /// Name of the ignore-pattern file looked up at the root
    pub ignore_file: String,

    /// LLM model identifier for summarization
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Prompt preamble prepended to extracted PDF text
    pub prompt: String,

    /// Delay between consecutive LLM requests
    pub request_delay: Duration,

    /// Maximum directory recursion depth for the tree renderer
    pub max_depth: usize,

    /// Dry run mode (no file writes, no API calls, no deploy)
    pub dry_run: bool,

    /// Whether to deploy the site after a successful update
    pub deploy: bool,
}

impl Config {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Root directory doesn't exist or is not a directory
    /// - Depth cap is zero
    /// - Model name is empty
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.exists() {
            return Err(Error::config(format!(
                "Root directory does not exist: {}",
                self.root_dir.display()
            )));
        }

        if !self.root_dir.is_dir() {
            return Err(Error::config(format!(
                "Root path is not a directory: {}",
                self.root_dir.display()
            )));
        }

        if self.max_depth == 0 {
            return Err(Error::config("max_depth must be greater than 0"));
        }

        if self.model.is_empty() {
            return Err(Error::config("model name must not be empty"));
        }

        if self.ignore_file.is_empty() {
            return Err(Error::config("ignore file name must not be empty"));
        }

        Ok(())
    }

    /// Absolute path to the docs directory.
    #[must_use]
    pub fn docs_path(&self) -> PathBuf {
        self.root_dir.join(&self.docs_dir)
    }

    /// Absolute path to the MkDocs configuration file.
    #[must_use]
    pub fn mkdocs_path(&self) -> PathBuf {
        self.root_dir.join(&self.mkdocs_file)
    }

    /// Absolute path to the rendered tree document.
    #[must_use]
    pub fn tree_output_path(&self) -> PathBuf {
        self.root_dir.join(&self.tree_output)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            mkdocs_file: PathBuf::from(DEFAULT_MKDOCS_FILE),
            tree_output: PathBuf::from(DEFAULT_TREE_OUTPUT),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            request_delay: Duration::from_secs(DEFAULT_REQUEST_DELAY_SECS),
            max_depth: DEFAULT_MAX_DEPTH,
            dry_run: false,
            deploy: true,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    docs_dir: Option<PathBuf>,
    mkdocs_file: Option<PathBuf>,
    tree_output: Option<PathBuf>,
    ignore_file: Option<String>,
    model: Option<String>,
    api_key_env: Option<String>,
    prompt: Option<String>,
    request_delay: Option<Duration>,
    max_depth: Option<usize>,
    dry_run: bool,
    deploy: Option<bool>,
}

impl ConfigBuilder {
    /// Sets the repository root directory.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the documentation directory (relative to the root).
    #[must_use]
    pub fn docs_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(path.into());
        self
    }

    /// Sets the MkDocs configuration file (relative to the root).
    #[must_use]
    pub fn mkdocs_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mkdocs_file = Some(path.into());
        self
    }

    /// Sets the output file for the rendered tree (relative to the root).
    #[must_use]
    pub fn tree_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.tree_output = Some(path.into());
        self
    }

    /// Sets the ignore-pattern file name looked up at the root.
    #[must_use]
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = Some(name.into());
        self
    }

    /// Sets the LLM model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the environment variable the API key is read from.
    #[must_use]
    pub fn api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    /// Sets the summarization prompt preamble.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Sets the delay between consecutive LLM requests.
    #[must_use]
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = Some(delay);
        self
    }

    /// Sets the maximum recursion depth for the tree renderer.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enables dry run mode (no writes, no API calls, no deploy).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables or disables site deployment.
    #[must_use]
    pub fn deploy(mut self, enabled: bool) -> Self {
        self.deploy = Some(enabled);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let config = Config {
            root_dir: self.root_dir.unwrap_or(defaults.root_dir),
            docs_dir: self.docs_dir.unwrap_or(defaults.docs_dir),
            mkdocs_file: self.mkdocs_file.unwrap_or(defaults.mkdocs_file),
            tree_output: self.tree_output.unwrap_or(defaults.tree_output),
            ignore_file: self.ignore_file.unwrap_or(defaults.ignore_file),
            model: self.model.unwrap_or(defaults.model),
            api_key_env: self.api_key_env.unwrap_or(defaults.api_key_env),
            prompt: self.prompt.unwrap_or(defaults.prompt),
            request_delay: self.request_delay.unwrap_or(defaults.request_delay),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            dry_run: self.dry_run,
            deploy: self.deploy.unwrap_or(defaults.deploy),
        };

        config.validate()?;
        Ok(config)
    }
}
