use anyhow::Context;
use clap::{Parser, Subcommand};
use mkpilot::{Config, IgnorePatternSet, NavBuilder, Pipeline, TreeRenderer};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "mkpilot",
    version,
    about = "Automate a MkDocs documentation site",
    long_about = "Automate a MkDocs documentation site kept in a git working tree.\n\n\
    Detects changed PDF files, summarizes them through an LLM into Markdown \
    wrapper pages, regenerates the mkdocs.yml navigation, renders a folder-tree \
    document, and deploys the static site.\n\n\
    USAGE EXAMPLES:\n  \
      # Full pipeline on the current repository\n  \
      mkpilot run\n\n  \
      # See what would happen without writing anything\n  \
      mkpilot run --dry-run\n\n  \
      # Only re-render the folder tree\n  \
      mkpilot tree --out STRUCTURE.md"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Repository root directory
    #[arg(short, long, default_value = ".", global = true, value_name = "PATH")]
    dir: PathBuf,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: summarize, regenerate, render, deploy
    Run {
        /// LLM model to use for summarization
        #[arg(long, default_value = "gemini-pro")]
        model: String,

        /// Environment variable holding the API key
        #[arg(long, default_value = "GEMINI_API_KEY", value_name = "VAR")]
        api_key_env: String,

        /// Seconds to wait between LLM requests
        #[arg(long, default_value_t = 60)]
        delay: u64,

        /// Skip the deployment stage
        #[arg(long)]
        no_deploy: bool,

        /// Dry run (no writes, no API calls, no deploy)
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the folder tree into a Markdown document
    Tree {
        /// Output file, relative to the root
        #[arg(short, long, default_value = "README.md")]
        out: PathBuf,

        /// Ignore-pattern file name looked up at the root
        #[arg(long, default_value = ".gitignore")]
        ignore_file: String,
    },
    /// Regenerate the mkdocs.yml navigation from the docs tree
    Nav {
        /// Docs directory, relative to the root
        #[arg(long, default_value = "docs")]
        docs: PathBuf,
    },
    /// Deploy the site with mkdocs gh-deploy
    Deploy,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Command::Run {
            model,
            api_key_env,
            delay,
            no_deploy,
            dry_run,
        } => {
            let config = Config::builder()
                .root_dir(cli.dir)
                .model(model)
                .api_key_env(api_key_env)
                .request_delay(Duration::from_secs(delay))
                .deploy(!no_deploy)
                .dry_run(dry_run)
                .build()
                .context("Failed to build configuration")?;

            let stats = Pipeline::new(config)
                .context("Failed to create pipeline")?
                .run()
                .context("Pipeline execution failed")?;

            stats.print_summary();
        }
        Command::Tree { out, ignore_file } => {
            let config = Config::builder()
                .root_dir(cli.dir)
                .tree_output(out)
                .ignore_file(ignore_file)
                .build()
                .context("Failed to build configuration")?;

            let patterns = IgnorePatternSet::load(&config.root_dir, &config.ignore_file)
                .context("Failed to load ignore patterns")?;
            let tree = TreeRenderer::new(&patterns, config.max_depth)
                .render(&config.root_dir)
                .context("Failed to render tree")?;
            mkpilot::write_tree_document(&tree, &config.tree_output_path())
                .context("Failed to write tree document")?;

            println!("Wrote {}", config.tree_output_path().display());
        }
        Command::Nav { docs } => {
            let config = Config::builder()
                .root_dir(cli.dir)
                .docs_dir(docs)
                .build()
                .context("Failed to build configuration")?;

            let pages = NavBuilder::new(&config)
                .update()
                .context("Failed to update navigation")?;

            println!("Updated nav with {pages} pages");
        }
        Command::Deploy => {
            let config = Config::builder()
                .root_dir(cli.dir)
                .build()
                .context("Failed to build configuration")?;

            mkpilot::deploy_site(&config.mkdocs_path()).context("Deployment failed")?;
        }
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("mkpilot=info"),
        1 => EnvFilter::new("mkpilot=debug"),
        _ => EnvFilter::new("mkpilot=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
