//! DevFlow - scaffolding and bookkeeping for a seven-step development workflow.
//!
//! Running `devflow` without a subcommand scaffolds the current directory.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devflow::core::{file_stamp, Config, WorkspacePaths};
use devflow::init::{resolve_template_source, TEMPLATE_DIR_ENV};

/// Scaffold and track a seven-step development workflow
#[derive(Parser)]
#[command(name = "devflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run (defaults to setup)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Setup options when no subcommand is given
    #[command(flatten)]
    setup: SetupArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by the default command and `setup`.
#[derive(Args, Debug, Clone)]
struct SetupArgs {
    /// Directory to set up
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Overwrite existing files without prompting
    #[arg(short, long)]
    force: bool,

    /// Answer yes to prompts
    #[arg(short = 'y', long)]
    yes: bool,

    /// Only preview the files that would be written
    #[arg(long)]
    dry_run: bool,

    /// List the template files and exit
    #[arg(long)]
    list: bool,

    /// Template directory to copy from
    #[arg(long, env = TEMPLATE_DIR_ENV)]
    template_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the DevFlow template into a project (default)
    #[command(visible_aliases = ["init", "create", "install"])]
    Setup(SetupArgs),

    /// Match a description of your goal to a workflow scenario
    Wizard {
        /// Where to write the preset record
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Description of what you want to do
        intent: Vec<String>,
    },

    /// Summarize progress, missing steps and recommended checks
    Review {
        /// Where to write the Markdown report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Workspace to review
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Print the report as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Archive step artifacts and reset the session
    Cleanup {
        /// Delete step artifacts instead of archiving them
        #[arg(long)]
        purge: bool,

        /// Show what would be done without doing it
        #[arg(long)]
        dry_run: bool,

        /// Workspace to clean
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Run typecheck, build and lint for every detected toolchain
    BuildCheck {
        /// Also write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Project directory
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Store the result as the session's last build status
        #[arg(long)]
        record: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    // Handle commands
    match cli.command {
        None => {
            cmd_setup(cli.setup)?;
        }
        Some(Commands::Setup(args)) => {
            cmd_setup(args)?;
        }
        Some(Commands::Wizard { output, intent }) => {
            cmd_wizard(output, &intent)?;
        }
        Some(Commands::Review { output, cwd, json }) => {
            cmd_review(output, cwd, json)?;
        }
        Some(Commands::Cleanup { purge, dry_run, cwd }) => {
            cmd_cleanup(purge, dry_run, cwd)?;
        }
        Some(Commands::BuildCheck { output, cwd, record }) => {
            if !cmd_build_check(output, cwd, record)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
        }
        Some(Commands::Config { path }) => {
            cmd_config(path)?;
        }
    }

    Ok(())
}

/// Run a future to completion on a fresh runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    Ok(rt.block_on(future))
}

/// `--cwd` if given, otherwise the current directory.
fn workspace_root(cwd: Option<PathBuf>) -> Result<PathBuf> {
    match cwd {
        Some(path) => Ok(path),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

/// Set up a DevFlow project.
fn cmd_setup(args: SetupArgs) -> Result<()> {
    use devflow::init::{setup_project, SetupOptions};

    let config = Config::load(&args.path)?;
    let template = resolve_template_source(args.template_dir.as_deref(), &config).prepare()?;
    tracing::debug!(template = %template.path().display(), "Resolved template");

    let options = SetupOptions {
        force: args.force,
        yes: args.yes,
        dry_run: args.dry_run,
        list: args.list,
        ignore_dirs: config.template.ignore_dirs,
        ..SetupOptions::new(template.path())
    };

    block_on(setup_project(&args.path, &options))??;
    Ok(())
}

/// Classify an intent and write the preset record.
fn cmd_wizard(output: Option<PathBuf>, words: &[String]) -> Result<()> {
    use devflow::workflow::{read_intent, run_wizard};

    let intent = read_intent(words)?;
    let output = match output {
        Some(path) => path,
        None => WorkspacePaths::new(workspace_root(None)?).preset_file(),
    };

    block_on(run_wizard(&intent, &output))??;
    Ok(())
}

/// Aggregate and render a review report.
fn cmd_review(output: Option<PathBuf>, cwd: Option<PathBuf>, json: bool) -> Result<()> {
    use devflow::review::{render_markdown, review_workspace, write_report};

    let root = workspace_root(cwd)?;
    let config = Config::load(&root)?;
    let paths = WorkspacePaths::new(&root);

    block_on(async {
        let report = review_workspace(&root, &config).await;
        let markdown = render_markdown(&report, &paths);
        let target =
            output.unwrap_or_else(|| paths.review_report(&file_stamp(&report.generated_at)));
        let written = write_report(&target, &markdown).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            eprintln!("Report written to {}", paths.display_relative(&written));
        } else {
            println!("{markdown}");
            println!("Report written to {}", paths.display_relative(&written));
        }

        Ok::<_, anyhow::Error>(())
    })?
}

/// Archive or purge step artifacts and reset the session.
fn cmd_cleanup(purge: bool, dry_run: bool, cwd: Option<PathBuf>) -> Result<()> {
    use devflow::workflow::{cleanup_project, CleanupOptions};

    let root = workspace_root(cwd)?;
    let options = CleanupOptions { purge, dry_run };

    let summary = block_on(cleanup_project(&root, &options))??;
    tracing::debug!(
        archived = summary.archived.len(),
        purged = summary.purged.len(),
        queue = summary.queue_removed.len(),
        "Cleanup finished"
    );
    Ok(())
}

/// Run the build check. Returns whether it passed.
fn cmd_build_check(output: Option<PathBuf>, cwd: Option<PathBuf>, record: bool) -> Result<bool> {
    use devflow::build::{record_build_status, run_build_check};

    let root = workspace_root(cwd)?;

    block_on(async {
        let report = run_build_check(&root).await;
        let json = serde_json::to_string_pretty(&report)?;

        if let Some(path) = &output {
            write_output(path, &json).await?;
        }
        println!("{json}");

        if record {
            record_build_status(&root, &report).await?;
        }

        Ok::<_, anyhow::Error>(report.is_ok())
    })?
}

async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "devflow", &mut io::stdout());
}

/// Show configuration.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load(&workspace_root(None)?)?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}
