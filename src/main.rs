//! Packsmith CLI - dependency-ordered asset packager
//!
//! Usage: packsmith [-v...] <COMMAND>
//!
//! Commands:
//!   build   Build every configured package
//!   list    Show the packages and the files they hold

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packsmith::config::{Config, DEFAULT_CONFIG_FILE};
use packsmith::{from_config, BuildSummary, LocalFs, Packaging, TracingLogger};

/// Packsmith - dependency-ordered asset packager
#[derive(Parser, Debug)]
#[command(name = "packsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every configured package
    Build {
        /// Configuration file (defaults to ./packsmith.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write packages to this directory instead of the configured one
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Stop at the first reported error
        #[arg(long)]
        fail_fast: bool,
    },

    /// Show the packages and the files they hold, without building
    List {
        /// Configuration file (defaults to ./packsmith.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            output_dir,
            fail_fast,
        } => cmd_build(config.as_deref(), output_dir, fail_fast),
        Commands::List { config } => cmd_list(config.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("PACKSMITH_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config file (if any), print its warnings and apply env overrides
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                tracing::info!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default().with_env_overrides());
            }
            default
        }
    };

    let (config, warnings) = Config::load_with_warnings(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let config = match path.parent() {
        Some(base) if !base.as_os_str().is_empty() => config.rebase(base),
        _ => config,
    };
    Ok(config.with_env_overrides())
}

fn new_packaging(config: &Config) -> Result<Packaging> {
    let mut packaging = Packaging::new(Rc::new(LocalFs::new()), Rc::new(TracingLogger));
    from_config(&mut packaging, config)?;
    Ok(packaging)
}

fn cmd_build(
    config_path: Option<&Path>,
    output_dir: Option<PathBuf>,
    fail_fast: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = output_dir {
        config.output_directory = dir;
    }
    if fail_fast {
        config.fail_fast = true;
    }

    let mut packaging = new_packaging(&config)?;
    packaging.build()?;

    let summary = BuildSummary::of(&packaging);
    if !summary.is_success() {
        eprintln!("There were {} error(s) while packaging.", summary.errors);
        std::process::exit(1);
    }

    println!(
        "✓ Built {} package(s) in {}",
        summary.packages,
        config.output_directory.display()
    );
    Ok(())
}

fn cmd_list(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let packaging = new_packaging(&config)?;

    for output in packaging.output_ids() {
        let output_file = packaging.output(output);
        println!("{}", output_file.logical_path());
        for &source in output_file.source_files() {
            println!("  {}", packaging.source(source).logical_path());
        }
    }
    Ok(())
}
