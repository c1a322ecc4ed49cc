//! CLI module - argument definitions and the build driver.
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use crate::config::PackagerConfig;
use crate::error::Result;
use crate::logging::BuildLog;
use crate::packager::{BuildOptions, BuildReport, SkillPackager};
use crate::source::{GitCloneSource, RepositorySource};

/// Package the Swift concurrency migration guide into an agent skill bundle
#[derive(Parser, Debug)]
#[command(name = "skill-packager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output directory (default: ./<skill name>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep the temporary clone directory and report its path
    #[arg(long)]
    pub keep_temp: bool,

    /// Extract and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Package an existing local checkout instead of cloning
    #[arg(long, value_name = "PATH")]
    pub source_dir: Option<PathBuf>,

    /// Config file path (default: ~/.config/skill-packager/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON report on stdout, JSON errors, JSON log lines
    #[arg(long, global = true)]
    pub robot: bool,
}

impl Cli {
    pub fn build_options(&self, config: &PackagerConfig) -> Result<BuildOptions> {
        let output_path = match &self.output {
            Some(path) => absolute(path.clone()),
            None => config.default_output_path()?,
        };
        Ok(BuildOptions {
            output_path,
            dry_run: self.dry_run,
        })
    }
}

/// Where the packager reads the guide from.
#[derive(Debug, Clone)]
pub enum Checkout {
    /// Clone into `dest` first.
    Clone {
        source: GitCloneSource,
        dest: PathBuf,
    },
    /// Already on disk.
    Local(PathBuf),
}

impl Checkout {
    pub fn repo_root(&self) -> &Path {
        match self {
            Self::Clone { dest, .. } => dest,
            Self::Local(path) => path,
        }
    }

    /// Stop a clone that is still running. Local checkouts have nothing to stop.
    pub fn cancel(&self) {
        if let Self::Clone { source, .. } = self {
            source.cancel();
        }
    }
}

/// Fetch the checkout if needed, then package it.
pub fn execute(
    config: &PackagerConfig,
    options: BuildOptions,
    checkout: &Checkout,
    log: &dyn BuildLog,
) -> Result<BuildReport> {
    match checkout {
        Checkout::Clone { source, dest } => {
            tracing::debug!(source = %source.describe(), dest = %dest.display(), "fetching");
            source.fetch(dest, log)?;
        }
        Checkout::Local(path) => {
            log.info(&format!("Using local checkout at {}", path.display()));
        }
    }
    SkillPackager::new(config, options, log).build(checkout.repo_root())
}

/// Human-readable summary on stdout.
pub fn print_report(report: &BuildReport) {
    if report.dry_run {
        println!("\n{} Dry run complete, nothing written.", "Info:".cyan());
    } else {
        println!("\n{} Skill packaged!", "Success:".green());
    }
    println!("  Skill: {}", report.skill_name.bold());
    println!("  Output: {}", report.output_path.display());
    if let Some(archive) = &report.archive_path {
        println!("  Archive: {}", archive.display());
    }
    println!("  Documents: {}", report.document_count);
    println!("  Examples: {}", report.example_count);
    println!("  License: {}", report.license_file);
    if let Some(dir) = &report.retained_temp_dir {
        println!("  Temp directory: {}", dir.display());
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
