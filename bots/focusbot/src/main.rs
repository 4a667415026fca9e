// SPDX-License-Identifier: PMPL-1.0-or-later
//! Focusbot CLI - keyboard focusability checks for click handlers
//!
//! Part of the gitbot-fleet ecosystem.

use focusbot::config::{self, Config};
use focusbot::report::{generate_report, OutputFormat};
use focusbot::scanner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Keyboard focusability checks for gitbot-fleet
#[derive(Parser)]
#[command(name = "focusbot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every syntax tree under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Analyze a single syntax-tree file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Generate a SARIF report for a directory
    Report {
        /// Directory to scan
        dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run as a fleet member (machine-readable output)
    Fleet {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Where to write it (defaults to .focusbot/config.yml)
        path: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("focusbot=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("focusbot={}", config.log.level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration for `command`. `init` never reads the file it is about to replace.
fn load_for(command: &Commands, path: &Path) -> focusbot::Result<Config> {
    match command {
        Commands::Init { .. } => Ok(Config::default()),
        _ => config::load_config(path),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = load_for(&cli.command, &config_path)?;
    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Check { dir, format, output } => {
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, format.into());
            write_output(&report, output.as_deref())?;

            if findings.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, format } => {
            let findings = scanner::scan_file(&file, &config)?;
            let report = generate_report(&findings, format.into());
            println!("{}", report);

            if findings.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Report { dir, output } => {
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, OutputFormat::Sarif);
            write_output(&report, output.as_deref())?;
        }

        Commands::Fleet { dir } => {
            let findings = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&findings, OutputFormat::Json);
            println!("{}", report);

            if findings.blocks_release() {
                std::process::exit(1);
            }
        }

        Commands::Init { path } => {
            let path = path.unwrap_or(config_path);
            config::write_default_config(&path)?;
            eprintln!("Configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
