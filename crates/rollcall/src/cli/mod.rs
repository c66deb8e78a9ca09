//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure for the `rollcall` binary. Each
//! subcommand stands in for one button of the attendance form.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, FileArg, MarkCommand, SummaryCommand, ViewCommand};

use crate::config::Config;
use crate::logging::Verbosity;

/// rollcall - Keep a simple student attendance register
///
/// Marks students present or absent for the day in a plain text file and
/// shows the register or a per-roll summary.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record today's attendance for a student
    Mark(MarkCommand),

    /// Print the register as stored
    View(ViewCommand),

    /// Show present/absent totals per roll number
    Summary(SummaryCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

impl FileArg {
    /// The register path: the flag if given, otherwise the configured one.
    #[must_use]
    pub fn resolve(&self, config: &Config) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| config.attendance_file())
    }
}
