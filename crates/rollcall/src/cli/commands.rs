//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::record::AttendanceRequest;

/// Where the register lives, overriding the configured path.
#[derive(Debug, Clone, Default, Args)]
pub struct FileArg {
    /// Path to the attendance register
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Mark command arguments.
#[derive(Debug, Args)]
pub struct MarkCommand {
    /// Student name
    #[arg(short, long)]
    pub name: String,

    /// Roll number
    #[arg(short, long)]
    pub roll: String,

    /// Mark the student absent instead of present
    #[arg(short, long)]
    pub absent: bool,

    /// Date to record (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Register location override.
    #[command(flatten)]
    pub register: FileArg,
}

impl MarkCommand {
    /// The form values this command carries.
    #[must_use]
    pub fn request(&self) -> AttendanceRequest {
        AttendanceRequest::new(self.name.as_str(), self.roll.as_str(), !self.absent)
    }
}

/// View command arguments.
#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Register location override.
    #[command(flatten)]
    pub register: FileArg,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Register location override.
    #[command(flatten)]
    pub register: FileArg,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
