//! `rollcall` - CLI for the attendance register
//!
//! Each subcommand plays the part of one button on the attendance form.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use chrono::Local;
use clap::Parser;

use rollcall::cli::{Cli, Command, ConfigCommand, MarkCommand, SummaryCommand, ViewCommand};
use rollcall::{init_logging, summarize, Config, Storage};

/// Shown when the register has not been written yet.
const NO_RECORDS: &str = "No attendance records found yet.";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Mark(cmd) => handle_mark(&config, &cmd),
        Command::View(cmd) => handle_view(&config, &cmd),
        Command::Summary(cmd) => handle_summary(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_mark(config: &Config, cmd: &MarkCommand) -> anyhow::Result<()> {
    let storage = Storage::new(cmd.register.resolve(config));
    let date = cmd.date.unwrap_or_else(|| Local::now().date_naive());

    storage.mark(&cmd.request(), date)?;
    println!("Attendance marked successfully!");
    Ok(())
}

fn handle_view(config: &Config, cmd: &ViewCommand) -> anyhow::Result<()> {
    let storage = Storage::new(cmd.register.resolve(config));

    match storage.read_raw()? {
        Some(text) => print!("{text}"),
        None => println!("{NO_RECORDS}"),
    }
    Ok(())
}

fn handle_summary(config: &Config, cmd: &SummaryCommand) -> anyhow::Result<()> {
    let storage = Storage::new(cmd.register.resolve(config));

    let Some(summary) = summarize(&storage.read_all()) else {
        println!("{NO_RECORDS}");
        return Ok(());
    };

    if cmd.json {
        println!("{}", summary.to_json()?);
    } else {
        print!("{summary}");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!(
                    "  Attendance file:    {}",
                    config.attendance_file().display()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
