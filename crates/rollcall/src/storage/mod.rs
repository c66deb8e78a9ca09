//! Storage layer for rollcall.
//!
//! The register is a plain append-only text file. Every operation opens the
//! file, does its work and closes it again; nothing is cached between calls,
//! so each read re-parses the whole file.

pub mod format;

use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{AttendanceRecord, AttendanceRequest};

pub use format::{Lines, RecordLine};

/// Outcome of a strict read of the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// The register file has not been created yet.
    Missing,
    /// The register exists; blank lines have been skipped.
    Records(Vec<RecordLine>),
}

impl Loaded {
    /// The parsed lines, empty when the register is missing.
    #[must_use]
    pub fn into_records(self) -> Vec<RecordLine> {
        match self {
            Self::Missing => Vec::new(),
            Self::Records(records) => records,
        }
    }
}

/// Append-only attendance register stored in a text file.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the register file.
    path: PathBuf,
}

impl Storage {
    /// Create a handle to the register at `path`.
    ///
    /// Nothing is touched on disk until the first append.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the register file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the register file has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Validate a front-end request and append it as a record for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any I/O if the name or roll
    /// number is blank, and otherwise whatever [`Storage::append`] returns.
    pub fn mark(&self, request: &AttendanceRequest, date: NaiveDate) -> Result<AttendanceRecord> {
        let record = request.into_record(date)?;
        self.append(&record)?;
        Ok(record)
    }

    /// Append a record to the register.
    ///
    /// The register is scanned first; if a record with the same roll number
    /// and date exists, nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if the (roll number, date) pair is
    /// already recorded, or an I/O error if the file cannot be written.
    pub fn append(&self, record: &AttendanceRecord) -> Result<()> {
        if self.exists_for_roll_on_date(record.roll_number(), record.date()) {
            debug!(
                "Rejecting duplicate for roll {} on {}",
                record.roll_number(),
                record.date()
            );
            return Err(Error::duplicate(record.roll_number(), record.date()));
        }

        self.ensure_parent_dir()?;

        let line = format::encode_line(record);
        let append_err = |source| Error::Append {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append_err)?;
        file.write_all(line.as_bytes()).map_err(append_err)?;
        file.flush().map_err(append_err)?;

        info!(
            "Marked roll {} {} on {}",
            record.roll_number(),
            record.status(),
            record.date()
        );
        Ok(())
    }

    /// Create the parent directory of the register if needed.
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Read every non-blank line of the register.
    ///
    /// Distinguishes a register that does not exist yet from one that does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<Loaded> {
        let mut records = Vec::new();
        match self.scan(&mut records) {
            Ok(true) => Ok(Loaded::Records(records)),
            Ok(false) => Ok(Loaded::Missing),
            Err(source) => Err(Error::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read every non-blank line of the register, best effort.
    ///
    /// A missing register yields an empty list. A read failure part way
    /// through is logged and the lines read so far are returned.
    #[must_use]
    pub fn read_all(&self) -> Vec<RecordLine> {
        let mut records = Vec::new();
        if let Err(err) = self.scan(&mut records) {
            warn!(
                "Stopped reading {} after {} records: {}",
                self.path.display(),
                records.len(),
                err
            );
        }
        records
    }

    /// Parse the register into `records`.
    ///
    /// Undecodable bytes are replaced rather than ending the scan. Returns
    /// `Ok(false)` if the file does not exist. On error, `records` keeps
    /// everything parsed before the failure.
    fn scan(&self, records: &mut Vec<RecordLine>) -> std::io::Result<bool> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err),
        };

        for line in Lines::new(BufReader::new(file)) {
            if let Some(record) = RecordLine::parse(&line?) {
                records.push(record);
            }
        }

        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(true)
    }

    /// Check whether `roll_number` already has a record on `date`.
    ///
    /// Only lines with a date field can match.
    #[must_use]
    pub fn exists_for_roll_on_date(&self, roll_number: &str, date: NaiveDate) -> bool {
        let date = date.format(format::DATE_FORMAT).to_string();
        self.read_all()
            .iter()
            .any(|record| record.matches(roll_number, &date))
    }

    /// Read the register verbatim for display.
    ///
    /// Every line is kept, blank ones included, and re-terminated with the
    /// platform line ending. Returns `None` if the register does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file exists but cannot be read.
    pub fn read_raw(&self) -> Result<Option<String>> {
        let read_err = |source| Error::Read {
            path: self.path.clone(),
            source,
        };

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(read_err(err)),
        };

        let mut text = String::new();
        for line in Lines::new(BufReader::new(file)) {
            text.push_str(&line.map_err(read_err)?);
            text.push_str(format::LINE_ENDING);
        }
        Ok(Some(text))
    }
}
