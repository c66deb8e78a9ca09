//! `rollcall` - A student attendance register
//!
//! Attendance is appended, one line per student per day, to a plain text
//! file. The register can be read back verbatim or aggregated into per-roll
//! present/absent totals.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;
pub mod summary;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{AttendanceRecord, AttendanceRequest, AttendanceStatus};
pub use storage::{Loaded, RecordLine, Storage};
pub use summary::{summarize, RollSummary, Summary};
