//! Core attendance types for rollcall.
//!
//! This module defines the attendance record written to the register and the
//! request object the front end fills in before a record is created.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Whether the student attended on the recorded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// The student was present.
    Present,
    /// The student was absent.
    Absent,
}

impl AttendanceStatus {
    /// Map the front end's present checkbox to a status.
    #[must_use]
    pub fn from_present_flag(present: bool) -> Self {
        if present {
            Self::Present
        } else {
            Self::Absent
        }
    }

    /// The literal written to the register.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    /// Check whether a stored status text means present.
    ///
    /// Comparison ignores ASCII case; anything other than `present` counts
    /// as absent.
    #[must_use]
    pub fn is_present_text(text: &str) -> bool {
        text.eq_ignore_ascii_case(Self::Present.as_str())
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status text is neither `Present` nor `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl std::fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown attendance status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("present") {
            Ok(Self::Present)
        } else if s.eq_ignore_ascii_case("absent") {
            Ok(Self::Absent)
        } else {
            Err(UnknownStatus(s.to_string()))
        }
    }
}

/// Strip leading and trailing control characters and spaces (U+0000 to
/// U+0020). Other Unicode whitespace, such as a no-break space, is kept.
pub(crate) fn trim_input(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// A single attendance entry.
///
/// Name and roll number are trimmed and non-empty. The roll number is an
/// opaque identifier and is never interpreted as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    name: String,
    roll_number: String,
    status: AttendanceStatus,
    date: NaiveDate,
}

impl AttendanceRecord {
    /// Create a validated record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or the roll number is empty
    /// after trimming control characters and spaces. The name is checked first.
    pub fn new(
        name: &str,
        roll_number: &str,
        status: AttendanceStatus,
        date: NaiveDate,
    ) -> Result<Self> {
        let name = trim_input(name);
        let roll_number = trim_input(roll_number);

        if name.is_empty() {
            return Err(Error::validation("student name"));
        }
        if roll_number.is_empty() {
            return Err(Error::validation("roll number"));
        }

        for (field, value) in [("name", name), ("roll number", roll_number)] {
            if value.contains([',', '\n', '\r']) {
                warn!(
                    "{} {:?} contains a delimiter; the stored line will not read back intact",
                    field, value
                );
            }
        }

        Ok(Self {
            name: name.to_string(),
            roll_number: roll_number.to_string(),
            status,
            date,
        })
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The student's roll number.
    #[must_use]
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    /// Present or absent.
    #[must_use]
    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// The calendar date this record covers.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The values collected by the front end for one "mark attendance" action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Student name as typed.
    pub name: String,
    /// Roll number as typed.
    pub roll: String,
    /// Checked means present, unchecked means absent.
    pub present: bool,
}

impl AttendanceRequest {
    /// Create a request.
    #[must_use]
    pub fn new(name: impl Into<String>, roll: impl Into<String>, present: bool) -> Self {
        Self {
            name: name.into(),
            roll: roll.into(),
            present,
        }
    }

    /// Turn the request into a record for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or roll number is blank.
    pub fn into_record(&self, date: NaiveDate) -> Result<AttendanceRecord> {
        AttendanceRecord::new(
            &self.name,
            &self.roll,
            AttendanceStatus::from_present_flag(self.present),
            date,
        )
    }
}
