//! Line format of the attendance register.
//!
//! One record per line, fields joined by commas in the order
//! `name,rollNumber,status,date`. There is no quoting, so a comma inside a
//! field splits it on read.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{trim_input, AttendanceRecord, AttendanceStatus};

/// Field delimiter.
pub const DELIMITER: char = ',';

/// Line terminator used when writing.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line terminator used when writing.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// `date` fields are written in ISO-8601 calendar form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAME: usize = 0;
const ROLL_NUMBER: usize = 1;
const STATUS: usize = 2;
const DATE: usize = 3;

/// Serialize a record as a register line, including the line terminator.
#[must_use]
pub fn encode_line(record: &AttendanceRecord) -> String {
    format!(
        "{name}{d}{roll}{d}{status}{d}{date}{LINE_ENDING}",
        name = record.name(),
        roll = record.roll_number(),
        status = record.status(),
        date = record.date().format(DATE_FORMAT),
        d = DELIMITER,
    )
}

/// Iterator over the lines of a register.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid UTF-8
/// are replaced with U+FFFD instead of ending the read, so only real I/O
/// failures surface as errors.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
    pending: VecDeque<String>,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    /// Read lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            buf: Vec::new(),
        }
    }

    /// Pull the next `\n`-terminated chunk and split it on `\r`.
    ///
    /// Returns `Ok(false)` at end of input.
    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        let mut chunk = self.buf.as_slice();
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest;
        }
        if let Some(rest) = chunk.strip_suffix(b"\r") {
            chunk = rest;
        }

        self.pending.extend(
            chunk
                .split(|&b| b == b'\r')
                .map(|line| String::from_utf8_lossy(line).into_owned()),
        );
        Ok(true)
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// A parsed, possibly incomplete, register line.
///
/// Lines are kept as the fields they split into so that short or malformed
/// lines still reach consumers, which decide which fields they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordLine {
    fields: Vec<String>,
}

impl RecordLine {
    /// Parse one line of the register.
    ///
    /// Returns `None` for blank lines. Trailing empty fields are dropped, so
    /// `a,b,,` yields two fields.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        if trim_input(line).is_empty() {
            return None;
        }

        let mut fields: Vec<String> = line.split(DELIMITER).map(str::to_string).collect();
        while fields.last().is_some_and(String::is_empty) {
            fields.pop();
        }

        Some(Self { fields })
    }

    /// All fields in order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields on the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the line produced no fields at all (e.g. a line of commas).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// The name field, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field(NAME)
    }

    /// The roll number field, if present.
    #[must_use]
    pub fn roll_number(&self) -> Option<&str> {
        self.field(ROLL_NUMBER)
    }

    /// The raw status text, if present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.field(STATUS)
    }

    /// The raw date text, if present.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.field(DATE)
    }

    /// Whether this line records `roll_number` on `date`.
    ///
    /// Lines without a date field never match.
    #[must_use]
    pub fn matches(&self, roll_number: &str, date: &str) -> bool {
        self.len() > DATE && self.roll_number() == Some(roll_number) && self.date() == Some(date)
    }

    /// Convert back into a typed record.
    ///
    /// Returns `None` unless all four fields are present and valid.
    #[must_use]
    pub fn to_record(&self) -> Option<AttendanceRecord> {
        let status: AttendanceStatus = self.status()?.parse().ok()?;
        let date = NaiveDate::parse_from_str(self.date()?, DATE_FORMAT).ok()?;
        AttendanceRecord::new(self.name()?, self.roll_number()?, status, date).ok()
    }
}

impl From<&AttendanceRecord> for RecordLine {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            fields: vec![
                record.name().to_string(),
                record.roll_number().to_string(),
                record.status().to_string(),
                record.date().format(DATE_FORMAT).to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, roll: &str, status: AttendanceStatus, date: &str) -> AttendanceRecord {
        AttendanceRecord::new(name, roll, status, date.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_encode_line() {
        let line = encode_line(&record("Alice", "1", AttendanceStatus::Present, "2024-01-01"));
        assert_eq!(line, format!("Alice,1,Present,2024-01-01{LINE_ENDING}"));
    }

    #[test]
    fn test_encode_absent() {
        let line = encode_line(&record("Bob", "2", AttendanceStatus::Absent, "2024-12-31"));
        assert!(line.starts_with("Bob,2,Absent,2024-12-31"));
    }

    #[test]
    fn test_parse_blank_lines() {
        assert!(RecordLine::parse("").is_none());
        assert!(RecordLine::parse("   ").is_none());
        assert!(RecordLine::parse("\t").is_none());
    }

    #[test]
    fn test_parse_full_line() {
        let line = RecordLine::parse("Alice,1,Present,2024-01-01").unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(line.name(), Some("Alice"));
        assert_eq!(line.roll_number(), Some("1"));
        assert_eq!(line.status(), Some("Present"));
        assert_eq!(line.date(), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_short_line() {
        let line = RecordLine::parse("Carol,3,Present").unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line.date(), None);
        assert!(line.to_record().is_none());
    }

    #[test]
    fn test_parse_drops_trailing_empty_fields() {
        let line = RecordLine::parse("Dan,4,,").unwrap();
        assert_eq!(line.fields(), ["Dan", "4"]);

        let line = RecordLine::parse(",,,").unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_parse_keeps_inner_empty_fields() {
        let line = RecordLine::parse("Dan,,Absent,2024-01-01").unwrap();
        assert_eq!(line.roll_number(), Some(""));
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn test_embedded_comma_splits_name() {
        let line = RecordLine::parse("Doe, Jane,5,Present,2024-01-01").unwrap();
        assert_eq!(line.len(), 5);
        assert_eq!(line.roll_number(), Some(" Jane"));
    }

    #[test]
    fn test_matches_requires_date() {
        let full = RecordLine::parse("Alice,1,Present,2024-01-01").unwrap();
        assert!(full.matches("1", "2024-01-01"));
        assert!(!full.matches("1", "2024-01-02"));
        assert!(!full.matches("2", "2024-01-01"));

        let short = RecordLine::parse("Alice,1,Present").unwrap();
        assert!(!short.matches("1", "2024-01-01"));
    }

    #[test]
    fn test_to_record_from_encoded() {
        let original = record("Alice", "1", AttendanceStatus::Present, "2024-01-01");
        let encoded = encode_line(&original);
        let line = RecordLine::parse(encoded.trim_end()).unwrap();
        assert_eq!(line.to_record(), Some(original.clone()));
        assert_eq!(RecordLine::from(&original), line);
    }

    fn read_lines(bytes: &[u8]) -> Vec<String> {
        Lines::new(bytes).collect::<io::Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_lines_split_on_every_terminator() {
        assert_eq!(read_lines(b"a\nb\r\nc\rd"), ["a", "b", "c", "d"]);
        assert_eq!(read_lines(b"a\rb\r"), ["a", "b"]);
        assert_eq!(read_lines(b"a\r\rb\n"), ["a", "", "b"]);
    }

    #[test]
    fn test_lines_keep_blank_lines() {
        assert_eq!(read_lines(b"a\n\nb\n"), ["a", "", "b"]);
        assert_eq!(read_lines(b"\n"), [""]);
        assert!(read_lines(b"").is_empty());
    }

    #[test]
    fn test_lines_replace_invalid_utf8() {
        let lines = read_lines(b"Ren\xe9,9,Present,2024-01-01\nBob,2,Absent,2024-01-01\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Ren\u{fffd},9,Present,2024-01-01");
        assert_eq!(lines[1], "Bob,2,Absent,2024-01-01");
    }

    #[test]
    fn test_parse_blank_uses_control_trim() {
        assert!(RecordLine::parse("\u{1}\u{1f} ").is_none());
        assert!(RecordLine::parse("\u{a0}").is_some());
    }

    #[test]
    fn test_to_record_rejects_bad_date() {
        let line = RecordLine::parse("Alice,1,Present,yesterday").unwrap();
        assert!(line.to_record().is_none());
    }
}
