//! Attendance summaries.
//!
//! Aggregates register lines into overall and per-roll present/absent counts.
//! Lines with fewer than three fields are skipped; everything else counts,
//! with any status other than `Present` (ignoring case) counted as absent.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::record::AttendanceStatus;
use crate::storage::RecordLine;

/// Lines shorter than this carry no status and are not counted.
const MIN_FIELDS: usize = 3;

/// Attendance totals for one roll number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollSummary {
    /// The roll number these totals belong to.
    pub roll_number: String,
    /// Days marked present.
    pub present: usize,
    /// Days marked absent.
    pub absent: usize,
    /// All counted records for this roll.
    pub total: usize,
    /// `present * 100 / total`, or 0.0 when nothing was counted.
    pub present_percentage: f64,
}

impl RollSummary {
    fn new(roll_number: String, present: usize, total: usize) -> Self {
        Self {
            roll_number,
            present,
            absent: total - present,
            total,
            present_percentage: percentage(present, total),
        }
    }

    /// The percentage with one fractional digit, e.g. `66.7`.
    #[must_use]
    pub fn formatted_percentage(&self) -> String {
        format!("{:.1}", self.present_percentage)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(present: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        present as f64 * 100.0 / total as f64
    }
}

/// Overall and per-roll attendance totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// All counted records.
    pub total: usize,
    /// Records marked present.
    pub present: usize,
    /// Records not marked present.
    pub absent: usize,
    /// Per-roll totals in the order each roll first appears.
    pub per_roll: Vec<RollSummary>,
}

impl Summary {
    /// Look up the totals for a roll number.
    #[must_use]
    pub fn roll(&self, roll_number: &str) -> Option<&RollSummary> {
        self.per_roll.iter().find(|r| r.roll_number == roll_number)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Roll numbers in first-seen order.
    pub fn roll_numbers(&self) -> impl Iterator<Item = &str> {
        self.per_roll.iter().map(|r| r.roll_number.as_str())
    }
}

/// Summarize register lines in file order.
///
/// Returns `None` when there are no lines at all, so callers can tell an
/// empty register apart from one with zero present or absent records.
#[must_use]
pub fn summarize(records: &[RecordLine]) -> Option<Summary> {
    if records.is_empty() {
        return None;
    }

    let mut total = 0;
    let mut present = 0;
    // (roll, present, total), in first-seen order
    let mut buckets: Vec<(String, usize, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if record.len() < MIN_FIELDS {
            continue;
        }
        let (Some(roll), Some(status)) = (record.roll_number(), record.status()) else {
            continue;
        };

        let is_present = AttendanceStatus::is_present_text(status);
        total += 1;
        if is_present {
            present += 1;
        }

        let slot = *index.entry(roll).or_insert_with(|| {
            buckets.push((roll.to_string(), 0, 0));
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        if is_present {
            bucket.1 += 1;
        }
        bucket.2 += 1;
    }

    Some(Summary {
        total,
        present,
        absent: total - present,
        per_roll: buckets
            .into_iter()
            .map(|(roll, present, total)| RollSummary::new(roll, present, total))
            .collect(),
    })
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUMMARY")?;
        writeln!(f, "Total Records: {}", self.total)?;
        writeln!(f, "Present: {} | Absent: {}", self.present, self.absent)?;
        writeln!(f)?;
        writeln!(f, "Per Roll Number:")?;
        for roll in &self.per_roll {
            writeln!(
                f,
                "Roll {}: Present={}, Absent={}, %Present={}%",
                roll.roll_number,
                roll.present,
                roll.absent,
                roll.formatted_percentage()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<RecordLine> {
        raw.iter().filter_map(|l| RecordLine::parse(l)).collect()
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_reference_example() {
        let records = lines(&[
            "Alice,1,Present,2024-01-01",
            "Bob,2,Absent,2024-01-01",
            "Alice,1,Present,2024-01-02",
        ]);
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.roll_numbers().collect::<Vec<_>>(), ["1", "2"]);

        let one = summary.roll("1").unwrap();
        assert_eq!((one.present, one.total, one.absent), (2, 2, 0));
        assert!((one.present_percentage - 100.0).abs() < f64::EPSILON);

        let two = summary.roll("2").unwrap();
        assert_eq!((two.present, two.total, two.absent), (0, 1, 1));
        assert!(two.present_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let records = lines(&[
            "Zed,9,Present,2024-01-01",
            "Amy,10,Present,2024-01-01",
            "Zed,9,Absent,2024-01-02",
            "Bo,1,Absent,2024-01-02",
        ]);
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.roll_numbers().collect::<Vec<_>>(), ["9", "10", "1"]);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let records = lines(&["Alice,1", "garbage", "Bob,2,Present"]);
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.total, 1);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.roll_numbers().collect::<Vec<_>>(), ["2"]);
    }

    #[test]
    fn test_only_short_lines_gives_zeroed_summary() {
        let records = lines(&["garbage"]);
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.per_roll.is_empty());
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let records = lines(&["A,1,present,2024-01-01", "B,1,PRESENT,2024-01-02", "C,1,late,2024-01-03"]);
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
    }

    #[test]
    fn test_percentage_formatting() {
        let records = lines(&[
            "A,1,Present,2024-01-01",
            "A,1,Present,2024-01-02",
            "A,1,Absent,2024-01-03",
        ]);
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.roll("1").unwrap().formatted_percentage(), "66.7");
    }

    #[test]
    fn test_zero_total_percentage() {
        let roll = RollSummary::new("1".to_string(), 0, 0);
        assert_eq!(roll.formatted_percentage(), "0.0");
    }

    #[test]
    fn test_display() {
        let records = lines(&[
            "Alice,1,Present,2024-01-01",
            "Bob,2,Absent,2024-01-01",
            "Alice,1,Present,2024-01-02",
        ]);
        let text = summarize(&records).unwrap().to_string();
        let expected = "SUMMARY\n\
                        Total Records: 3\n\
                        Present: 2 | Absent: 1\n\
                        \n\
                        Per Roll Number:\n\
                        Roll 1: Present=2, Absent=0, %Present=100.0%\n\
                        Roll 2: Present=0, Absent=1, %Present=0.0%\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_serialize() {
        let records = lines(&["Alice,1,Present,2024-01-01"]);
        let json = serde_json::to_value(summarize(&records).unwrap()).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["per_roll"][0]["roll_number"], "1");
        assert_eq!(json["per_roll"][0]["present_percentage"], 100.0);
    }

    #[test]
    fn test_to_json() {
        let records = lines(&["Alice,1,Present,2024-01-01", "Bob,2,Absent,2024-01-01"]);
        let text = summarize(&records).unwrap().to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["absent"], 1);
        assert_eq!(json["per_roll"][1]["roll_number"], "2");
    }
}
