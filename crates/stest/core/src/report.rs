//! Run report and console rendering.

use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HarnessResult;
use crate::failure::FailureRecord;

/// Line printed between the progress block, the summary and each failure.
pub const SEPARATOR: &str = "------------------------------";

/// Message printed instead of a report when nothing is registered.
pub const NO_TESTS: &str = "no tests to run";

/// Summary line when every test passed.
pub const ALL_PASS: &str = "All tests pass";

/// Completion percentage after the test at 1-based `position` of `total`.
pub fn progress_percent(position: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (position as f64 / total as f64) * 100.0
}

/// Progress prefix for one test: `[ 50.00% ] Run 'name'... `.
pub fn format_progress(position: usize, total: usize, name: &str) -> String {
    format!(
        "[ {:.2}% ] Run '{}'... ",
        progress_percent(position, total),
        name
    )
}

/// How a test failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// An assertion returned a failure record
    Assertion,
    /// The test panicked with something other than a failure record
    Anomalous,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Assertion => write!(f, "assertion"),
            FailureKind::Anomalous => write!(f, "anomalous"),
        }
    }
}

/// A failed test as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// 1-based execution position
    pub position: usize,
    pub test: String,
    pub kind: FailureKind,
    pub record: FailureRecord,
}

/// Outcome of one driver run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    total: usize,
    failures: Vec<Failure>,
    started_at: DateTime<Utc>,
    duration_ms: i64,
}

impl RunReport {
    pub(crate) fn start() -> Self {
        Self {
            total: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub(crate) fn record_pass(&mut self) {
        self.total += 1;
    }

    pub(crate) fn record_failure(&mut self, test: &str, kind: FailureKind, record: FailureRecord) {
        self.total += 1;
        self.failures.push(Failure {
            position: self.total,
            test: test.to_string(),
            kind,
            record,
        });
    }

    pub(crate) fn finish(&mut self) {
        self.duration_ms = (Utc::now() - self.started_at).num_milliseconds();
    }

    /// Number of cases executed.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Failures in execution order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn passed_count(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// No cases were executed.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fraction of cases that passed, `None` when nothing ran.
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.passed_count() as f64 / self.total as f64)
    }

    /// Final summary line.
    pub fn summary_line(&self) -> String {
        match self.pass_rate() {
            None => NO_TESTS.to_string(),
            Some(_) if self.all_passed() => ALL_PASS.to_string(),
            Some(rate) => format!(
                "Fail! Not all tests pass ({} test fails({:.2}%))",
                self.failed_count(),
                rate * 100.0
            ),
        }
    }

    /// Separator and summary line.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "{}", self.summary_line())
    }

    /// One `In test 'name':` block per failure, in execution order.
    pub fn write_details<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for failure in &self.failures {
            writeln!(out, "{}", SEPARATOR)?;
            writeln!(out, "In test '{}':", failure.test)?;
            writeln!(out, "\t{}", failure.record)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> HarnessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{}", NO_TESTS);
        }
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "{}", self.summary_line())?;
        for failure in &self.failures {
            writeln!(f, "{}", SEPARATOR)?;
            writeln!(f, "In test '{}':", failure.test)?;
            writeln!(f, "\t{}", failure.record)?;
        }
        Ok(())
    }
}
