use serde::{Deserialize, Serialize};
use specwatch_beacon::Platform;
use std::collections::BTreeMap;
use std::fmt;

/// Number of entries kept in [`Report::top_issues`].
pub const TOP_ISSUE_LIMIT: usize = 10;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Warning,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Warning => "warning",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one dimension (or RSID / companion event) on a beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: String,
    /// Vendor field the value was read from, e.g. `v75`.
    pub field: String,
    pub value: String,
    pub status: Status,
    pub message: String,
}

impl DimensionResult {
    pub fn new(
        dimension: impl Into<String>,
        value: impl Into<String>,
        status: Status,
        message: impl Into<String>,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            field: String::new(),
            value: value.into(),
            status,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Everything checked on one beacon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconResult {
    pub url: String,
    pub vendor: String,
    /// Canonical event the beacon was bound to; `None` when unmatched.
    pub event_name: Option<String>,
    pub rsid: String,
    pub events_fired: Vec<String>,
    pub platform: Platform,
    pub dimensions: Vec<DimensionResult>,
    pub errors: usize,
    pub warnings: usize,
    pub matched: bool,
}

impl BeaconResult {
    /// Appends a check and bumps the error/warning counters.
    pub(crate) fn push(&mut self, result: DimensionResult) {
        match result.status {
            Status::Fail => self.errors += 1,
            Status::Warning => self.warnings += 1,
            Status::Pass => {}
        }
        self.dimensions.push(result);
    }

    /// Matched with no failing checks.
    pub fn passed(&self) -> bool {
        self.matched && self.errors == 0
    }
}

/// A failure message and how often it occurred across the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub message: String,
    pub count: usize,
}

/// The outcome of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Network events read from the capture, beacons or not.
    pub total_entries: usize,
    /// Beacons detected.
    pub total_calls: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub passed: usize,
    pub failed: usize,
    pub beacons: Vec<BeaconResult>,
    pub top_issues: Vec<IssueSummary>,
    /// Empty when validating without a mapping.
    pub mapping_name: String,
}

impl Report {
    /// Adds a beacon result and updates the totals.
    pub(crate) fn record(&mut self, result: BeaconResult) {
        self.total_calls += 1;
        if !result.matched {
            self.unmatched += 1;
        } else if result.passed() {
            self.matched += 1;
            self.passed += 1;
        } else {
            self.matched += 1;
            self.failed += 1;
        }
        self.beacons.push(result);
    }

    /// True if no matched beacon failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Orders issues by count (descending), then message, and keeps the top
/// [`TOP_ISSUE_LIMIT`].
pub fn build_top_issues(counts: &BTreeMap<String, usize>) -> Vec<IssueSummary> {
    let mut issues: Vec<IssueSummary> = counts
        .iter()
        .map(|(message, count)| IssueSummary {
            message: message.clone(),
            count: *count,
        })
        .collect();
    // BTreeMap iteration is already message-ordered and the sort is stable.
    issues.sort_by(|a, b| b.count.cmp(&a.count));
    issues.truncate(TOP_ISSUE_LIMIT);
    issues
}
