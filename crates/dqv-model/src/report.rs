use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::{Issue, IssueKind, Severity};

/// Accumulated outcome of one or more validation runs on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub timestamp: DateTime<Utc>,
    pub checks_performed: Vec<String>,
    pub issues_found: Vec<Issue>,
    pub rows_processed: usize,
    pub rows_cleaned: usize,
}

impl Default for QualityReport {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityReport {
    /// Empty report stamped with the current time.
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    pub fn with_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            checks_performed: Vec::new(),
            issues_found: Vec::new(),
            rows_processed: 0,
            rows_cleaned: 0,
        }
    }

    pub fn record_check(&mut self, name: impl Into<String>) {
        self.checks_performed.push(name.into());
    }

    pub fn add_issue(&mut self, issue: Issue) {
        self.issues_found.push(issue);
    }

    /// Clear checks, issues and counters. The timestamp is kept.
    pub fn reset(&mut self) {
        self.checks_performed.clear();
        self.issues_found.clear();
        self.rows_processed = 0;
        self.rows_cleaned = 0;
    }

    pub fn issue_count(&self) -> usize {
        self.issues_found.len()
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_processed.saturating_sub(self.rows_cleaned)
    }

    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues_found
            .iter()
            .filter(move |issue| issue.kind() == kind)
    }

    pub fn error_count(&self) -> usize {
        self.issues_found
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues_found
            .iter()
            .filter(|issue| issue.severity() == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_report() -> QualityReport {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        QualityReport::with_timestamp(timestamp)
    }

    #[test]
    fn counters_and_filters() {
        let mut report = fixed_report();
        report.rows_processed = 5;
        report.rows_cleaned = 3;
        report.record_check("duplicate_check");
        report.add_issue(Issue::Duplicates {
            count: 1,
            columns_checked: None,
        });
        report.add_issue(Issue::MissingColumns {
            columns: vec!["id".to_string()],
        });
        assert_eq!(report.issue_count(), 2);
        assert_eq!(report.rows_removed(), 2);
        assert_eq!(report.issues_of(IssueKind::Duplicates).count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn rows_removed_saturates() {
        let mut report = fixed_report();
        report.rows_processed = 1;
        report.rows_cleaned = 4;
        assert_eq!(report.rows_removed(), 0);
    }

    #[test]
    fn reset_keeps_timestamp() {
        let mut report = fixed_report();
        let timestamp = report.timestamp;
        report.rows_processed = 9;
        report.record_check("null_handling");
        report.add_issue(Issue::Duplicates {
            count: 1,
            columns_checked: None,
        });
        report.reset();
        assert_eq!(report.timestamp, timestamp);
        assert!(report.checks_performed.is_empty());
        assert!(report.issues_found.is_empty());
        assert_eq!(report.rows_processed, 0);
    }

    #[test]
    fn timestamp_serializes_as_iso8601() {
        let json = fixed_report().to_json_pretty().unwrap();
        assert!(json.contains("\"timestamp\": \"2024-01-02T03:04:05Z\""));
    }
}
