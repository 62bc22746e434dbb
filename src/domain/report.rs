use serde::{Deserialize, Serialize};

/// Aggregated count of findings sharing one field and issue description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueGroup {
    pub field: String,
    pub issue: String,
    pub count: usize,
}

/// Deterministic report produced by one validation run. The timestamp is the
/// only field that varies between runs over identical input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub clean: bool,
    pub generated_at: String,
    pub record_count: usize,
    pub finding_count: usize,
    pub issues: Vec<IssueGroup>,
}

impl ValidationReport {
    /// Issue rows without the run timestamp, for equality checks between runs.
    pub fn issue_view(&self) -> (&[IssueGroup], usize, usize) {
        (&self.issues, self.record_count, self.finding_count)
    }
}
