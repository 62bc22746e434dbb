pub mod aggregate;
mod checks;
pub mod formats;

pub use aggregate::aggregate;

use crate::domain::error::ConfigurationError;
use crate::domain::record::Record;
use crate::domain::report::ValidationReport;
use crate::domain::rules::Finding;
use crate::engine::registry::RuleRegistry;
use crate::util::time;

/// Caller-supplied knobs for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValidateOptions {
    /// Allowed absolute difference in wage-sum checks. Zero means exact.
    pub wage_tolerance: f64,
}

/// Findings produced by one record, tagged with the registration index of the
/// producing rule so aggregation can order groups without looking at input
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFindings {
    pub(crate) entries: Vec<RuleFinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleFinding {
    pub(crate) rule_index: usize,
    pub(crate) finding: Finding,
}

impl RecordFindings {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().map(|entry| &entry.finding)
    }
}

/// Applies every registered rule to one record. Pure: reads the record and
/// registry, touches no shared state, and never fails on record content.
pub fn evaluate_record(
    record: &Record,
    registry: &RuleRegistry,
    options: &ValidateOptions,
) -> RecordFindings {
    let entries = registry
        .rules()
        .iter()
        .enumerate()
        .filter_map(|(rule_index, rule)| {
            checks::evaluate_rule(rule, record, registry, options)
                .map(|finding| RuleFinding { rule_index, finding })
        })
        .collect();
    RecordFindings { entries }
}

/// Validates a record collection: checks the registry, evaluates every rule
/// against every record, and aggregates the pooled findings into a stamped
/// report. Data problems become report content; only registry problems fail.
pub fn execute_validation(
    records: &[Record],
    registry: &RuleRegistry,
    options: &ValidateOptions,
) -> Result<ValidationReport, ConfigurationError> {
    registry.ensure_valid()?;

    let pools: Vec<RecordFindings> = records
        .iter()
        .map(|record| evaluate_record(record, registry, options))
        .collect();
    let finding_count = pools.iter().map(RecordFindings::len).sum();
    let issues = aggregate::aggregate(pools, registry);

    Ok(ValidationReport {
        clean: issues.is_empty(),
        generated_at: time::generated_at(),
        record_count: records.len(),
        finding_count,
        issues,
    })
}
