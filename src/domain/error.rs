use thiserror::Error;

/// Registry problems detected before any record is processed. A run either
/// yields a complete report or fails with one of these; record-level data
/// problems never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Field name registered twice.
    #[error("field `{field}` is already registered")]
    DuplicateField { field: String },

    /// Rule or predicate references a field with no spec.
    #[error("{rule} rule references unregistered field `{field}`")]
    UnknownField { rule: &'static str, field: String },

    /// Format rule bound to a field whose spec declares no format.
    #[error("format_check rule targets field `{field}` which declares no format")]
    MissingFormat { field: String },

    /// Spec sets both unconditional and conditional requirement.
    #[error("field `{field}` sets both `required` and `required_if`")]
    AmbiguousRequirement { field: String },

    /// Wage-sum rule with nothing to add up.
    #[error("wage_sum rule `{label}` lists no component fields")]
    EmptyWageSum { label: String },
}
