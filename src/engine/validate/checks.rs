use chrono::NaiveDate;

use crate::domain::fields::{ConditionOutcome, FieldType, Requirement};
use crate::domain::record::{FieldValue, Record};
use crate::domain::rules::{CrossFieldRule, Finding, ValidationRule};
use crate::engine::registry::RuleRegistry;
use crate::engine::validate::ValidateOptions;
use crate::engine::validate::formats;

/// Applies one rule to one record. At most one finding per rule per record;
/// absent or unparseable inputs of cross-field rules yield nothing because
/// presence and type rules already cover them.
pub(crate) fn evaluate_rule(
    rule: &ValidationRule,
    record: &Record,
    registry: &RuleRegistry,
    options: &ValidateOptions,
) -> Option<Finding> {
    match rule {
        ValidationRule::Presence { field } => check_presence(field, record, registry),
        ValidationRule::TypeCheck { field } => check_type(field, record, registry),
        ValidationRule::FormatCheck { field } => check_format(field, record, registry),
        ValidationRule::CrossField(cross) => check_cross_field(cross, record, options),
    }
}

fn finding(record: &Record, field: &str, issue: String) -> Option<Finding> {
    Some(Finding {
        field: field.to_string(),
        issue,
        record_id: record.identifier().map(ToOwned::to_owned),
    })
}

fn check_presence(field: &str, record: &Record, registry: &RuleRegistry) -> Option<Finding> {
    let spec = registry.field(field)?;
    let missing = !record.get(field).is_present();

    let missing_finding = |missing: bool| {
        if missing {
            finding(record, field, format!("Missing required field: {field}"))
        } else {
            None
        }
    };

    match spec.requirement() {
        Requirement::Optional => None,
        Requirement::Required => missing_finding(missing),
        Requirement::RequiredWhen(condition) => match condition.evaluate(record) {
            ConditionOutcome::Holds => missing_finding(missing),
            ConditionOutcome::DoesNotHold => None,
            ConditionOutcome::PrerequisiteMissing { field: prerequisite } => finding(
                record,
                field,
                format!("Prerequisite field missing: {prerequisite}"),
            ),
        },
    }
}

fn check_type(field: &str, record: &Record, registry: &RuleRegistry) -> Option<Finding> {
    let spec = registry.field(field)?;
    let value = record.get(field);
    if !value.is_present() {
        return None;
    }

    let valid = match spec.field_type {
        FieldType::String => matches!(value, FieldValue::String(_)),
        FieldType::Integer => match value {
            FieldValue::Integer(_) => true,
            FieldValue::Decimal(number) => number.fract() == 0.0,
            FieldValue::String(text) => text.trim().parse::<i64>().is_ok(),
            _ => false,
        },
        FieldType::Decimal => match value {
            FieldValue::Integer(_) | FieldValue::Decimal(_) => true,
            FieldValue::String(text) => parse_decimal(text).is_some(),
            _ => false,
        },
        FieldType::Date => match value {
            FieldValue::Date(_) => true,
            FieldValue::String(text) => formats::parse_iso_date(text.trim()).is_some(),
            _ => false,
        },
    };
    if valid {
        return None;
    }

    let issue = match spec.field_type {
        FieldType::String => format!("Invalid string value in {field}"),
        FieldType::Integer => format!("Invalid integer value in {field}"),
        FieldType::Decimal => format!("Invalid numeric value in {field}"),
        FieldType::Date => format!("Invalid date format in {field}"),
    };
    finding(record, field, issue)
}

fn check_format(field: &str, record: &Record, registry: &RuleRegistry) -> Option<Finding> {
    let spec = registry.field(field)?;
    let format = spec.format?;
    let value = record.get(field);
    if !value.is_present() {
        return None;
    }

    let text = value.as_text()?;
    if formats::matches_format(format, &text) {
        None
    } else {
        finding(record, field, formats::format_issue(format, field))
    }
}

fn check_cross_field(
    rule: &CrossFieldRule,
    record: &Record,
    options: &ValidateOptions,
) -> Option<Finding> {
    match rule {
        CrossFieldRule::DateOrder { label, start, end } => {
            let start_date = date_value(record, start)?;
            let end_date = date_value(record, end)?;
            if start_date > end_date {
                finding(record, label, "End date is before start date".to_string())
            } else {
                None
            }
        }
        CrossFieldRule::WageSum { label, total, parts } => {
            let total_amount = decimal_value(record, total)?;
            let mut sum = 0.0;
            for part in parts {
                sum += decimal_value(record, part)?;
            }
            let difference = (total_amount - sum).abs();
            if difference > options.wage_tolerance {
                finding(
                    record,
                    label,
                    format!(
                        "Wage components differ from {total} by {}",
                        format_amount(difference)
                    ),
                )
            } else {
                None
            }
        }
        CrossFieldRule::WageBound {
            label,
            smaller,
            larger,
        } => {
            let smaller_amount = decimal_value(record, smaller)?;
            let larger_amount = decimal_value(record, larger)?;
            if smaller_amount > larger_amount {
                finding(
                    record,
                    label,
                    format!("Invalid wage calculation: {smaller} exceeds {larger}"),
                )
            } else {
                None
            }
        }
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn decimal_value(record: &Record, field: &str) -> Option<f64> {
    match record.get(field) {
        FieldValue::Integer(number) => Some(*number as f64),
        FieldValue::Decimal(number) => Some(*number),
        FieldValue::String(text) => parse_decimal(text),
        _ => None,
    }
}

fn date_value(record: &Record, field: &str) -> Option<NaiveDate> {
    match record.get(field) {
        FieldValue::Date(date) => Some(*date),
        FieldValue::String(text) => formats::parse_iso_date(text.trim()),
        _ => None,
    }
}

/// Renders a wage difference without trailing fraction noise: whole amounts
/// print as integers, everything else rounds to cents.
fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    if cents.fract() == 0.0 {
        format!("{}", cents as i64)
    } else {
        format!("{cents}")
    }
}
