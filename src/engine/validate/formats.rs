use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::fields::FieldFormat;

fn pattern(cell: &'static OnceLock<Regex>, source: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static pattern compiles"))
}

fn ssn_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, "^[0-9]{9}$")
}

fn state_code_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, "^[A-Z]{2}$")
}

fn postal_code_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, "^[0-9]{5}(-[0-9]{4})?$")
}

fn iso_date_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, "^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
}

/// Parses `YYYY-MM-DD` strictly: the literal shape plus a real calendar date.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    if !iso_date_pattern().is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

pub fn matches_format(format: FieldFormat, text: &str) -> bool {
    match format {
        FieldFormat::Ssn | FieldFormat::Fein => ssn_pattern().is_match(text),
        FieldFormat::StateCode => state_code_pattern().is_match(text),
        FieldFormat::PostalCode => postal_code_pattern().is_match(text),
        FieldFormat::IsoDate => parse_iso_date(text).is_some(),
    }
}

/// Issue wording per format, matching the report vocabulary of the wage
/// filing pipeline.
pub fn format_issue(format: FieldFormat, field: &str) -> String {
    match format {
        FieldFormat::Ssn => "Invalid SSN format".to_string(),
        FieldFormat::StateCode => "Invalid state code format".to_string(),
        FieldFormat::PostalCode => "Invalid postal code format".to_string(),
        FieldFormat::Fein => "Invalid FEIN format".to_string(),
        FieldFormat::IsoDate => format!("Invalid date format in {field}"),
    }
}
