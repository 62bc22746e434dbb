use serde::{Deserialize, Serialize};

use crate::domain::record::Record;

/// Expected scalar type declared for a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Decimal,
    Date,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
        }
    }
}

/// Shape rule applied to a field's text rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Ssn,
    StateCode,
    PostalCode,
    Fein,
    IsoDate,
}

impl FieldFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ssn => "ssn",
            Self::StateCode => "state_code",
            Self::PostalCode => "postal_code",
            Self::Fein => "fein",
            Self::IsoDate => "iso_date",
        }
    }
}

/// Predicate gating a conditional requirement. Holds when `field` equals the
/// literal in `equals`, or merely when `field` is present if `equals` is
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RequirementCondition {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
}

/// Outcome of evaluating a requirement condition against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionOutcome {
    Holds,
    DoesNotHold,
    /// The predicate compares against a field the record does not carry, so
    /// the requirement cannot be decided for this record.
    PrerequisiteMissing { field: String },
}

impl RequirementCondition {
    pub fn evaluate(&self, record: &Record) -> ConditionOutcome {
        let value = record.get(&self.field);
        match &self.equals {
            None => {
                if value.is_present() {
                    ConditionOutcome::Holds
                } else {
                    ConditionOutcome::DoesNotHold
                }
            }
            Some(expected) => {
                if !value.is_present() {
                    return ConditionOutcome::PrerequisiteMissing {
                        field: self.field.clone(),
                    };
                }
                if value.as_text().as_deref() == Some(expected.as_str()) {
                    ConditionOutcome::Holds
                } else {
                    ConditionOutcome::DoesNotHold
                }
            }
        }
    }
}

/// Effective requirement resolved from a field spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    RequiredWhen(RequirementCondition),
}

/// Declarative requirement, type, and format for one field. Static
/// configuration; never mutated after registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_if: Option<RequirementCondition>,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            format: None,
            required_if: None,
        }
    }

    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            format: None,
            required_if: None,
        }
    }

    pub fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn required_when(mut self, condition: RequirementCondition) -> Self {
        self.required = false;
        self.required_if = Some(condition);
        self
    }

    pub fn requirement(&self) -> Requirement {
        if let Some(condition) = &self.required_if {
            return Requirement::RequiredWhen(condition.clone());
        }
        if self.required {
            Requirement::Required
        } else {
            Requirement::Optional
        }
    }
}
