use serde::{Deserialize, Serialize};

use crate::domain::fields::FieldSpec;

/// Rule comparing values across fields of the same record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum CrossFieldRule {
    /// `start` must be on or before `end` when both are present.
    DateOrder {
        label: String,
        start: String,
        end: String,
    },
    /// `total` must equal the sum of `parts` within the configured tolerance.
    WageSum {
        label: String,
        total: String,
        parts: Vec<String>,
    },
    /// `smaller` must not exceed `larger`.
    WageBound {
        label: String,
        smaller: String,
        larger: String,
    },
}

impl CrossFieldRule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DateOrder { .. } => "date_order",
            Self::WageSum { .. } => "wage_sum",
            Self::WageBound { .. } => "wage_bound",
        }
    }

    /// Field name the rule reports under. Cross-field labels need not match a
    /// registered field.
    pub fn label(&self) -> &str {
        match self {
            Self::DateOrder { label, .. }
            | Self::WageSum { label, .. }
            | Self::WageBound { label, .. } => label,
        }
    }
}

/// Executable check producing zero or one finding per record. Presence, type,
/// and format rules read their parameters from the registered field spec;
/// cross-field rules carry their own.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    Presence { field: String },
    TypeCheck { field: String },
    FormatCheck { field: String },
    CrossField(CrossFieldRule),
}

impl ValidationRule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Presence { .. } => "presence",
            Self::TypeCheck { .. } => "type_check",
            Self::FormatCheck { .. } => "format_check",
            Self::CrossField(rule) => rule.kind(),
        }
    }

    pub fn report_field(&self) -> &str {
        match self {
            Self::Presence { field }
            | Self::TypeCheck { field }
            | Self::FormatCheck { field } => field,
            Self::CrossField(rule) => rule.label(),
        }
    }
}

/// Single rule violation detected on a single record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub field: String,
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Serde document describing a full registry population: field specs plus
/// cross-field rules. Loadable from JSON or YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub fields: Vec<FieldSpec>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub cross_field: Vec<CrossFieldRule>,
}
