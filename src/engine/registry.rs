use std::collections::BTreeMap;

use crate::domain::error::ConfigurationError;
use crate::domain::fields::FieldSpec;
use crate::domain::rules::{CrossFieldRule, RegistryConfig, ValidationRule};

/// Ordered catalog of field specs and validation rules. Registration order is
/// the iteration order, so repeated runs over identical input produce
/// byte-identical reports.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    fields: Vec<FieldSpec>,
    field_index: BTreeMap<String, usize>,
    rules: Vec<ValidationRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field declaration. Field names are unique across the registry.
    pub fn register_field(&mut self, spec: FieldSpec) -> Result<(), ConfigurationError> {
        if self.field_index.contains_key(&spec.name) {
            return Err(ConfigurationError::DuplicateField {
                field: spec.name.clone(),
            });
        }
        if spec.required && spec.required_if.is_some() {
            return Err(ConfigurationError::AmbiguousRequirement {
                field: spec.name.clone(),
            });
        }
        self.field_index.insert(spec.name.clone(), self.fields.len());
        self.fields.push(spec);
        Ok(())
    }

    /// Adds a rule. Multiple rules may target the same field.
    pub fn register_rule(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// Registers the field together with its presence, type, and format rules
    /// in one step, in that order.
    pub fn register_field_with_rules(&mut self, spec: FieldSpec) -> Result<(), ConfigurationError> {
        let name = spec.name.clone();
        let has_format = spec.format.is_some();
        self.register_field(spec)?;
        self.register_rule(ValidationRule::Presence {
            field: name.clone(),
        });
        self.register_rule(ValidationRule::TypeCheck {
            field: name.clone(),
        });
        if has_format {
            self.register_rule(ValidationRule::FormatCheck { field: name });
        }
        Ok(())
    }

    /// Registered rules in registration order.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.field_index.get(name).map(|index| &self.fields[*index])
    }

    /// Registration index of a field, used for deterministic report ordering.
    pub fn field_rank(&self, name: &str) -> Option<usize> {
        self.field_index.get(name).copied()
    }

    /// Checks the registry as a whole before a run: every field a rule or
    /// predicate touches must be registered, format rules need a declared
    /// format, and wage sums need at least one component.
    pub fn ensure_valid(&self) -> Result<(), ConfigurationError> {
        for spec in &self.fields {
            if let Some(condition) = &spec.required_if {
                self.ensure_registered("required_if", &condition.field)?;
            }
        }

        for rule in &self.rules {
            match rule {
                ValidationRule::Presence { field } | ValidationRule::TypeCheck { field } => {
                    self.ensure_registered(rule.kind(), field)?;
                }
                ValidationRule::FormatCheck { field } => {
                    self.ensure_registered(rule.kind(), field)?;
                    let spec = self
                        .field(field)
                        .expect("registration checked on the line above");
                    if spec.format.is_none() {
                        return Err(ConfigurationError::MissingFormat {
                            field: field.clone(),
                        });
                    }
                }
                ValidationRule::CrossField(cross) => self.ensure_cross_field(cross)?,
            }
        }
        Ok(())
    }

    fn ensure_cross_field(&self, rule: &CrossFieldRule) -> Result<(), ConfigurationError> {
        match rule {
            CrossFieldRule::DateOrder { start, end, .. } => {
                self.ensure_registered(rule.kind(), start)?;
                self.ensure_registered(rule.kind(), end)
            }
            CrossFieldRule::WageSum { label, total, parts } => {
                if parts.is_empty() {
                    return Err(ConfigurationError::EmptyWageSum {
                        label: label.clone(),
                    });
                }
                self.ensure_registered(rule.kind(), total)?;
                for part in parts {
                    self.ensure_registered(rule.kind(), part)?;
                }
                Ok(())
            }
            CrossFieldRule::WageBound {
                smaller, larger, ..
            } => {
                self.ensure_registered(rule.kind(), smaller)?;
                self.ensure_registered(rule.kind(), larger)
            }
        }
    }

    fn ensure_registered(
        &self,
        rule: &'static str,
        field: &str,
    ) -> Result<(), ConfigurationError> {
        if self.field_index.contains_key(field) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownField {
                rule,
                field: field.to_string(),
            })
        }
    }
}

/// Builds a registry from a deserialized rules document: fields (with their
/// derived rules) in document order, then cross-field rules.
pub fn build_registry(config: &RegistryConfig) -> Result<RuleRegistry, ConfigurationError> {
    let mut registry = RuleRegistry::new();
    for spec in &config.fields {
        registry.register_field_with_rules(spec.clone())?;
    }
    for rule in &config.cross_field {
        registry.register_rule(ValidationRule::CrossField(rule.clone()));
    }
    registry.ensure_valid()?;
    Ok(registry)
}
