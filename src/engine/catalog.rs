use crate::domain::fields::{FieldFormat, FieldSpec, FieldType, RequirementCondition};
use crate::domain::rules::{CrossFieldRule, RegistryConfig};
use crate::engine::registry::{RuleRegistry, build_registry};

/// The FAMLI quarterly wage-filing schema as a rules document: the default
/// registry population when the caller supplies none.
pub fn wage_filing_config() -> RegistryConfig {
    let fields = vec![
        FieldSpec::required("DocumentCount", FieldType::Integer),
        FieldSpec::required("AmendedReturn", FieldType::String),
        FieldSpec::required("FAMLIPremiumStartDate", FieldType::Date)
            .with_format(FieldFormat::IsoDate),
        FieldSpec::required("FAMLIPremiumEndDate", FieldType::Date)
            .with_format(FieldFormat::IsoDate),
        FieldSpec::required("SettlementDate", FieldType::String),
        FieldSpec::required("EmployerLegalName", FieldType::String),
        FieldSpec::optional("EmployerFEIN", FieldType::String).with_format(FieldFormat::Fein),
        FieldSpec::required("BusAdrStreet1", FieldType::String),
        FieldSpec::required("BusAdrCity", FieldType::String),
        FieldSpec::required("BusAdrStateCode", FieldType::String)
            .with_format(FieldFormat::StateCode)
            .required_when(RequirementCondition {
                field: "BusAdrCountry".to_string(),
                equals: Some("US".to_string()),
            }),
        FieldSpec::required("BusAdrPostalCode", FieldType::String)
            .with_format(FieldFormat::PostalCode),
        FieldSpec::required("BusAdrCountry", FieldType::String),
        FieldSpec::required("TotalWagesThisPeriod", FieldType::Decimal),
        FieldSpec::required("PaymentAmountTotal", FieldType::Decimal),
        FieldSpec::required("IsFinalReturn", FieldType::String),
        FieldSpec::required("EmployeeSSN", FieldType::String).with_format(FieldFormat::Ssn),
        FieldSpec::required("EmployeeFirstName", FieldType::String),
        FieldSpec::required("EmployeeLastName", FieldType::String),
        FieldSpec::required("YearToDateWages", FieldType::Decimal),
        FieldSpec::required("GrossWagesThisQtr", FieldType::Decimal),
        FieldSpec::required("SubjectWagesThisQtr", FieldType::Decimal),
        FieldSpec::required("FAMLIContributionThisQtr", FieldType::Decimal),
    ];

    let cross_field = vec![
        CrossFieldRule::DateOrder {
            label: "FAMLIPremiumDates".to_string(),
            start: "FAMLIPremiumStartDate".to_string(),
            end: "FAMLIPremiumEndDate".to_string(),
        },
        CrossFieldRule::WageBound {
            label: "WagesCalculation".to_string(),
            smaller: "SubjectWagesThisQtr".to_string(),
            larger: "GrossWagesThisQtr".to_string(),
        },
        CrossFieldRule::WageBound {
            label: "WagesCalculation".to_string(),
            smaller: "GrossWagesThisQtr".to_string(),
            larger: "YearToDateWages".to_string(),
        },
        CrossFieldRule::WageSum {
            label: "PaymentAmountTotal".to_string(),
            total: "PaymentAmountTotal".to_string(),
            parts: vec!["FAMLIContributionThisQtr".to_string()],
        },
    ];

    RegistryConfig {
        fields,
        cross_field,
    }
}

/// Built-in registry for wage filings.
pub fn wage_filing_registry() -> RuleRegistry {
    build_registry(&wage_filing_config()).expect("built-in catalog is internally consistent")
}
