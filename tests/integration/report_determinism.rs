use wagegate::domain::record::{FieldValue, Record};
use wagegate::engine::catalog::wage_filing_registry;
use wagegate::engine::validate::{ValidateOptions, execute_validation};

fn filing(ssn: &str, postal: &str) -> Record {
    let mut record = Record::new();
    for (field, value) in [
        ("DocumentCount", "1"),
        ("AmendedReturn", "false"),
        ("FAMLIPremiumStartDate", "2024-01-01"),
        ("FAMLIPremiumEndDate", "2024-03-31"),
        ("SettlementDate", "2024-04-15T00:00:00Z"),
        ("EmployerLegalName", "Rocky Mountain Widgets LLC"),
        ("EmployerFEIN", "841234567"),
        ("BusAdrStreet1", "1600 Broadway"),
        ("BusAdrCity", "Denver"),
        ("BusAdrStateCode", "CO"),
        ("BusAdrPostalCode", postal),
        ("BusAdrCountry", "US"),
        ("TotalWagesThisPeriod", "15000.00"),
        ("PaymentAmountTotal", "67.50"),
        ("IsFinalReturn", "false"),
        ("EmployeeSSN", ssn),
        ("EmployeeFirstName", "Ada"),
        ("EmployeeLastName", "Lovelace"),
        ("YearToDateWages", "15000.00"),
        ("GrossWagesThisQtr", "15000.00"),
        ("SubjectWagesThisQtr", "15000.00"),
        ("FAMLIContributionThisQtr", "67.50"),
    ] {
        record.set(field, FieldValue::String(value.to_string()));
    }
    record
}

fn dirty_batch() -> Vec<Record> {
    vec![
        filing("523456789", "80202"),
        filing("1234567890", "80202"),
        filing("12345678", "8020"),
        filing("523456789", "80202-12"),
    ]
}

#[test]
fn repeated_runs_agree_on_everything_but_the_timestamp() {
    let registry = wage_filing_registry();
    let options = ValidateOptions::default();
    let records = dirty_batch();

    let first = execute_validation(&records, &registry, &options).expect("first run");
    let second = execute_validation(&records, &registry, &options).expect("second run");

    assert_eq!(first.issue_view(), second.issue_view());
    assert_eq!(first.clean, second.clean);
}

#[test]
fn permuting_the_input_does_not_change_the_report_body() {
    let registry = wage_filing_registry();
    let options = ValidateOptions::default();

    let forward = dirty_batch();
    let mut reversed = dirty_batch();
    reversed.reverse();

    let first = execute_validation(&forward, &registry, &options).expect("forward run");
    let second = execute_validation(&reversed, &registry, &options).expect("reversed run");

    assert_eq!(first.issue_view(), second.issue_view());
}
