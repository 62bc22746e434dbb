use wagegate::domain::record::{FieldValue, Record};
use wagegate::engine::catalog::wage_filing_registry;
use wagegate::engine::validate::{ValidateOptions, execute_validation};

fn clean_filing_record() -> Record {
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
        ("BusAdrPostalCode", "80202"),
        ("BusAdrCountry", "US"),
        ("TotalWagesThisPeriod", "15000.00"),
        ("PaymentAmountTotal", "67.50"),
        ("IsFinalReturn", "false"),
        ("EmployeeSSN", "523456789"),
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

#[test]
fn batch_with_mixed_defects_reports_grouped_counts() {
    let registry = wage_filing_registry();

    let clean = clean_filing_record();

    let mut bad_ssn = clean_filing_record();
    bad_ssn.set("EmployeeSSN", FieldValue::String("1234567890".to_string()));

    let mut bad_ssn_and_dates = clean_filing_record();
    bad_ssn_and_dates.set("EmployeeSSN", FieldValue::String("12-3456789".to_string()));
    bad_ssn_and_dates.set(
        "FAMLIPremiumStartDate",
        FieldValue::String("2024-05-01".to_string()),
    );
    bad_ssn_and_dates.set(
        "FAMLIPremiumEndDate",
        FieldValue::String("2024-01-01".to_string()),
    );

    let mut short_payment = clean_filing_record();
    short_payment.set("PaymentAmountTotal", FieldValue::String("100.00".to_string()));

    let records = vec![clean, bad_ssn, bad_ssn_and_dates, short_payment];
    let report =
        execute_validation(&records, &registry, &ValidateOptions::default()).expect("report");

    assert!(!report.clean);
    assert_eq!(report.record_count, 4);
    assert_eq!(report.finding_count, 4);

    let rows: Vec<(String, String, usize)> = report
        .issues
        .iter()
        .map(|group| (group.field.clone(), group.issue.clone(), group.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            (
                "PaymentAmountTotal".to_string(),
                "Wage components differ from PaymentAmountTotal by 32.5".to_string(),
                1
            ),
            (
                "EmployeeSSN".to_string(),
                "Invalid SSN format".to_string(),
                2
            ),
            (
                "FAMLIPremiumDates".to_string(),
                "End date is before start date".to_string(),
                1
            ),
        ]
    );
}

#[test]
fn records_all_missing_one_field_count_once_each() {
    let registry = wage_filing_registry();
    let records: Vec<Record> = (0..5)
        .map(|_| {
            let mut record = clean_filing_record();
            record.set("EmployeeLastName", FieldValue::Absent);
            record
        })
        .collect();

    let report =
        execute_validation(&records, &registry, &ValidateOptions::default()).expect("report");

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].field, "EmployeeLastName");
    assert_eq!(
        report.issues[0].issue,
        "Missing required field: EmployeeLastName"
    );
    assert_eq!(report.issues[0].count, 5);
}

#[test]
fn unknown_fields_pass_through_without_findings() {
    let registry = wage_filing_registry();
    let mut record = clean_filing_record();
    record.set(
        "SomeVendorExtension",
        FieldValue::String("ignored".to_string()),
    );

    let report =
        execute_validation(&[record], &registry, &ValidateOptions::default()).expect("report");
    assert!(report.clean);
}
