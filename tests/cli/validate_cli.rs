use std::fs;

use predicates::prelude::predicate;
use serde_json::{Value, json};
use tempfile::tempdir;

fn clean_filing() -> Value {
    json!({
        "DocumentCount": "1",
        "AmendedReturn": "false",
        "FAMLIPremiumStartDate": "2024-01-01",
        "FAMLIPremiumEndDate": "2024-03-31",
        "SettlementDate": "2024-04-15T00:00:00Z",
        "EmployerLegalName": "Rocky Mountain Widgets LLC",
        "EmployerFEIN": "841234567",
        "BusAdrStreet1": "1600 Broadway",
        "BusAdrCity": "Denver",
        "BusAdrStateCode": "CO",
        "BusAdrPostalCode": "80202",
        "BusAdrCountry": "US",
        "TotalWagesThisPeriod": "15000.00",
        "PaymentAmountTotal": "67.50",
        "IsFinalReturn": "false",
        "EmployeeSSN": "523456789",
        "EmployeeFirstName": "Ada",
        "EmployeeLastName": "Lovelace",
        "YearToDateWages": "15000.00",
        "GrossWagesThisQtr": "15000.00",
        "SubjectWagesThisQtr": "15000.00",
        "FAMLIContributionThisQtr": "67.50"
    })
}

#[test]
fn clean_records_from_stdin_exit_zero() {
    let input = serde_json::to_string(&vec![clean_filing()]).expect("serialize input");

    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .arg("validate")
        .write_stdin(input)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""clean":true"#))
        .stderr(predicate::str::is_empty());
}

#[test]
fn dirty_csv_file_exits_two_with_grouped_issues() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("filings.csv");
    // Row 1 has a malformed SSN, row 2 additionally drops the city.
    let mut header: Vec<String> = Vec::new();
    let clean = clean_filing();
    let object = clean.as_object().expect("object");
    for key in object.keys() {
        header.push(key.clone());
    }
    let row = |ssn: &str, city: &str| -> String {
        header
            .iter()
            .map(|key| match key.as_str() {
                "EmployeeSSN" => ssn.to_string(),
                "BusAdrCity" => city.to_string(),
                other => object[other].as_str().expect("string cell").to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    };
    let csv = format!(
        "{}\n{}\n{}\n",
        header.join(","),
        row("123-45-6789", "Denver"),
        row("12345678", "")
    );
    fs::write(&input_path, csv).expect("write csv");

    let output = assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .args(["validate", "--input"])
        .arg(&input_path)
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).expect("stdout json");
    assert_eq!(payload["clean"], json!(false));
    assert_eq!(payload["record_count"], json!(2));

    let issues = payload["issues"].as_array().expect("issues");
    assert!(issues.iter().any(|group| {
        group["field"] == json!("EmployeeSSN")
            && group["issue"] == json!("Invalid SSN format")
            && group["count"] == json!(2)
    }));
    assert!(issues.iter().any(|group| {
        group["field"] == json!("BusAdrCity")
            && group["issue"] == json!("Missing required field: BusAdrCity")
            && group["count"] == json!(1)
    }));
}

#[test]
fn custom_rules_and_tolerance_relax_wage_sums() {
    let dir = tempdir().expect("tempdir");
    let rules_path = dir.path().join("rules.yaml");
    fs::write(
        &rules_path,
        r#"
fields:
  - name: TotalWagesThisPeriod
    type: decimal
    required: true
  - name: GrossWagesThisQtr
    type: decimal
    required: true
cross_field:
  - wage_sum:
      label: TotalWagesThisPeriod
      total: TotalWagesThisPeriod
      parts: [GrossWagesThisQtr]
"#,
    )
    .expect("write rules");
    let input = r#"[{"TotalWagesThisPeriod": "1000.00", "GrossWagesThisQtr": "999.98"}]"#;

    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .args(["validate", "--rules"])
        .arg(&rules_path)
        .write_stdin(input)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Wage components differ from TotalWagesThisPeriod by 0.02",
        ));

    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .args(["validate", "--tolerance", "0.05", "--rules"])
        .arg(&rules_path)
        .write_stdin(input)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""clean":true"#));
}

#[test]
fn missing_rules_file_is_a_usage_error() {
    assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .args(["validate", "--rules", "no-such-rules.yaml"])
        .write_stdin("[]")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input_usage_error"));
}

#[test]
fn output_directory_receives_a_csv_artifact() {
    let dir = tempdir().expect("tempdir");
    let out_dir = dir.path().join("reports");
    let mut dirty = clean_filing();
    dirty["BusAdrPostalCode"] = json!("8020");
    let input = serde_json::to_string(&vec![dirty]).expect("serialize input");

    let output = assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .args(["validate", "--output"])
        .arg(&out_dir)
        .write_stdin(input)
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).expect("stdout json");
    let artifact = payload["artifact_path"].as_str().expect("artifact path");
    let contents = fs::read_to_string(artifact).expect("artifact readable");
    assert!(contents.contains("Invalid postal code format"));
}
