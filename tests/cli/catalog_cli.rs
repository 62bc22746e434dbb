use serde_json::Value;
use wagegate::domain::rules::RegistryConfig;
use wagegate::engine::registry::build_registry;

#[test]
fn catalog_prints_a_buildable_rules_document() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("wagegate")
        .arg("catalog")
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).expect("stdout json");
    let config: RegistryConfig =
        serde_json::from_value(payload).expect("catalog parses as rules document");

    assert!(
        config
            .fields
            .iter()
            .any(|field| field.name == "EmployeeSSN")
    );
    build_registry(&config).expect("catalog builds");
}
