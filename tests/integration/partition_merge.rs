use wagegate::domain::record::{FieldValue, Record};
use wagegate::engine::catalog::wage_filing_registry;
use wagegate::engine::validate::{ValidateOptions, aggregate, evaluate_record, execute_validation};

fn sparse_record(index: usize) -> Record {
    // Every record misses the employee names; odd rows also carry a bad SSN.
    let mut record = Record::new();
    record.set("BusAdrCountry", FieldValue::String("US".to_string()));
    record.set("BusAdrStateCode", FieldValue::String("CO".to_string()));
    if index % 2 == 1 {
        record.set("EmployeeSSN", FieldValue::String("123".to_string()));
    }
    record
}

#[test]
fn per_partition_evaluation_matches_the_single_pass_engine() {
    let registry = wage_filing_registry();
    let options = ValidateOptions::default();
    let records: Vec<Record> = (0..8).map(sparse_record).collect();

    let whole =
        execute_validation(&records, &registry, &options).expect("single pass report");

    // Simulate two workers splitting the batch, each pooling findings
    // locally, with the merge as the only shared step.
    let (left, right) = records.split_at(3);
    let left_pool: Vec<_> = left
        .iter()
        .map(|record| evaluate_record(record, &registry, &options))
        .collect();
    let right_pool: Vec<_> = right
        .iter()
        .map(|record| evaluate_record(record, &registry, &options))
        .collect();
    let merged = aggregate(left_pool.into_iter().chain(right_pool), &registry);

    assert_eq!(whole.issues, merged);
}
