use tagsift::{
    Dataset, LoadError, MemoryDataset, Registry, RuleSet, RuleOutcome, TagsiftError, Value,
};

fn registry() -> Registry {
    Registry::with_builtins()
}

#[test]
fn load_and_apply_anonymization_rules() {
    let input = r#"{
        "rules": [
            {
                "name": "strip_weight",
                "condition": { "type": "ElementExists", "params": { "tag": "PatientWeight" } },
                "actions": [
                    { "type": "DeleteElement", "params": { "tag": "PatientWeight" } }
                ]
            },
            {
                "name": "blank_sex",
                "condition": { "type": "True" },
                "actions": [
                    { "type": "EmptyElement", "params": { "tag": "PatientSex" } }
                ]
            },
            {
                "name": "mark_processed",
                "condition": { "type": "True" },
                "actions": [
                    { "type": "SetElement", "params": { "tag": "Anonymized", "value": true } }
                ]
            }
        ]
    }"#;

    let ruleset = RuleSet::from_json(&registry(), input).unwrap();
    assert_eq!(
        ruleset.rule_names(),
        &["strip_weight", "blank_sex", "mark_processed"]
    );

    let mut ds = MemoryDataset::new()
        .with("Modality", "MR")
        .with("PatientWeight", "60.5")
        .with("PatientSex", "F");
    let report = ruleset.apply(&mut ds);

    assert!(report.is_clean());
    assert_eq!(report.applied().len(), 3);
    assert!(!ds.exists("PatientWeight"));
    assert_eq!(ds.get("PatientSex"), Some(&Value::empty()));
    assert_eq!(ds.get("Anonymized"), Some(&Value::Bool(true)));
    assert_eq!(ds.get("Modality"), Some(&Value::Str("MR".into())));
}

#[test]
fn conditions_with_operators_and_children() {
    let input = r#"{
        "rules": [
            {
                "name": "flag_heavy_adults",
                "condition": {
                    "type": "All",
                    "children": [
                        { "type": "ElementMatch",
                          "params": { "tag": "PatientAge", "op": ">=", "value": 18 } },
                        { "type": "ElementMatch",
                          "params": { "tag": "PatientWeight", "op": ">", "value": 90.0 } }
                    ]
                },
                "actions": [
                    { "type": "SetElement", "params": { "tag": "Flagged", "value": true } }
                ]
            }
        ]
    }"#;

    let ruleset = RuleSet::from_json(&registry(), input).unwrap();

    let mut heavy = MemoryDataset::new()
        .with("PatientAge", 42_i64)
        .with("PatientWeight", 95.0_f64);
    let report = ruleset.apply(&mut heavy);
    assert_eq!(report.outcome_of("flag_heavy_adults"), Some(&RuleOutcome::Applied));
    assert!(heavy.exists("Flagged"));

    let mut light = MemoryDataset::new()
        .with("PatientAge", 42_i64)
        .with("PatientWeight", 60.0_f64);
    ruleset.apply(&mut light);
    assert!(!light.exists("Flagged"));
}

#[test]
fn unknown_class_rejects_whole_ruleset() {
    let input = r#"{
        "rules": [
            { "name": "fine", "condition": { "type": "True" } },
            { "name": "broken", "condition": { "type": "Nonexistent" } }
        ]
    }"#;

    let result = RuleSet::from_json(&registry(), input);
    match result {
        Err(TagsiftError::Load(LoadError::UnknownClass { name })) => {
            assert_eq!(name, "Nonexistent");
        }
        other => panic!("expected UnknownClass, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    let result = RuleSet::from_json(&registry(), "{ not json");
    assert!(matches!(result, Err(TagsiftError::Json(_))));
}

#[test]
fn missing_rules_key_is_a_json_error() {
    let result = RuleSet::from_json(&registry(), "{}");
    assert!(matches!(result, Err(TagsiftError::Json(_))));
}

#[test]
fn empty_registry_knows_no_builtins() {
    let empty = Registry::new();
    let input = r#"{ "rules": [{ "condition": { "type": "True" } }] }"#;
    assert!(matches!(
        RuleSet::from_json(&empty, input),
        Err(TagsiftError::Load(LoadError::UnknownClass { .. }))
    ));
}

#[test]
fn from_file_round_trip() {
    let path = std::env::temp_dir().join(format!("tagsift_rules_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "rules": [
            { "name": "strip", "condition": { "type": "True" },
              "actions": [{ "type": "DeleteElement", "params": { "tag": "Modality" } }] }
        ] }"#,
    )
    .unwrap();

    let ruleset = RuleSet::from_file(&registry(), &path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut ds = MemoryDataset::new().with("Modality", "MR");
    ruleset.apply(&mut ds);
    assert!(!ds.exists("Modality"));
}

#[test]
fn from_file_missing_path_is_io_error() {
    let result = RuleSet::from_file(&registry(), "/nonexistent/rules.json");
    assert!(matches!(result, Err(TagsiftError::Io(_))));
}
