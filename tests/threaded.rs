use std::sync::Arc;
use std::thread;

use tagsift::{
    CompareOp, Dataset, MemoryDataset, RuleSetBuilder, Value, always, delete_element,
    element_match, empty_element,
};

#[test]
fn apply_across_threads() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule("strip_weight", |r| {
                r.when(always()).then(delete_element("PatientWeight"))
            })
            .rule("blank_non_ct_modality", |r| {
                r.when(tagsift::not(element_match("Modality", CompareOp::Eq, "CT")))
                    .then(empty_element("Modality"))
            })
            .build()
            .unwrap(),
    );

    let mut handles = vec![];

    // Each worker exclusively owns its dataset; the ruleset is shared
    // read-only behind the Arc.
    for modality in ["MR", "CT", "US", "MR"] {
        let rs = Arc::clone(&ruleset);
        handles.push(thread::spawn(move || {
            let mut ds = MemoryDataset::new()
                .with("Modality", modality)
                .with("PatientWeight", "60.5");
            let report = rs.apply(&mut ds);
            (ds, report)
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (ds, report) in &results {
        assert!(!ds.exists("PatientWeight"));
        assert!(report.is_clean());
    }

    // Non-CT modalities were blanked, CT kept its value
    assert_eq!(results[0].0.get("Modality"), Some(&Value::empty()));
    assert_eq!(results[1].0.get("Modality"), Some(&Value::Str("CT".into())));
    assert_eq!(results[2].0.get("Modality"), Some(&Value::empty()));
    assert_eq!(results[1].1.skipped(), &["blank_non_ct_modality"]);
}

#[test]
fn shared_registry_loads_in_parallel() {
    let registry = Arc::new(tagsift::Registry::with_builtins());
    let config = r#"{ "rules": [
        { "name": "strip", "condition": { "type": "True" },
          "actions": [{ "type": "DeleteElement", "params": { "tag": "Modality" } }] }
    ] }"#;

    let mut handles = vec![];
    for _ in 0..4 {
        let reg = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            tagsift::RuleSet::from_json(&reg, config).unwrap().len()
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
