//! Integration tests for JSON record transfer and inspection.

use ctk_cli::json::{record_from_json, transfer_json, transfer_json_each};
use ctk_transfer::{SkipReason, SkipSet};
use serde_json::json;

#[test]
fn transfer_onto_existing_target() {
    let source = json!({
        "Count": 3,
        "FirstProperty": "Hi",
        "ReferenceProperty": "2024-03-15T09:30:00",
        "Tags": ["a"],
    });
    let target = json!({
        "Count": 1.5,
        "Extra": true,
        "FirstProperty": null,
        "ReferenceProperty": "old",
    });

    let (result, report) =
        transfer_json(&source, Some(&target), &SkipSet::parse("referenceproperty")).unwrap();

    let rendered = serde_json::to_string_pretty(&result).unwrap();
    insta::assert_snapshot!(rendered, @r#"
    {
      "Count": 1.5,
      "Extra": true,
      "FirstProperty": "Hi",
      "ReferenceProperty": "old"
    }
    "#);
    assert_eq!(report.transferred, ["FirstProperty"]);
    assert_eq!(report.skip_reason("Count"), Some(SkipReason::IncompatibleType));
    assert_eq!(report.skip_reason("ReferenceProperty"), Some(SkipReason::Excluded));
    assert_eq!(report.skip_reason("Tags"), Some(SkipReason::MissingOnTarget));
}

#[test]
fn transfer_without_target_copies_everything_not_skipped() {
    let source = json!({ "A": 1, "B": "two", "C": [3] });

    let (result, report) = transfer_json(&source, None, &SkipSet::parse("b")).unwrap();

    assert_eq!(result, json!({ "A": 1, "B": null, "C": [3] }));
    assert_eq!(report.transferred_count(), 2);
}

#[test]
fn transfer_rejects_non_object_source() {
    let error = transfer_json(&json!("text"), None, &SkipSet::new()).unwrap_err();
    assert_eq!(
        format!("{error:#}"),
        "read source object: expected a JSON object, found a string"
    );
}

#[test]
fn inspect_lists_inferred_descriptors() {
    let record = record_from_json(&json!({ "Age": 30, "Name": "Ana", "Note": null })).unwrap();

    let rendered = serde_json::to_string_pretty(&record.descriptors()).unwrap();
    insta::assert_snapshot!(rendered, @r#"
    [
      {
        "name": "Age",
        "value_type": "i64",
        "readable": true,
        "writable": true
      },
      {
        "name": "Name",
        "value_type": "text",
        "readable": true,
        "writable": true
      },
      {
        "name": "Note",
        "value_type": "any",
        "readable": true,
        "writable": true
      }
    ]
    "#);
}

#[test]
fn arrays_transfer_element_by_element() {
    let source = json!([{ "A": 1, "B": "x" }, { "A": 2, "B": "y" }]);
    let target = json!({ "A": 0, "C": true });

    let (result, reports) = transfer_json_each(&source, Some(&target), &SkipSet::new()).unwrap();

    assert_eq!(
        result,
        json!([{ "A": 1, "C": true }, { "A": 2, "C": true }])
    );
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].skip_reason("B"), Some(SkipReason::MissingOnTarget));
}

#[test]
fn arrays_pair_with_target_arrays_by_index() {
    let source = json!([{ "A": 1 }, { "A": 2 }]);
    let target = json!([{ "A": 10, "Z": "first" }, { "A": 20, "Z": "second" }]);

    let (result, _) = transfer_json_each(&source, Some(&target), &SkipSet::new()).unwrap();
    assert_eq!(
        result,
        json!([{ "A": 1, "Z": "first" }, { "A": 2, "Z": "second" }])
    );

    let short = json!([{ "A": 10 }]);
    let error = transfer_json_each(&source, Some(&short), &SkipSet::new()).unwrap_err();
    assert_eq!(error.to_string(), "source has 2 objects but target has 1");
}

#[test]
fn array_elements_default_to_blank_targets() {
    let source = json!([{ "A": 1, "B": "x" }, 3]);
    let error = transfer_json_each(&source, None, &SkipSet::new()).unwrap_err();
    assert_eq!(
        format!("{error:#}"),
        "read source array: element 1: expected a JSON object, found a number"
    );

    let source = json!([{ "A": 1, "B": "x" }]);
    let (result, reports) = transfer_json_each(&source, None, &SkipSet::parse("b")).unwrap();
    assert_eq!(result, json!([{ "A": 1, "B": null }]));
    assert_eq!(reports[0].skip_reason("B"), Some(SkipReason::Excluded));
}

#[test]
fn single_objects_yield_one_report() {
    let source = json!({ "Id": u64::MAX });
    let (result, reports) = transfer_json_each(&source, None, &SkipSet::new()).unwrap();
    assert_eq!(result, source);
    assert_eq!(reports.len(), 1);
}
