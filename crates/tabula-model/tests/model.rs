//! Integration tests for the JSON edit tree.

use proptest::prelude::*;

use tabula_model::{JsonTree, JsonValue};

fn array_of(len: usize) -> JsonValue {
    let items = (0..len)
        .map(|i| JsonValue::Number(serde_json::Number::from(i as i64)))
        .collect();
    JsonValue::Array(items)
}

#[test]
fn edit_session_round_trip() {
    let value: serde_json::Value =
        serde_json::from_str(r#"{"name":"list","items":[{"qty":1}]}"#).unwrap();
    let mut tree = JsonTree::from_value(&JsonValue::from(value));
    let root = tree.root();

    // add a new top-level entry, then an element to the array
    tree.insert(root, Some("owner"), &JsonValue::String("ops".into()))
        .unwrap();
    let items = tree.children(root)[1];
    let added = tree.insert_object(items, None).unwrap();
    assert_eq!(tree.label(added), "[1]");
    tree.insert(added, Some("qty"), &JsonValue::String("2".into()))
        .unwrap();

    let rebuilt = tree.to_value();
    let entries = rebuilt.as_object().unwrap();
    let keys: Vec<&String> = entries.keys().collect();
    assert_eq!(keys, ["name", "items", "owner"]);
    assert_eq!(entries["items"].as_array().unwrap().len(), 2);
}

proptest! {
    #[test]
    fn removal_keeps_array_labels_contiguous(len in 1usize..12, victim in 0usize..12) {
        prop_assume!(victim < len);
        let mut tree = JsonTree::from_value(&array_of(len));
        let root = tree.root();
        let target = tree.children(root)[victim];
        tree.remove(target).unwrap();

        let labels: Vec<String> = tree
            .children(root)
            .to_vec()
            .into_iter()
            .map(|id| tree.label(id))
            .collect();
        let expected: Vec<String> = (0..len - 1).map(|i| format!("[{i}]")).collect();
        prop_assert_eq!(labels, expected);

        // relative order of survivors is preserved
        let survivors: Vec<String> = tree
            .children(root)
            .to_vec()
            .into_iter()
            .filter_map(|id| tree.scalar_text(id))
            .collect();
        let expected_values: Vec<String> = (0..len)
            .filter(|i| *i != victim)
            .map(|i| i.to_string())
            .collect();
        prop_assert_eq!(survivors, expected_values);
    }
}
