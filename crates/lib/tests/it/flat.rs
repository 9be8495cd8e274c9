//! Flatten/expand behavior and the round-trip law.

use dotpath::{Doc, FlatMap, Value, expand, flatten, ops};

use crate::helpers::*;

#[test]
fn test_round_trip_plain_documents() {
    let documents = [
        r#"{}"#,
        r#"{"a": 1}"#,
        r#"{"a": {"b": {"c": null}}, "d": [1, {"x": 2}], "e": ""}"#,
        r#"{"server": {"port": 3000, "tls": false, "hosts": ["a", "b"]}, "name": "svc"}"#,
        r#"{"a": {"b": 1, "c": {"d": 2.5, "e": [[]]}}, "f": {"g": true}}"#,
    ];
    for json in documents {
        let doc = doc_from_json(json);
        assert_eq!(expand(&flatten(&doc)).unwrap(), doc, "round trip of {json}");
    }
}

#[test]
fn test_round_trip_service_config() {
    let doc = service_config();
    assert_eq!(expand(&flatten(&doc)).unwrap(), doc);
}

#[test]
fn test_flatten_keys_are_readable_addresses() {
    let doc = service_config();
    for (address, leaf) in flatten(&doc) {
        assert_value_at(&doc, &address, leaf);
    }
}

#[test]
fn test_flatten_drops_empty_nested_docs() {
    let doc = doc_from_json(r#"{"a": {}, "b": {"c": {}}, "d": 1}"#);
    let map = flatten(&doc);
    assert_eq!(map.keys().collect::<Vec<_>>(), ["d"]);
    assert_eq!(expand(&map).unwrap(), doc_from_json(r#"{"d": 1}"#));
}

#[test]
fn test_expand_builds_shared_prefixes() {
    let map: FlatMap = [
        ("db.primary.host", Value::from("10.0.0.1")),
        ("db.primary.port", Value::from(5432)),
        ("db.replica.host", Value::from("10.0.0.2")),
        ("debug", Value::from(false)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    let doc = expand(&map).unwrap();
    assert_value_at(&doc, "db.primary.port", 5432);
    assert_value_at(&doc, "debug", false);
    let db = ops::get_must_exist(&doc, "db", None).unwrap();
    assert_eq!(db.as_doc().map(Doc::len), Some(2));
}

#[test]
fn test_expand_conflicting_entries() {
    let mut map = FlatMap::new();
    map.insert("a".to_string(), Value::from(1));
    map.insert("a.b".to_string(), Value::from(2));
    let err = expand(&map).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.path(), Some("a.b"));
}

#[test]
fn test_flatten_of_leaf_root_is_empty() {
    assert!(flatten(&Value::Null).is_empty());
}
