//! Tests for the public operations, one section per operation.
//!
//! The scenario tests at the end follow a document through a sequence of
//! operations the way an application configuring itself would.

use dotpath::{
    AccessError, Create, Doc, Error, Lookup, NOT_FOUND, Value, WriteOptions, address, ops,
};

use crate::helpers::*;

// ===== GUARDED READ =====

#[test]
fn test_missing_addresses_are_not_found() {
    let root = service_config();
    for address in [
        "missing",
        "server.host",
        "server.port.value",
        "name.first",
        "server..port",
        "",
        " server",
    ] {
        assert_absent(&root, address);
    }
}

#[test]
fn test_falsy_values_are_found() {
    let root = service_config();
    assert_value_at(&root, "server.tls", false);
    assert_value_at(&root, "owner", Value::Null);
    assert_value_at(&root, "retries", 0);
    assert_value_at(&root, "motd", "");
    for address in ["server.tls", "owner", "retries", "motd"] {
        assert!(ops::exists(&root, address).unwrap(), "{address} should exist");
    }
}

#[test]
fn test_lists_are_leaves_for_reads() {
    let root = service_config();
    assert_value_at(&root, "server.hosts", vec!["a", "b"]);
    assert_absent(&root, "server.hosts.0");
}

#[test]
fn test_numeric_address() {
    let root = Value::Doc(Doc::new().with("7", "seven"));
    assert_eq!(
        ops::get_if_exists(&root, 7).unwrap(),
        Lookup::Found(&Value::from("seven"))
    );
    assert!(ops::get_if_exists(&root, 8u32).unwrap().is_not_found());
}

#[test]
fn test_non_finite_address_is_invalid() {
    let root = Value::doc();
    let err = ops::get_if_exists(&root, f64::NAN).unwrap_err();
    assert!(err.is_invalid_address());
    assert_eq!(err.module(), "path");
}

#[test]
fn test_get_or_uses_fallback_only_when_absent() {
    let root = service_config();
    let fallback = Value::from("fallback");
    assert_eq!(ops::get_or(&root, "owner", &fallback).unwrap(), &Value::Null);
    assert_eq!(ops::get_or(&root, "nobody", &fallback).unwrap(), &fallback);
}

#[test]
fn test_reads_reject_leaf_roots() {
    for root in [Value::Null, Value::from(1), Value::from("doc"), Value::from(vec![1])] {
        let err = ops::get_if_exists(&root, "a").unwrap_err();
        assert!(
            matches!(err, Error::Access(AccessError::InvalidRoot { .. })),
            "root {root:?} was accepted"
        );
    }
}

// ===== REQUIRED READ =====

#[test]
fn test_get_must_exist_messages() {
    let root = service_config();
    assert_eq!(ops::get_must_exist(&root, "server.port", None).unwrap(), &Value::Int(3000));

    let err = ops::get_must_exist(&root, "server.http.port", None).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), Some("server.http.port"));
    assert_eq!(err.to_string(), "Path 'server.http.port' does not exist");

    let err = ops::get_must_exist(&root, "server.http.port", Some("set server.http.port"))
        .unwrap_err();
    assert_eq!(err.to_string(), "set server.http.port");
    assert_eq!(err.path(), Some("server.http.port"));
}

// ===== GET OR CREATE =====

#[test]
fn test_get_or_create_vivifies_every_level() {
    let mut root = Value::doc();
    let created = ops::get_or_create(&mut root, "a.b.c", Create::Container).unwrap();
    assert_eq!(created, Lookup::Found(&mut Value::doc()));

    for address in ["a", "a.b", "a.b.c"] {
        let value = ops::get_must_exist(&root, address, None).unwrap();
        assert!(value.is_doc(), "{address} should be a doc");
    }
}

#[test]
fn test_get_or_create_returns_existing() {
    let mut root = service_config();
    let port = ops::get_or_create(&mut root, "server.port", Create::Container).unwrap();
    assert_eq!(port, Lookup::Found(&mut Value::Int(3000)));
    assert_eq!(root, service_config());
}

#[test]
fn test_get_or_create_slot_is_writable() {
    let mut root = Value::doc();
    if let Lookup::Found(slot) =
        ops::get_or_create(&mut root, address!("jobs", "queue"), Create::Container).unwrap()
    {
        if let Some(doc) = slot.as_doc_mut() {
            doc.insert("head", 1);
        }
    }
    assert_value_at(&root, "jobs.queue.head", 1);
}

#[test]
fn test_get_or_create_check_only_never_creates() {
    let mut root = service_config();
    let result = ops::get_or_create(&mut root, "server.http.port", Create::CheckOnly).unwrap();
    assert!(result.is_not_found());
    let result = ops::get_or_create(&mut root, "name.first", Create::CheckOnly).unwrap();
    assert!(result.is_not_found());
    assert_eq!(root, service_config());
}

#[test]
fn test_get_or_create_root_address() {
    let mut root = service_config();
    let whole = ops::get_or_create(&mut root, None::<&str>, Create::Container).unwrap();
    assert_eq!(whole.found().cloned(), Some(service_config()));
}

// ===== GUARDED WRITE =====

#[test]
fn test_stored_values_read_back() {
    let values = [
        Value::Null,
        Value::from(false),
        Value::from(0),
        Value::from(""),
        Value::from(1.5),
        Value::from(vec![1, 2]),
        Value::doc(),
    ];
    for value in values {
        let mut root = Value::doc();
        let written = ops::set_value(&mut root, "a.b", value.clone(), WriteOptions::new())
            .unwrap()
            .cloned();
        assert_eq!(written, Some(value.clone()));
        assert_value_at(&root, "a.b", value.clone());
        assert!(ops::exists(&root, "a.b").unwrap());
    }
}

#[test]
fn test_overwrite_protection() {
    let mut root = Value::doc();
    ops::set_value(&mut root, "k", "v1", WriteOptions::new()).unwrap();

    let err = ops::set_value(&mut root, "k", "v2", WriteOptions::new()).unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("'k'"));
    assert_value_at(&root, "k", "v1");

    ops::set_value(&mut root, "k", "v2", WriteOptions::new().overwrite()).unwrap();
    assert_value_at(&root, "k", "v2");
}

#[test]
fn test_overwrite_protects_stored_null() {
    let mut root = service_config();
    let err = ops::set_value(&mut root, "owner", "me", WriteOptions::new()).unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::Overwrite { .. })));
}

#[test]
fn test_hierarchy_conflict_names_blocking_segment() {
    let mut root = doc_from_json(r#"{"a": {"b": "string"}}"#);
    let err = ops::set_value(&mut root, "a.b.c.d", 1, WriteOptions::new()).unwrap_err();
    match err {
        Error::Access(AccessError::HierarchyConflict {
            path,
            segment,
            found,
        }) => {
            assert_eq!(path, "a.b.c.d");
            assert_eq!(segment, "a.b");
            assert_eq!(found, "text");
        }
        other => panic!("expected hierarchy conflict, got {other:?}"),
    }
}

#[test]
fn test_hard_write_hierarchy_replaces_leaf() {
    let mut root = doc_from_json(r#"{"a": "string"}"#);
    let options = WriteOptions::new().hard_write_hierarchy();
    ops::set_value(&mut root, "a.b", 1, options).unwrap();
    assert_eq!(root, doc_from_json(r#"{"a": {"b": 1}}"#));
}

#[test]
fn test_hard_write_hierarchy_still_respects_overwrite() {
    let mut root = doc_from_json(r#"{"a": {"b": 1}}"#);
    let err =
        ops::set_value(&mut root, "a.b", 2, WriteOptions::new().hard_write_hierarchy()).unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::Overwrite { .. })));
}

#[test]
fn test_ignore_errors_is_a_silent_no_op() {
    let mut root = doc_from_json(r#"{"a": "string", "b": 1}"#);
    let before = root.clone();
    let options = WriteOptions::new().ignore_errors();

    assert_eq!(ops::set_value(&mut root, "a.b", 1, options).unwrap(), None);
    assert_eq!(ops::set_value(&mut root, "b", 2, options).unwrap(), None);
    assert_eq!(root, before);

    // Non-conflicting writes still happen
    assert!(ops::set_value(&mut root, "c", 3, options).unwrap().is_some());
}

#[test]
fn test_dry_run_has_no_observable_effect() {
    let addresses = ["server.port", "server.new", "fresh.deep.key", "name.first", "owner"];
    let option_sets = [
        WriteOptions::new().dry_run(),
        WriteOptions::new().dry_run().overwrite(),
        WriteOptions::new().dry_run().hard_write_hierarchy(),
        WriteOptions::new().dry_run().ignore_errors(),
    ];
    for address in addresses {
        for options in option_sets {
            let mut root = service_config();
            // Conflicts may still be reported, but nothing is ever written
            if let Ok(result) = ops::set_value(&mut root, address, 42, options) {
                assert_eq!(result, None, "dry run on {address} with {options:?}");
            }
            assert_eq!(root, service_config(), "dry run on {address} with {options:?}");
        }
    }
}

#[test]
fn test_dry_run_reports_blocking_leaf() {
    let mut root = service_config();
    let err = ops::set_value(&mut root, "name.first", 1, WriteOptions::new().dry_run()).unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::HierarchyConflict { .. })));
}

#[test]
fn test_root_address_cannot_be_written() {
    let mut root = Value::doc();
    for result in [
        ops::set_value(&mut root, None::<&str>, 1, WriteOptions::new()).map(|_| ()),
        ops::leaf_node(&mut root, None::<&str>, 1).map(|_| ()),
        ops::remove(&mut root, None::<&str>).map(|_| ()),
    ] {
        assert!(result.unwrap_err().is_invalid_address());
    }
}

// ===== REMOVE =====

#[test]
fn test_remove_returns_removed_value() {
    let mut root = service_config();
    let removed = ops::remove(&mut root, "server.hosts").unwrap();
    assert_eq!(removed, Lookup::Found(Value::from(vec!["a", "b"])));
    assert_absent(&root, "server.hosts");
    assert_value_at(&root, "server.port", 3000);
}

#[test]
fn test_remove_stored_null_is_found() {
    let mut root = service_config();
    assert_eq!(ops::remove(&mut root, "owner").unwrap(), Lookup::Found(Value::Null));
    assert!(ops::remove(&mut root, "owner").unwrap() == NOT_FOUND);
}

#[test]
fn test_remove_absent_path_does_not_throw() {
    let mut root = Value::doc();
    assert!(ops::remove(&mut root, "x.y").unwrap().is_not_found());
}

#[test]
fn test_remove_through_leaf_is_not_found() {
    let mut root = service_config();
    assert!(ops::remove(&mut root, "server.port.value").unwrap().is_not_found());
    assert_eq!(root, service_config());
}

// ===== LEAF NODE =====

#[test]
fn test_leaf_node_is_idempotent() {
    let mut root = Value::doc();
    assert_eq!(*ops::leaf_node(&mut root, "a.b", "v1").unwrap(), "v1");
    assert_eq!(*ops::leaf_node(&mut root, "a.b", "v2").unwrap(), "v1");
    assert_value_at(&root, "a.b", "v1");
}

#[test]
fn test_leaf_node_keeps_falsy_existing() {
    let mut root = service_config();
    assert_eq!(*ops::leaf_node(&mut root, "server.tls", true).unwrap(), false);
    assert_eq!(*ops::leaf_node(&mut root, "owner", "me").unwrap(), Value::Null);
}

#[test]
fn test_leaf_node_hierarchy_conflict_propagates() {
    let mut root = service_config();
    let err = ops::leaf_node(&mut root, "name.first", "x").unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::HierarchyConflict { .. })));
}

#[test]
fn test_leaf_node_counter() {
    let mut root = Value::doc();
    for _ in 0..3 {
        let counter = ops::leaf_node(&mut root, "stats.hits", 0).unwrap();
        let next = counter.as_int().unwrap_or_default() + 1;
        *counter = Value::from(next);
    }
    assert_value_at(&root, "stats.hits", 3);
}

// ===== SCENARIOS =====

#[test]
fn test_server_port_scenario() {
    let mut config = Value::doc();

    let written = ops::set_value(&mut config, "server.port", 3000, WriteOptions::new()).unwrap();
    assert_eq!(written, Some(&Value::Int(3000)));
    assert_eq!(config, doc_from_json(r#"{"server": {"port": 3000}}"#));

    let err = ops::set_value(&mut config, "server.port", 8080, WriteOptions::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Access(AccessError::Overwrite { ref path }) if path == "server.port"
    ));

    let written =
        ops::set_value(&mut config, "server.port", 8080, WriteOptions::new().overwrite()).unwrap();
    assert_eq!(written, Some(&Value::Int(8080)));
    assert_value_at(&config, "server.port", 8080);
}

#[test]
fn test_lazy_cache_scenario() {
    let mut cache = Value::doc();
    let users = ["alice", "bob", "alice"];
    for user in users {
        let sessions = ops::leaf_node(&mut cache, address!("sessions", user), Vec::<Value>::new())
            .unwrap();
        if let Value::List(items) = sessions {
            items.push(Value::from(items.len() as i64));
        }
    }
    assert_value_at(&cache, "sessions.alice", vec![0, 1]);
    assert_value_at(&cache, "sessions.bob", vec![0]);
}
