//! Conversion between nested documents and flat dotted-key maps.
//!
//! [`flatten`] walks a document depth first and emits one entry per leaf,
//! keyed by its dotted path. Lists are leaves: they are emitted whole, never
//! indexed into. [`expand`] rebuilds a document from such a map by writing
//! every entry with overwrite enabled.
//!
//! For documents made only of nested docs and leaves, with no empty nested
//! docs and no dots inside keys, `expand(&flatten(x))` equals `x`.
//!
//! ```
//! use dotpath::{Doc, Value, flat};
//!
//! let doc = Value::Doc(
//!     Doc::new()
//!         .with("server", Doc::new().with("port", 80).with("hosts", vec!["a", "b"]))
//!         .with("debug", false),
//! );
//! let map = flat::flatten(&doc);
//! assert_eq!(map.keys().collect::<Vec<_>>(), ["debug", "server.hosts", "server.port"]);
//! assert_eq!(flat::expand(&map)?, doc);
//! # Ok::<(), dotpath::Error>(())
//! ```

use std::collections::BTreeMap;

use crate::{
    Result, Value,
    ops::{WriteOptions, set_value},
    value::Doc,
};

/// A single-level map from dotted path to leaf value.
pub type FlatMap = BTreeMap<String, Value>;

/// Flattens a document into dotted paths and leaf values.
///
/// A root that is not a doc has no addressable keys and yields an empty map.
pub fn flatten(container: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    if let Some(doc) = container.as_doc() {
        flatten_into(doc, None, &mut out);
    }
    out
}

fn flatten_into(doc: &Doc, prefix: Option<&str>, out: &mut FlatMap) {
    for (key, value) in doc.iter() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Doc(child) => flatten_into(child, Some(&path), out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Builds a document from dotted paths and values.
///
/// Entries sharing a prefix compose into the same nested docs.
///
/// # Errors
/// [`AccessError::HierarchyConflict`](crate::errors::AccessError::HierarchyConflict)
/// if one entry's path runs through another entry's leaf, such as `a` and
/// `a.b`.
pub fn expand(map: &FlatMap) -> Result<Value> {
    let mut root = Value::doc();
    let options = WriteOptions::new().overwrite();
    for (path, value) in map {
        set_value(&mut root, path, value.clone(), options)?;
    }
    tracing::debug!(entries = map.len(), "expanded flat map");
    Ok(root)
}
