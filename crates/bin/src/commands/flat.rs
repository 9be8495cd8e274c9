//! Flat map commands: flatten, expand and join.

use std::io::Write;

use dotpath::{FlatMap, Value, flat};

use crate::cli::JoinArgs;
use crate::document::Document;
use crate::output::{OutputFormat, write_flat_map, write_value};

/// Run the flatten command
pub fn flatten(
    doc: &Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    write_flat_map(out, &flat::flatten(doc.root()), format)
}

/// Run the expand command. The document's top-level keys are dotted paths.
pub fn expand(
    doc: &Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let map: FlatMap = doc
        .root()
        .as_doc()
        .map(|entries| {
            entries
                .iter()
                .map(|(path, value)| (path.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    write_value(out, &flat::expand(&map)?, format)
}

/// Run the join command
pub fn join(
    args: &JoinArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    write_value(out, &Value::Text(dotpath::join(&args.parts)), format)
}
