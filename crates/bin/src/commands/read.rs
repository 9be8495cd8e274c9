//! Read-only commands: get, require and exists.

use std::io::Write;

use dotpath::{Lookup, Value, ops};

use crate::cli::{AddressArgs, GetArgs, RequireArgs};
use crate::document::{Document, parse_value};
use crate::output::{OutputFormat, write_not_found, write_value};

/// Run the get command
pub fn get(
    args: &GetArgs,
    doc: &Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = args.address.as_str();

    if let Some(fallback) = &args.fallback {
        let fallback = parse_value(fallback);
        return write_value(out, ops::get_or(doc.root(), address, &fallback)?, format);
    }

    match ops::get_if_exists(doc.root(), address)? {
        Lookup::Found(value) => write_value(out, value, format),
        Lookup::NotFound => write_not_found(out, address, format),
    }
}

/// Run the require command
pub fn require(
    args: &RequireArgs,
    doc: &Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = ops::get_must_exist(doc.root(), args.address.as_str(), args.message.as_deref())?;
    write_value(out, value, format)
}

/// Run the exists command. Returns whether the address holds a value.
pub fn exists(
    args: &AddressArgs,
    doc: &Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let found = ops::exists(doc.root(), args.address.as_str())?;
    write_value(out, &Value::Bool(found), format)?;
    Ok(found)
}
