//! Commands that change the document: set, init, create and remove.

use std::io::Write;

use dotpath::{Create, FactoryRegistry, Lookup, WriteOptions, Written, ops};

use crate::cli::{AddressArgs, CreateArgs, InitArgs, SetArgs};
use crate::document::{Document, parse_value};
use crate::output::{OutputFormat, write_not_found, write_value};

fn write_options(args: &SetArgs) -> WriteOptions {
    WriteOptions {
        overwrite: args.overwrite,
        dry_run: args.dry_run,
        ignore_errors: args.ignore_errors,
        hard_write_hierarchy: args.hard,
    }
}

/// Run the set command
pub fn set(
    args: &SetArgs,
    doc: &mut Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = args.address.as_str();
    let options = write_options(args);
    let value = parse_value(&args.value);

    if options.dry_run {
        let would_write = matches!(
            ops::write(doc.root_mut(), address, value, options)?,
            Written::DryRun { would_write: true }
        );
        match format {
            OutputFormat::Human if would_write => writeln!(out, "dry run: would write {address}")?,
            OutputFormat::Human => writeln!(out, "dry run: would skip {address}")?,
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "path": address,
                    "dry_run": true,
                    "would_write": would_write,
                });
                writeln!(out, "{}", serde_json::to_string(&report)?)?
            }
        }
        return Ok(());
    }

    let written = ops::set_value(doc.root_mut(), address, value, options)?.cloned();
    if written.is_none() {
        tracing::warn!(path = %address, "write skipped");
    }
    doc.commit(out, written.as_ref(), format)
}

/// Run the init command
pub fn init(
    args: &InitArgs,
    doc: &mut Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let default = parse_value(&args.default);
    let stored = ops::leaf_node(doc.root_mut(), args.address.as_str(), default)?.clone();
    doc.commit(out, Some(&stored), format)
}

/// Run the create command
pub fn create(
    args: &CreateArgs,
    doc: &mut Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = args.address.as_str();
    let registry = FactoryRegistry::with_defaults();
    let create = if args.check_only {
        Create::CheckOnly
    } else {
        Create::With(registry.resolve(&args.default)?)
    };

    let slot = ops::get_or_create(doc.root_mut(), address, create)?.map(|value| value.clone());
    match slot {
        Lookup::Found(value) if args.check_only => write_value(out, &value, format),
        Lookup::Found(value) => doc.commit(out, Some(&value), format),
        Lookup::NotFound => write_not_found(out, address, format),
    }
}

/// Run the remove command
pub fn remove(
    args: &AddressArgs,
    doc: &mut Document,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let address = args.address.as_str();
    match ops::remove(doc.root_mut(), address)? {
        Lookup::Found(removed) => doc.commit(out, Some(&removed), format),
        Lookup::NotFound => {
            // Missing parents may have been created on the way down
            if doc.is_file() {
                write_not_found(out, address, format)?;
            }
            doc.commit(out, None, format)
        }
    }
}
