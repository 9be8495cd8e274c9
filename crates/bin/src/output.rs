//! Output formatting helpers for human-readable and JSON output.

use std::io::Write;

use dotpath::{FlatMap, Value};

use crate::cli::Format;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => OutputFormat::Human,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Write a single value.
///
/// Human output prints text without quotes and containers as indented JSON.
pub fn write_value(
    out: &mut impl Write,
    value: &Value,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => match value {
            Value::Text(text) => writeln!(out, "{text}")?,
            Value::Doc(_) | Value::List(_) => writeln!(out, "{}", value.to_json_pretty()?)?,
            leaf => writeln!(out, "{leaf}")?,
        },
        OutputFormat::Json => writeln!(out, "{}", value.to_json_string()?)?,
    }
    Ok(())
}

/// Write the absence of a value.
pub fn write_not_found(
    out: &mut impl Write,
    address: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => writeln!(out, "not found: {address}")?,
        OutputFormat::Json => {
            let value = serde_json::json!({ "path": address, "found": false });
            writeln!(out, "{}", serde_json::to_string(&value)?)?
        }
    }
    Ok(())
}

/// Write a flat map with aligned columns, or as one JSON object.
pub fn write_flat_map(
    out: &mut impl Write,
    map: &FlatMap,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            if map.is_empty() {
                return Ok(());
            }

            let width = map.keys().map(|key| key.chars().count()).max().unwrap_or(0);
            for (path, value) in map {
                writeln!(out, "{path:<width$}  {}", value.to_json_string()?)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(map)?)?,
    }
    Ok(())
}
