//! Loading and saving the document a command operates on.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use dotpath::Value;

use crate::output::{OutputFormat, write_value};

/// Where the document came from, and so where changes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A JSON file, saved in place.
    File(PathBuf),
    /// Standard input; changes are printed instead of saved.
    Stdin,
}

/// A JSON document loaded for one command.
#[derive(Debug)]
pub struct Document {
    root: Value,
    source: Source,
}

impl Document {
    /// Load from `file`, or from stdin when no file is given.
    pub fn load(file: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match file {
            Some(path) => Self::load_file(path),
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Self::from_input(&input)
            }
        }
    }

    /// Parse a document that arrived on stdin.
    pub fn from_input(input: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            root: parse_document(input)?,
            source: Source::Stdin,
        })
    }

    fn load_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let root = match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded document");
                parse_document(&contents)
                    .map_err(|e| format!("Failed to load {}: {e}", path.display()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "document does not exist, starting empty");
                Value::doc()
            }
            Err(e) => return Err(format!("Failed to read {}: {e}", path.display()).into()),
        };
        Ok(Self {
            root,
            source: Source::File(path.to_path_buf()),
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// True if changes are saved to a file rather than printed.
    pub fn is_file(&self) -> bool {
        matches!(self.source, Source::File(_))
    }

    /// Persist a change and report it.
    ///
    /// File documents are saved in place and `report`, if any, is printed.
    /// Documents read from stdin are printed whole instead, so commands can be
    /// chained in a pipeline.
    pub fn commit(
        &self,
        out: &mut impl Write,
        report: Option<&Value>,
        format: OutputFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.source {
            Source::File(path) => {
                let mut contents = self.root.to_json_pretty()?;
                contents.push('\n');
                fs::write(path, contents)
                    .map_err(|e| format!("Failed to save {}: {e}", path.display()))?;
                tracing::info!(path = %path.display(), "saved document");
                if let Some(value) = report {
                    write_value(out, value, format)?;
                }
            }
            Source::Stdin => write_value(out, &self.root, format)?,
        }
        Ok(())
    }
}

/// Parse a whole document. Blank input is an empty document.
fn parse_document(input: &str) -> Result<Value, Box<dyn std::error::Error>> {
    if input.trim().is_empty() {
        return Ok(Value::doc());
    }
    let value = Value::from_json_str(input)?;
    if !value.is_doc() {
        return Err(format!(
            "expected a JSON object at the top level, found {}",
            value.type_name()
        )
        .into());
    }
    Ok(value)
}

/// Parse a value given on the command line: JSON if it parses, otherwise the
/// text itself.
pub fn parse_value(input: &str) -> Value {
    Value::from_json_str(input).unwrap_or_else(|_| Value::Text(input.to_string()))
}
