//! Error types for path access operations.
//!
//! These are the failures of the traversal engine and the operations built on
//! it. Every variant carries the full dotted address being processed so that
//! messages are self-describing. Reads that simply find nothing are not errors:
//! they return [`Lookup::NotFound`](crate::Lookup::NotFound).

use thiserror::Error;

use crate::path::Address;

/// Structured error types for path access.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The target is not a container
    #[error("Invalid root for '{path}': expected a doc, found {found}")]
    InvalidRoot { path: String, found: &'static str },

    /// A required read found nothing
    #[error("{message}")]
    PathRequired { path: String, message: String },

    /// A write hit an occupied slot without overwrite permission
    #[error("Refusing to overwrite existing value at '{path}'")]
    Overwrite { path: String },

    /// An intermediate segment holds a leaf value, blocking descent
    #[error("Cannot descend through '{segment}' at '{path}': it holds a {found}")]
    HierarchyConflict {
        path: String,
        segment: String,
        found: &'static str,
    },

    /// A walk ran out of segments without producing a result
    #[error("Traversal of '{path}' ended without a result")]
    Incomplete { path: String },
}

impl AccessError {
    pub(crate) fn path_required(address: &Address, message: Option<&str>) -> Self {
        let path = address.to_string();
        let message = match message {
            Some(message) => message.to_string(),
            None => format!("Path '{path}' does not exist"),
        };
        AccessError::PathRequired { path, message }
    }

    /// Check if this error means a required path was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::PathRequired { .. })
    }

    /// Check if this error is an overwrite refusal
    pub fn is_overwrite(&self) -> bool {
        matches!(self, AccessError::Overwrite { .. })
    }

    /// Check if this error is a hierarchy conflict
    pub fn is_hierarchy_conflict(&self) -> bool {
        matches!(self, AccessError::HierarchyConflict { .. })
    }

    /// Check if this error is a write conflict of either kind
    pub fn is_conflict(&self) -> bool {
        self.is_overwrite() || self.is_hierarchy_conflict()
    }

    /// Check if the target was not a container
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, AccessError::InvalidRoot { .. })
    }

    /// Get the full address this error refers to
    pub fn path(&self) -> &str {
        match self {
            AccessError::InvalidRoot { path, .. }
            | AccessError::PathRequired { path, .. }
            | AccessError::Overwrite { path }
            | AccessError::HierarchyConflict { path, .. }
            | AccessError::Incomplete { path } => path,
        }
    }
}

// Conversion from AccessError to the main Error type
impl From<AccessError> for crate::Error {
    fn from(err: AccessError) -> Self {
        crate::Error::Access(err)
    }
}
