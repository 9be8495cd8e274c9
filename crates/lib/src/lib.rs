//!
//! dotpath: reads, writes and existence checks at dotted addresses ("a.b.c")
//! inside nested documents.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: What can be stored. A `Value::Doc` is a plain
//!   string-keyed container; everything else is a leaf, lists included.
//! * **Addresses (`path::Address`)**: A dotted path split exactly on `.`, or the
//!   null address referring to the document itself.
//! * **The sentinel (`lookup::Lookup::NotFound`)**: What a guarded read returns
//!   when nothing is stored. A stored `Null` is found; only absence is
//!   `NotFound`.
//! * **The walk (`traverse::walk`)**: One traversal routine driven by a
//!   per-segment handler. Every operation is a handler.
//! * **Operations (`ops`)**: Guarded and required reads, existence checks,
//!   get-or-create, guarded writes with overwrite/dry-run/conflict policies,
//!   removal, and the idempotent `leaf_node` initializer.
//! * **Flat maps (`flat`)**: Conversion between nested documents and
//!   `{"a.b.c": leaf}` maps.
//!
//! ## Example
//!
//! ```
//! use dotpath::{Value, WriteOptions, ops};
//!
//! let mut config = Value::from_json_str(r#"{"server": {"port": 3000}}"#)?;
//!
//! assert!(ops::exists(&config, "server.port")?);
//! assert!(ops::get_if_exists(&config, "server.host")?.is_not_found());
//!
//! ops::set_value(&mut config, "server.host", "localhost", WriteOptions::new())?;
//! assert_eq!(config.to_json_string()?, r#"{"server":{"host":"localhost","port":3000}}"#);
//! # Ok::<(), dotpath::Error>(())
//! ```
//!
//! Documents are not synchronized. Sharing one across threads requires the
//! caller to serialize access, including around `leaf_node`.

pub mod errors;
pub mod factory;
pub mod flat;
pub mod json;
pub mod lookup;
pub mod ops;
pub mod path;
pub mod traverse;
pub mod value;

pub use errors::AccessError;
pub use factory::{FactoryError, FactoryRegistry};
pub use flat::{FlatMap, expand, flatten};
pub use lookup::{Lookup, NOT_FOUND, NotFound, is_not_found};
pub use ops::{
    Create, WriteOptions, Written, exists, get_if_exists, get_must_exist, get_or, get_or_create,
    leaf_node, remove, set_value,
};
pub use path::{Address, IntoAddress, Path, PathError, join};
pub use value::{Doc, Value};

/// Result type used throughout the dotpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dotpath library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured address errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured access errors from the traversal and operations
    #[error(transparent)]
    Access(errors::AccessError),

    /// Structured factory errors from the factory module
    #[error(transparent)]
    Factory(factory::FactoryError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Access(_) => "access",
            Error::Factory(_) => "factory",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a required path was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a write conflict (existing value or
    /// blocking leaf).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error was caused by the address itself.
    pub fn is_invalid_address(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_invalid_address(),
            _ => false,
        }
    }

    /// Get the dotted address involved, if the error carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Access(access_err) => Some(access_err.path()),
            _ => None,
        }
    }
}
