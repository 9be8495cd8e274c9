//! Named default-value factories.
//!
//! A [`FactoryRegistry`] maps names such as `"empty-list"` to functions that
//! build a fresh [`Value`]. It is the lookup table behind
//! [`Create::With`](crate::ops::Create::With) when defaults are chosen by name,
//! for example from the command line. Names are only ever looked up, never
//! interpreted.
//!
//! ```
//! use dotpath::{Value, factory::FactoryRegistry, ops::{self, Create}};
//!
//! let registry = FactoryRegistry::with_defaults();
//! let mut root = Value::doc();
//! let list = registry.get("empty-list").unwrap();
//! ops::get_or_create(&mut root, "jobs.queue", Create::With(list))?;
//!
//! assert_eq!(ops::get_must_exist(&root, "jobs.queue", None)?, &Value::List(vec![]));
//! # Ok::<(), dotpath::Error>(())
//! ```

use std::{collections::BTreeMap, fmt, sync::Arc};

use thiserror::Error;

use crate::{Value, value::Doc};

/// A function producing a fresh default value.
pub type Factory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Error type for factory lookups.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactoryError {
    /// No factory is registered under this name
    #[error("Unknown factory '{name}' (known: {known})")]
    Unknown { name: String, known: String },
}

impl From<FactoryError> for crate::Error {
    fn from(err: FactoryError) -> Self {
        crate::Error::Factory(err)
    }
}

/// Lookup table from names to default-value factories.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: BTreeMap<String, Factory>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in factories:
    /// `empty-map`, `empty-list`, `empty-text`, `zero`, `false` and `null`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("empty-map", || Value::Doc(Doc::new()));
        registry.register("empty-list", || Value::List(Vec::new()));
        registry.register("empty-text", || Value::Text(String::new()));
        registry.register("zero", || Value::Int(0));
        registry.register("false", || Value::Bool(false));
        registry.register("null", || Value::Null);
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Looks up a factory by name.
    pub fn get(&self, name: &str) -> Option<&(dyn Fn() -> Value + Send + Sync)> {
        self.factories.get(name).map(|factory| factory.as_ref())
    }

    /// Looks up a factory by name, failing with the list of known names.
    pub fn resolve(&self, name: &str) -> Result<&(dyn Fn() -> Value + Send + Sync), FactoryError> {
        self.get(name).ok_or_else(|| FactoryError::Unknown {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Builds a value with the named factory.
    pub fn create(&self, name: &str) -> Result<Value, FactoryError> {
        let factory = self.resolve(name)?;
        Ok(factory())
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
