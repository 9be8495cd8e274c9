//! Public path operations.
//!
//! Every operation here is a small [`StepHandler`] plus one call to
//! [`walk`]. The handlers differ only in what they do at a segment:
//!
//! | Operation            | Missing key            | Leaf in the way        | Final segment           |
//! |----------------------|------------------------|------------------------|-------------------------|
//! | [`get_if_exists`]    | `NotFound`             | `NotFound`             | take                    |
//! | [`get_or_create`]    | create doc / seed      | `HierarchyConflict`    | take                    |
//! | [`set_value`]        | create doc             | per [`WriteOptions`]   | write or refuse         |
//! | [`remove`]           | create doc             | `NotFound`             | remove                  |
//!
//! # Example
//!
//! ```
//! use dotpath::{Value, WriteOptions, ops};
//!
//! let mut config = Value::doc();
//! ops::set_value(&mut config, "server.port", 3000, WriteOptions::default())?;
//!
//! assert!(ops::exists(&config, "server.port")?);
//! assert!(ops::set_value(&mut config, "server.port", 8080, WriteOptions::default()).is_err());
//!
//! let port = ops::set_value(&mut config, "server.port", 8080, WriteOptions::new().overwrite())?;
//! assert_eq!(port, Some(&Value::Int(8080)));
//! # Ok::<(), dotpath::Error>(())
//! ```

use crate::{
    Result, Value,
    errors::AccessError,
    lookup::{Lookup, NOT_FOUND, NotFound},
    path::{Address, IntoAddress, PathError},
    traverse::{Cursor, Flow, Step, StepHandler, Walked, walk},
};

/// Flags for [`set_value`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace a value already stored at the address.
    pub overwrite: bool,
    /// Decide what would happen without touching the document.
    pub dry_run: bool,
    /// Turn conflicts into a silent no-op instead of an error.
    pub ignore_errors: bool,
    /// Replace leaf values that block the path with fresh docs.
    pub hard_write_hierarchy: bool,
}

impl WriteOptions {
    /// Default options: no overwrite, no dry run, errors raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow replacing an existing value.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Do not modify the document.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Skip the write instead of failing on conflicts.
    pub fn ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Replace blocking leaf values along the path with docs.
    pub fn hard_write_hierarchy(mut self) -> Self {
        self.hard_write_hierarchy = true;
        self
    }
}

/// What [`get_or_create`] stores at a missing final segment.
#[derive(Clone, Copy, Default)]
pub enum Create<'f> {
    /// An empty doc.
    #[default]
    Container,
    /// The result of a factory, e.g. one from a
    /// [`FactoryRegistry`](crate::factory::FactoryRegistry).
    With(&'f dyn Fn() -> Value),
    /// Nothing: report `NotFound` instead of creating anything.
    CheckOnly,
}

impl Create<'_> {
    fn seed(&self) -> Value {
        match self {
            Create::With(factory) => factory(),
            Create::Container | Create::CheckOnly => Value::doc(),
        }
    }
}

impl std::fmt::Debug for Create<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Create::Container => write!(f, "Container"),
            Create::With(_) => write!(f, "With(<factory>)"),
            Create::CheckOnly => write!(f, "CheckOnly"),
        }
    }
}

// ===== Handlers =====

/// Guarded read: finish with `NotFound` at the first missing key.
struct Read;

impl<C: Cursor> StepHandler<C> for Read {
    type Output = NotFound;

    fn step(&mut self, step: &mut Step<'_, C>) -> Result<Flow<NotFound>> {
        if !step.exists() {
            return Ok(Flow::Finish(NOT_FOUND));
        }
        Ok(if step.is_last() { Flow::Take } else { Flow::Continue })
    }
}

enum Intermediate {
    Ready,
    Blocked,
}

/// Makes sure a non-final segment holds a doc, creating one if it is missing.
fn vivify(step: &mut Step<'_, &mut Value>) -> Result<Intermediate> {
    match step.next() {
        Some(next) if next.is_doc() => Ok(Intermediate::Ready),
        Some(_) => Ok(Intermediate::Blocked),
        None => {
            tracing::debug!(path = %step.path(), segment = %step.prefix(), "creating intermediate doc");
            step.set_next(Value::doc())?;
            Ok(Intermediate::Ready)
        }
    }
}

/// Get-or-create: vivify the path, seed a missing final segment.
struct GetOrCreate<'f> {
    create: Create<'f>,
}

impl<'a> StepHandler<&'a mut Value> for GetOrCreate<'_> {
    type Output = NotFound;

    fn step(&mut self, step: &mut Step<'_, &'a mut Value>) -> Result<Flow<NotFound>> {
        if let Create::CheckOnly = self.create {
            return Read.step(step);
        }

        if !step.is_last() {
            return match vivify(step)? {
                Intermediate::Ready => Ok(Flow::Continue),
                Intermediate::Blocked => Err(step.conflict().into()),
            };
        }

        if !step.exists() {
            tracing::debug!(path = %step.path(), "seeding missing value");
            step.set_next(self.create.seed())?;
        }
        Ok(Flow::Take)
    }
}

/// Remove: vivify the parents, then take the final key out.
struct Remove;

impl<'a> StepHandler<&'a mut Value> for Remove {
    type Output = Lookup<Value>;

    fn step(&mut self, step: &mut Step<'_, &'a mut Value>) -> Result<Flow<Lookup<Value>>> {
        if step.is_last() {
            return Ok(Flow::Finish(step.take_next()?.into()));
        }
        Ok(match vivify(step)? {
            Intermediate::Ready => Flow::Continue,
            Intermediate::Blocked => Flow::Finish(Lookup::NotFound),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteState {
    Pending,
    Stored,
    Occupied,
}

/// Why a write finished without reaching its slot.
enum Skip {
    DryRun { would_write: bool },
    Blocked,
}

/// Guarded write. Finishing early means nothing was stored.
struct Write {
    value: Value,
    options: WriteOptions,
    state: WriteState,
}

impl Write {
    fn intermediate(&mut self, step: &mut Step<'_, &mut Value>) -> Result<Flow<Skip>> {
        let next_is_doc = match step.next() {
            Some(next) => next.is_doc(),
            None => {
                if self.options.dry_run {
                    // Everything below a missing segment would be created fresh
                    tracing::debug!(path = %step.path(), segment = %step.prefix(), "dry run stops at missing segment");
                    return Ok(Flow::Finish(Skip::DryRun { would_write: true }));
                }
                return vivify(step).map(|_| Flow::Continue);
            }
        };
        if next_is_doc {
            return Ok(Flow::Continue);
        }

        if self.options.ignore_errors {
            tracing::debug!(path = %step.path(), segment = %step.prefix(), "skipping write blocked by leaf value");
            return Ok(Flow::Finish(if self.options.dry_run {
                Skip::DryRun { would_write: false }
            } else {
                Skip::Blocked
            }));
        }
        if self.options.hard_write_hierarchy {
            if self.options.dry_run {
                return Ok(Flow::Finish(Skip::DryRun { would_write: true }));
            }
            tracing::debug!(path = %step.path(), segment = %step.prefix(), "replacing leaf value with doc");
            step.set_next(Value::doc())?;
            return Ok(Flow::Continue);
        }
        Err(step.conflict().into())
    }

    fn last(&mut self, step: &mut Step<'_, &mut Value>) -> Result<Flow<Skip>> {
        if step.exists() && !self.options.overwrite {
            if self.options.dry_run {
                return Ok(Flow::Finish(Skip::DryRun { would_write: false }));
            }
            self.state = WriteState::Occupied;
            return Ok(Flow::Take);
        }
        if self.options.dry_run {
            return Ok(Flow::Finish(Skip::DryRun { would_write: true }));
        }

        step.set_next(std::mem::take(&mut self.value))?;
        self.state = WriteState::Stored;
        Ok(Flow::Take)
    }
}

impl<'a> StepHandler<&'a mut Value> for Write {
    type Output = Skip;

    fn step(&mut self, step: &mut Step<'_, &'a mut Value>) -> Result<Flow<Skip>> {
        if step.is_last() {
            self.last(step)
        } else {
            self.intermediate(step)
        }
    }
}

/// The outcome of a guarded write, before any policy turns it into an error.
#[derive(Debug, PartialEq)]
pub enum Written<'a> {
    /// The value was stored; this is the slot holding it.
    Stored(&'a mut Value),
    /// Nothing was touched. `would_write` tells whether the same write
    /// without `dry_run` would store the value.
    DryRun { would_write: bool },
    /// A leaf value blocks the path and `ignore_errors` skipped the write.
    Blocked,
    /// The slot already holds a value and overwriting was not allowed.
    Occupied(&'a mut Value),
}

/// Runs a guarded write and reports exactly what happened.
///
/// Unlike [`set_value`], an occupied slot is returned rather than raised, and
/// a skipped write says why it was skipped.
///
/// ```
/// # use dotpath::{Value, WriteOptions, ops::{self, Written}};
/// let mut root = Value::from_json_str(r#"{"a": 1}"#)?;
/// let options = WriteOptions::new().dry_run().ignore_errors();
/// assert_eq!(ops::write(&mut root, "a.b", 2, options)?, Written::DryRun { would_write: false });
/// assert_eq!(ops::write(&mut root, "c", 3, options)?, Written::DryRun { would_write: true });
/// # Ok::<(), dotpath::Error>(())
/// ```
///
/// # Errors
/// Same as [`set_value`], except for [`AccessError::Overwrite`].
pub fn write<'a>(
    container: &'a mut Value,
    address: impl IntoAddress,
    value: impl Into<Value>,
    options: WriteOptions,
) -> Result<Written<'a>> {
    let address = address.into_address()?;
    writable(container, &address)?;

    let mut handler = Write {
        value: value.into(),
        options,
        state: WriteState::Pending,
    };
    match walk(container, &address, &mut handler)? {
        Walked::Taken(slot) if handler.state == WriteState::Occupied => Ok(Written::Occupied(slot)),
        Walked::Taken(slot) => Ok(Written::Stored(slot)),
        Walked::Finished(Skip::DryRun { would_write }) => Ok(Written::DryRun { would_write }),
        Walked::Finished(Skip::Blocked) => Ok(Written::Blocked),
        Walked::Root(_) => Err(root_not_writable().into()),
    }
}

/// Writes and removals need a doc root, then a real address.
fn writable(container: &Value, address: &Address) -> Result<()> {
    if !container.is_doc() {
        return Err(AccessError::InvalidRoot {
            path: address.to_string(),
            found: container.type_name(),
        }
        .into());
    }
    if address.is_root() {
        return Err(root_not_writable().into());
    }
    Ok(())
}

fn root_not_writable() -> PathError {
    PathError::InvalidAddress {
        input: "(root)".to_string(),
        reason: "the null address cannot be written or removed".to_string(),
    }
}

// ===== Operations =====

/// Reads the value at `address`, or [`Lookup::NotFound`] if nothing is stored.
///
/// The null address returns the container itself. Stored nulls, `false`, `0`
/// and empty strings are all found.
pub fn get_if_exists(container: &Value, address: impl IntoAddress) -> Result<Lookup<&Value>> {
    let address = address.into_address()?;
    let walked = walk(container, &address, &mut Read)?;
    Ok(walked.resolve(Lookup::Found, |_| Lookup::NotFound))
}

/// Reads the value at `address`, substituting `fallback` when nothing is stored.
pub fn get_or<'a>(
    container: &'a Value,
    address: impl IntoAddress,
    fallback: &'a Value,
) -> Result<&'a Value> {
    Ok(get_if_exists(container, address)?.or(fallback))
}

/// Reads the value at `address`, failing if nothing is stored.
///
/// # Errors
/// [`AccessError::PathRequired`] with `message`, or a default message naming
/// the address.
pub fn get_must_exist<'a>(
    container: &'a Value,
    address: impl IntoAddress,
    message: Option<&str>,
) -> Result<&'a Value> {
    let address = address.into_address()?;
    get_if_exists(container, &address)?.require(&address, message)
}

/// Returns true if a value, of any kind, is stored at `address`.
pub fn exists(container: &Value, address: impl IntoAddress) -> Result<bool> {
    Ok(get_if_exists(container, address)?.is_found())
}

/// Walks `address`, creating missing docs along the way, and returns the slot.
///
/// A missing final segment is filled according to `create`; with
/// [`Create::CheckOnly`] nothing is created and a missing address reads as
/// `NotFound`. The null address returns the container itself.
///
/// # Errors
/// [`AccessError::HierarchyConflict`] if a leaf value sits on the path.
pub fn get_or_create<'a>(
    container: &'a mut Value,
    address: impl IntoAddress,
    create: Create<'_>,
) -> Result<Lookup<&'a mut Value>> {
    let address = address.into_address()?;
    let walked = walk(container, &address, &mut GetOrCreate { create })?;
    Ok(walked.resolve(Lookup::Found, |_| Lookup::NotFound))
}

/// Writes `value` at `address` under the policy in `options`.
///
/// Returns the stored value, or `None` when the write was skipped by
/// `dry_run` or `ignore_errors`. Use [`write`] to learn why.
///
/// # Errors
/// - [`AccessError::InvalidRoot`] if `container` is not a doc.
/// - [`PathError::InvalidAddress`] for the null address.
/// - [`AccessError::Overwrite`] if a value is already stored and neither
///   `overwrite`, `dry_run` nor `ignore_errors` is set.
/// - [`AccessError::HierarchyConflict`] if a leaf value blocks the path and
///   neither `ignore_errors` nor `hard_write_hierarchy` is set.
pub fn set_value(
    container: &mut Value,
    address: impl IntoAddress,
    value: impl Into<Value>,
    options: WriteOptions,
) -> Result<Option<&Value>> {
    let address = address.into_address()?;
    match write(container, &address, value, options)? {
        Written::Stored(slot) => Ok(Some(&*slot)),
        Written::DryRun { .. } | Written::Blocked => Ok(None),
        Written::Occupied(_) if options.ignore_errors => {
            tracing::debug!(path = %address, "skipping write to occupied slot");
            Ok(None)
        }
        Written::Occupied(_) => Err(AccessError::Overwrite {
            path: address.to_string(),
        }
        .into()),
    }
}

/// Removes the value at `address`, returning it, or `NotFound` if absent.
///
/// Missing parents are created on the way down, like [`get_or_create`]. A
/// leaf value on the path means the address cannot exist and yields
/// `NotFound`.
///
/// # Errors
/// [`AccessError::InvalidRoot`] if `container` is not a doc, then
/// [`PathError::InvalidAddress`] for the null address.
pub fn remove(container: &mut Value, address: impl IntoAddress) -> Result<Lookup<Value>> {
    let address = address.into_address()?;
    writable(container, &address)?;
    match walk(container, &address, &mut Remove)? {
        Walked::Finished(removed) => Ok(removed),
        Walked::Root(_) | Walked::Taken(_) => Err(AccessError::Incomplete {
            path: address.to_string(),
        }
        .into()),
    }
}

/// Stores `default` at `address` unless something is already there, and
/// returns whatever the slot holds afterwards.
///
/// This is the idempotent "create if absent" pattern for lazy initialization.
/// It is not atomic; callers sharing a document across threads must
/// serialize access themselves.
///
/// ```
/// # use dotpath::{Value, ops::leaf_node};
/// let mut cache = Value::doc();
/// leaf_node(&mut cache, "users.count", 0)?;
/// *leaf_node(&mut cache, "users.count", 0)? = Value::Int(5);
/// assert_eq!(*leaf_node(&mut cache, "users.count", 100)?, Value::Int(5));
/// # Ok::<(), dotpath::Error>(())
/// ```
pub fn leaf_node<'a>(
    container: &'a mut Value,
    address: impl IntoAddress,
    default: impl Into<Value>,
) -> Result<&'a mut Value> {
    let address = address.into_address()?;
    match write(container, &address, default, WriteOptions::default())? {
        Written::Stored(slot) | Written::Occupied(slot) => Ok(slot),
        Written::DryRun { .. } | Written::Blocked => Err(AccessError::Incomplete {
            path: address.to_string(),
        }
        .into()),
    }
}
