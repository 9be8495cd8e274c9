//! The generic path walk shared by every operation.
//!
//! [`walk`] moves through a document one segment at a time. At each segment it
//! hands a [`Step`] to a [`StepHandler`], which decides what happens there:
//! descend, stop and take the value, or stop with its own result. Read-only
//! operations walk a `&Value`; mutating ones walk a `&mut Value` and may
//! materialize, replace or remove children through the step before the walk
//! descends.
//!
//! Segments are processed strictly left to right with no backtracking. A
//! handler is expected to finish by the last segment; a walk that runs out of
//! segments, or is told to descend into a child that does not exist, fails with
//! [`AccessError::Incomplete`].

use crate::{
    Result, Value,
    errors::AccessError,
    path::{Address, Path},
    value::Doc,
};

/// A position in a document that the walk can descend from.
///
/// Implemented for `&Value` (read-only walks) and `&mut Value` (mutating walks).
pub trait Cursor: Sized {
    /// The value at this position.
    fn value(&self) -> &Value;

    /// Moves to the child stored under `key`.
    ///
    /// Returns `None` if this position is not a doc or has no such key.
    fn descend(self, key: &str) -> Option<Self>;
}

impl Cursor for &Value {
    fn value(&self) -> &Value {
        self
    }

    fn descend(self, key: &str) -> Option<Self> {
        self.as_doc()?.get(key)
    }
}

impl Cursor for &mut Value {
    fn value(&self) -> &Value {
        self
    }

    fn descend(self, key: &str) -> Option<Self> {
        self.as_doc_mut()?.get_mut(key)
    }
}

/// What the walk should do after a handler has seen a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow<T> {
    /// Descend into the value at this segment and keep walking.
    Continue,
    /// Stop; the result is the value stored at this segment.
    Take,
    /// Stop with a result computed by the handler.
    Finish(T),
}

/// How a walk ended.
#[derive(Debug)]
pub enum Walked<C, T> {
    /// The address was [`Address::Root`]; no segment was visited.
    Root(C),
    /// A handler returned [`Flow::Take`].
    Taken(C),
    /// A handler returned [`Flow::Finish`].
    Finished(T),
}

impl<C, T> Walked<C, T> {
    /// Collapses the variants: root and taken cursors map through `taken`.
    pub fn resolve<U>(self, taken: impl FnOnce(C) -> U, finished: impl FnOnce(T) -> U) -> U {
        match self {
            Walked::Root(cursor) | Walked::Taken(cursor) => taken(cursor),
            Walked::Finished(output) => finished(output),
        }
    }
}

/// The state of the walk at one segment.
#[derive(Debug)]
pub struct Step<'s, C> {
    path: &'s Path,
    index: usize,
    key: &'s str,
    is_last: bool,
    current: C,
}

impl<C: Cursor> Step<'_, C> {
    /// The full path being walked.
    pub fn path(&self) -> &Path {
        self.path
    }

    /// Zero-based index of this segment.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The key read at this segment.
    pub fn key(&self) -> &str {
        self.key
    }

    /// True on the final segment of the path.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// The value the key is read from.
    pub fn current(&self) -> &Value {
        self.current.value()
    }

    /// The value one segment further, or `None` if the key is absent or the
    /// current value cannot hold keys.
    pub fn next(&self) -> Option<&Value> {
        self.current.value().as_doc()?.get(self.key)
    }

    /// True if the key is present at this segment.
    pub fn exists(&self) -> bool {
        self.next().is_some()
    }

    /// A hierarchy conflict for the value found at this segment.
    pub fn conflict(&self) -> AccessError {
        AccessError::HierarchyConflict {
            path: self.path.to_string(),
            segment: self.prefix(),
            found: self.next().map_or("nothing", Value::type_name),
        }
    }

    /// The path up to and including this segment.
    pub fn prefix(&self) -> String {
        self.path
            .segments()
            .take(self.index + 1)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Step<'_, &mut Value> {
    /// Mutable access to the doc the key is read from.
    pub fn doc_mut(&mut self) -> Result<&mut Doc> {
        match &mut *self.current {
            Value::Doc(doc) => Ok(doc),
            other => Err(parent_conflict(self.path, self.index, other.type_name()).into()),
        }
    }

    /// Stores `value` under this segment's key, returning what was there.
    pub fn set_next(&mut self, value: Value) -> Result<Option<Value>> {
        let key = self.key;
        Ok(self.doc_mut()?.insert(key, value))
    }

    /// Removes this segment's key, returning what was there.
    pub fn take_next(&mut self) -> Result<Option<Value>> {
        let key = self.key;
        Ok(self.doc_mut()?.remove(key))
    }
}

/// Per-segment behavior plugged into [`walk`].
pub trait StepHandler<C> {
    /// Result type for [`Flow::Finish`].
    type Output;

    /// Decides what happens at one segment.
    fn step(&mut self, step: &mut Step<'_, C>) -> Result<Flow<Self::Output>>;
}

/// Walks `address` from `root`, letting `handler` decide at each segment.
///
/// # Errors
/// - [`AccessError::InvalidRoot`] if `root` is not a doc.
/// - [`AccessError::Incomplete`] if the handler never finishes or continues
///   into a missing child.
/// - Any error raised by the handler, unchanged.
pub fn walk<C, H>(root: C, address: &Address, handler: &mut H) -> Result<Walked<C, H::Output>>
where
    C: Cursor,
    H: StepHandler<C>,
{
    if !root.value().is_doc() {
        return Err(AccessError::InvalidRoot {
            path: address.to_string(),
            found: root.value().type_name(),
        }
        .into());
    }

    let path = match address {
        Address::Root => return Ok(Walked::Root(root)),
        Address::At(path) => path,
    };

    let last = path.len() - 1;
    let mut current = root;
    for (index, key) in path.segments().enumerate() {
        let mut step = Step {
            path,
            index,
            key,
            is_last: index == last,
            current,
        };
        tracing::trace!(path = %path, index, key, "traversal step");

        match handler.step(&mut step)? {
            Flow::Continue => {}
            Flow::Take => {
                return step
                    .current
                    .descend(key)
                    .map(Walked::Taken)
                    .ok_or_else(|| incomplete(path));
            }
            Flow::Finish(output) => return Ok(Walked::Finished(output)),
        }

        current = step.current.descend(key).ok_or_else(|| incomplete(path))?;
    }

    tracing::error!(path = %path, "traversal exhausted all segments without a result");
    Err(incomplete(path))
}

/// The segment before `index` holds a leaf, so nothing can be stored below it.
fn parent_conflict(path: &Path, index: usize, found: &'static str) -> AccessError {
    AccessError::HierarchyConflict {
        path: path.to_string(),
        segment: path.segments().take(index).collect::<Vec<_>>().join("."),
        found,
    }
}

fn incomplete(path: &Path) -> crate::Error {
    AccessError::Incomplete {
        path: path.to_string(),
    }
    .into()
}
