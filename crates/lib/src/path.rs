//! Dotted addresses into nested documents.
//!
//! A [`Path`] is an exact, owned dotted string such as `"server.port"`. Unlike
//! filesystem-style paths, nothing is normalized: leading, trailing and
//! consecutive dots produce empty-string segments, and empty segments are
//! ordinary keys.
//!
//! An [`Address`] is either a [`Path`] or [`Address::Root`], the null address
//! that refers to the document itself.
//!
//! # Usage
//!
//! ```rust
//! use dotpath::path::{Address, IntoAddress, Path};
//! use dotpath::address;
//!
//! let path = Path::parse("user.profile.name");
//! assert_eq!(path.segments().collect::<Vec<_>>(), ["user", "profile", "name"]);
//!
//! // Empty segments are kept
//! assert_eq!(Path::parse("a..b").len(), 3);
//!
//! // Build from runtime parts
//! let id = 42;
//! let path = address!("users", id, "name");
//! assert_eq!(path.as_str(), "users.42.name");
//!
//! // `None` is the root address
//! assert_eq!(None::<&str>.into_address().unwrap(), Address::Root);
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error type for address parsing and segment validation.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The input cannot be used as an address.
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// A single segment was expected but the input contains a dot.
    #[error("Invalid segment '{segment}': segments cannot contain dots")]
    InvalidSegment { segment: String },
}

impl PathError {
    /// Check if this error is an invalid address
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, PathError::InvalidAddress { .. })
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// An owned dotted path with at least one segment.
///
/// Segments are produced by splitting on `.` and nothing else: whitespace is
/// kept and repeated dots are not collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    inner: String,
}

impl Path {
    /// Parses a dotted string. Every string is a valid path.
    pub fn parse(input: impl Into<String>) -> Self {
        Self {
            inner: input.into(),
        }
    }

    /// Builds a path from individual segments.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidSegment`] if a segment contains a dot, and
    /// [`PathError::InvalidAddress`] if there are no segments at all.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iter = segments.into_iter();
        let first = iter.next().ok_or_else(|| PathError::InvalidAddress {
            input: String::new(),
            reason: "no segments".to_string(),
        })?;
        let mut path = Self::parse(validate_segment(first.as_ref())?);
        for segment in iter {
            path = path.push_segment(segment.as_ref())?;
        }
        Ok(path)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns an iterator over the segments, empty ones included.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.split('.')
    }

    /// Returns the number of segments. Always at least one.
    pub fn len(&self) -> usize {
        self.inner.split('.').count()
    }

    /// Paths are never empty; `""` is a single empty segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the parent path, or `None` for a single-segment path.
    pub fn parent(&self) -> Option<Path> {
        self.inner.rfind('.').map(|last_dot| Path {
            inner: self.inner[..last_dot].to_string(),
        })
    }

    /// Returns the final segment.
    pub fn last(&self) -> &str {
        match self.inner.rfind('.') {
            Some(last_dot) => &self.inner[last_dot + 1..],
            None => &self.inner,
        }
    }

    /// Appends a dotted string, which may itself contain several segments.
    pub fn push(mut self, path: impl AsRef<str>) -> Self {
        self.inner.push('.');
        self.inner.push_str(path.as_ref());
        self
    }

    /// Appends exactly one segment.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidSegment`] if `segment` contains a dot.
    pub fn push_segment(self, segment: &str) -> Result<Self, PathError> {
        Ok(self.push(validate_segment(segment)?))
    }

    /// Joins this path with another path.
    pub fn join(self, other: &Path) -> Self {
        self.push(other.as_str())
    }
}

fn validate_segment(segment: &str) -> Result<&str, PathError> {
    if segment.contains('.') {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
        });
    }
    Ok(segment)
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::parse(s)
    }
}

/// Where an operation should look: the document itself or a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// The null address: the root container itself.
    Root,
    /// A dotted path below the root.
    At(Path),
}

impl Address {
    /// Returns the path, or `None` for the root.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Address::Root => None,
            Address::At(path) => Some(path),
        }
    }

    /// Returns true for the null address.
    pub fn is_root(&self) -> bool {
        matches!(self, Address::Root)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Root => write!(f, "(root)"),
            Address::At(path) => write!(f, "{path}"),
        }
    }
}

/// Conversion into an [`Address`].
///
/// Strings and paths convert as dotted paths, integers as their decimal form,
/// and `None` as [`Address::Root`]. Floats convert when finite; NaN and the
/// infinities are rejected with [`PathError::InvalidAddress`].
pub trait IntoAddress {
    /// Performs the conversion.
    fn into_address(self) -> Result<Address, PathError>;
}

impl IntoAddress for Address {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(self)
    }
}

impl IntoAddress for &Address {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(self.clone())
    }
}

impl IntoAddress for Path {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(Address::At(self))
    }
}

impl IntoAddress for &Path {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(Address::At(self.clone()))
    }
}

impl IntoAddress for &str {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(Address::At(Path::parse(self)))
    }
}

impl IntoAddress for String {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(Address::At(Path::parse(self)))
    }
}

impl IntoAddress for &String {
    fn into_address(self) -> Result<Address, PathError> {
        Ok(Address::At(Path::parse(self.as_str())))
    }
}

impl<T: IntoAddress> IntoAddress for Option<T> {
    fn into_address(self) -> Result<Address, PathError> {
        match self {
            Some(inner) => inner.into_address(),
            None => Ok(Address::Root),
        }
    }
}

macro_rules! impl_into_address_int {
    ($($ty:ty),*) => {
        $(
            impl IntoAddress for $ty {
                fn into_address(self) -> Result<Address, PathError> {
                    Ok(Address::At(Path::parse(self.to_string())))
                }
            }
        )*
    };
}

impl_into_address_int!(i32, i64, u32, u64, usize);

impl IntoAddress for f64 {
    fn into_address(self) -> Result<Address, PathError> {
        if !self.is_finite() {
            return Err(PathError::InvalidAddress {
                input: self.to_string(),
                reason: "numeric addresses must be finite".to_string(),
            });
        }
        Ok(Address::At(Path::parse(self.to_string())))
    }
}

impl IntoAddress for f32 {
    fn into_address(self) -> Result<Address, PathError> {
        f64::from(self).into_address()
    }
}

/// Joins path parts into one dotted string.
///
/// Parts may already be dotted. Nothing is trimmed or collapsed, so an empty
/// part becomes an empty segment, exactly as [`Path::parse`] would read it.
///
/// ```rust
/// # use dotpath::path::join;
/// assert_eq!(join(["server", "http.port"]), "server.http.port");
/// assert_eq!(join(["a", "", "b"]), "a..b");
/// ```
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    parts
        .into_iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Constructs a [`Path`] from literals and runtime values.
///
/// Each argument is rendered with `Display` and appended as a dotted part.
///
/// ```rust
/// # use dotpath::address;
/// let user = "alice";
/// let path = address!("users", user, "sessions", 3);
/// assert_eq!(path.as_str(), "users.alice.sessions.3");
///
/// let single = address!("a.b");
/// assert_eq!(single.len(), 2);
/// ```
#[macro_export]
macro_rules! address {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let path = $crate::path::Path::parse($first.to_string());
        $(
            let path = path.push($rest.to_string());
        )*
        path
    }};
}
