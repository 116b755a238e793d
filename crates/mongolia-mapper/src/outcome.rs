//! Results that carry non-fatal issues.

use mongolia_content::{PropertyType, StoreError};

use crate::error::{MapError, Result};

/// Why a field or subtree was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The store has a name the record type does not declare.
    UnknownField,
    /// The property type has no field mapping.
    UnsupportedType(PropertyType),
    /// The property type does not fit the field.
    TypeMismatch { expected: String, found: String },
    /// A `Long` that does not fit in a 32-bit field.
    OutOfRange(i64),
    /// A child node matched a scalar field.
    NotACollection,
    /// The field's element type is not registered.
    UnknownElementType(String),
    /// The store failed for this part of the tree.
    Store(StoreError),
    /// A nested element could not be read at all.
    ElementFailed(String),
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::UnknownField => write!(f, "no matching field"),
            IssueKind::UnsupportedType(t) => write!(f, "unsupported property type {}", t),
            IssueKind::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            IssueKind::OutOfRange(v) => write!(f, "value {} does not fit in 32 bits", v),
            IssueKind::NotACollection => write!(f, "child node matches a scalar field"),
            IssueKind::UnknownElementType(t) => write!(f, "unknown element type '{}'", t),
            IssueKind::Store(e) => write!(f, "{}", e),
            IssueKind::ElementFailed(reason) => write!(f, "element skipped: {}", reason),
        }
    }
}

/// A skipped field or subtree, with its path relative to the mapped node.
#[derive(Debug, Clone, PartialEq)]
pub struct MapIssue {
    pub path: String,
    pub kind: IssueKind,
}

impl MapIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl std::fmt::Display for MapIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// A mapped value plus everything that was skipped to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub value: T,
    pub issues: Vec<MapIssue>,
}

impl<T> Mapped<T> {
    pub fn new(value: T, issues: Vec<MapIssue>) -> Self {
        Self { value, issues }
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Drop the issues.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Issues other than [`IssueKind::UnknownField`].
    pub fn significant_issues(&self) -> impl Iterator<Item = &MapIssue> {
        self.issues
            .iter()
            .filter(|i| !matches!(i.kind, IssueKind::UnknownField))
    }

    /// Fail if anything besides unknown names was skipped.
    pub fn strict(self) -> Result<T> {
        if self.significant_issues().next().is_some() {
            return Err(MapError::Incomplete(self.issues));
        }
        Ok(self.value)
    }

    /// Transform the value, keeping the issues.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Mapped<U> {
        Mapped {
            value: f(self.value),
            issues: self.issues,
        }
    }

    /// Fallible [`Mapped::map`].
    pub fn try_map<U, F: FnOnce(T) -> Result<U>>(self, f: F) -> Result<Mapped<U>> {
        Ok(Mapped {
            value: f(self.value)?,
            issues: self.issues,
        })
    }
}
