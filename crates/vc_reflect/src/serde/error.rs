use core::fmt;

use crate::registry::ResolveError;

// -----------------------------------------------------------------------------
// SerdeErrorKind

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SerdeErrorKind {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("expected {expected}, found {found}")]
    InvalidNode {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{value}` does not fit into `{type_path}`")]
    InvalidScalar {
        type_path: &'static str,
        value: String,
    },
    #[error("type `{0}` is not registered")]
    NotRegistered(&'static str),
    #[error("type `{0}` cannot be constructed, it has no registered default")]
    NotConstructible(&'static str),
    #[error("`{value}` cannot fill a `{slot}` slot")]
    NotCastable {
        value: &'static str,
        slot: &'static str,
    },
    #[error("type mismatch, expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    Custom(String),
}

// -----------------------------------------------------------------------------
// SerdeError

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Member(Box<str>),
    Index(usize),
}

/// A serialization failure together with the node it happened at.
///
/// ```text
/// expected string, found number (at `animals[3].name`)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SerdeError {
    // Innermost first, errors are wrapped while unwinding.
    segments: Vec<Segment>,
    kind: SerdeErrorKind,
}

impl SerdeError {
    #[inline]
    pub fn new(kind: impl Into<SerdeErrorKind>) -> Self {
        Self {
            segments: Vec::new(),
            kind: kind.into(),
        }
    }

    #[inline]
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::new(SerdeErrorKind::Custom(msg.to_string()))
    }

    #[inline]
    pub fn kind(&self) -> &SerdeErrorKind {
        &self.kind
    }

    /// Whether the failure comes from an unresolvable type hint.
    #[inline]
    pub fn is_resolve(&self) -> bool {
        matches!(self.kind, SerdeErrorKind::Resolve(_))
    }

    /// Prefixes the path with a member key.
    pub fn within_member(mut self, name: &str) -> Self {
        self.segments.push(Segment::Member(Box::from(name)));
        self
    }

    /// Prefixes the path with a list index.
    pub fn within_index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// The node path, `$` for the root.
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            return String::from("$");
        }
        let mut path = String::new();
        for segment in self.segments.iter().rev() {
            match segment {
                Segment::Member(name) => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(name);
                }
                Segment::Index(index) => {
                    path.push('[');
                    path.push_str(&index.to_string());
                    path.push(']');
                }
            }
        }
        path
    }
}

impl fmt::Display for SerdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at `{}`)", self.kind, self.path())
    }
}

impl core::error::Error for SerdeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            SerdeErrorKind::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolveError> for SerdeError {
    #[inline]
    fn from(value: ResolveError) -> Self {
        Self::new(value)
    }
}

impl From<serde_json::Error> for SerdeError {
    #[inline]
    fn from(value: serde_json::Error) -> Self {
        Self::custom(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{SerdeError, SerdeErrorKind};

    #[test]
    fn path_display() {
        let err = SerdeError::new(SerdeErrorKind::InvalidNode {
            expected: "string",
            found: "number",
        })
        .within_member("name")
        .within_index(3)
        .within_member("animals");

        assert_eq!(err.path(), "animals[3].name");
        assert_eq!(
            err.to_string(),
            "expected string, found number (at `animals[3].name`)"
        );
    }

    #[test]
    fn root_path() {
        let err = SerdeError::custom("boom");
        assert_eq!(err.path(), "$");
        assert_eq!(err.to_string(), "boom (at `$`)");
    }
}
