use core::fmt;

// -----------------------------------------------------------------------------
// LoadResult

/// The outcome of a load attempt.
///
/// File problems are classified before the content is parsed, parse and
/// type resolution failures are all reported as [`OtherError`].
///
/// [`OtherError`]: LoadResult::OtherError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadResult {
    /// The file was read and deserialized.
    Success,
    /// The path was empty.
    EmptyPathGiven,
    /// Nothing exists at the path, or it is not a file.
    FileDoesNotExist,
    /// The file has zero length.
    FileIsEmpty,
    /// The file has content but every byte is zero, typically the trace
    /// of an interrupted write.
    FileIsAllNull,
    /// The content could not be read, parsed or deserialized.
    OtherError,
}

impl LoadResult {
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for LoadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Success => "Success",
            Self::EmptyPathGiven => "EmptyPathGiven",
            Self::FileDoesNotExist => "FileDoesNotExist",
            Self::FileIsEmpty => "FileIsEmpty",
            Self::FileIsAllNull => "FileIsAllNull",
            Self::OtherError => "OtherError",
        })
    }
}

// -----------------------------------------------------------------------------
// Loaded

/// A loaded value paired with its [`LoadResult`].
///
/// A successful load may still carry no value when the file holds `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: Option<T>,
    pub result: LoadResult,
    pub error: Option<String>,
}

impl<T> Loaded<T> {
    #[inline]
    pub const fn success(value: Option<T>) -> Self {
        Self {
            value,
            result: LoadResult::Success,
            error: None,
        }
    }

    #[inline]
    pub const fn failed(result: LoadResult, error: Option<String>) -> Self {
        Self {
            value: None,
            result,
            error,
        }
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// The value, if the load succeeded with one.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: self.value.map(f),
            result: self.result,
            error: self.error,
        }
    }
}

// -----------------------------------------------------------------------------
// Rejected

/// A load stopped before deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejected {
    pub result: LoadResult,
    pub error: Option<String>,
}

impl Rejected {
    #[inline]
    pub const fn new(result: LoadResult) -> Self {
        Self {
            result,
            error: None,
        }
    }

    #[inline]
    pub fn other(error: impl fmt::Display) -> Self {
        Self {
            result: LoadResult::OtherError,
            error: Some(error.to_string()),
        }
    }
}

impl<T> From<Rejected> for Loaded<T> {
    #[inline]
    fn from(rejected: Rejected) -> Self {
        Loaded::failed(rejected.result, rejected.error)
    }
}
