use std::path::PathBuf;

use thiserror::Error;
use vc_reflect::serde::SerdeError;

use crate::Location;

/// An error raised by the save side of [`SaveSystem`](crate::SaveSystem)
/// and by the in-memory conversions.
///
/// Loading from files never returns it, load operations report a
/// [`Loaded`](crate::Loaded) instead.
#[derive(Debug, Error)]
pub enum SaveError {
    /// A file system operation failed.
    #[error("failed to {operation} `{}`", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON or could not be written.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The node tree does not match the reflected types.
    #[error(transparent)]
    Serde(#[from] SerdeError),

    /// The node tree could not be encoded for hashing.
    #[error("failed to encode the node tree: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// The hash algorithm name is not supported.
    #[error("unknown hash algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// The location cannot be written to.
    #[error("the {0} location is read-only")]
    ReadOnlyLocation(Location),

    /// An empty path was given.
    #[error("empty path given")]
    EmptyPath,
}

impl SaveError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::SaveError;
    use crate::Location;

    #[test]
    fn messages() {
        let err = SaveError::io("create", "saves/slot.json", io::Error::other("denied"));
        assert_eq!(err.to_string(), "failed to create `saves/slot.json`");

        let err = SaveError::ReadOnlyLocation(Location::Bundled);
        assert_eq!(err.to_string(), "the bundled location is read-only");

        let err = SaveError::UnknownAlgorithm("crc".into());
        assert_eq!(err.to_string(), "unknown hash algorithm `crc`");
    }
}
