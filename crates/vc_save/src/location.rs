use core::fmt;
use std::path::{Path, PathBuf};

/// A storage namespace.
///
/// Every location funnels into plain paths, see [`StorageRoots::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// Paths are used as given.
    #[default]
    Local,
    /// Read-only assets shipped with the application.
    Bundled,
    /// User-writable data.
    Streaming,
}

impl Location {
    #[inline]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::Bundled)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Local => "local",
            Self::Bundled => "bundled",
            Self::Streaming => "streaming",
        })
    }
}

/// Root directories of the [`Location`]s.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vc_save::{Location, StorageRoots};
///
/// let roots = StorageRoots::new("/game/assets", "/home/me/.game");
///
/// assert_eq!(
///     roots.resolve(Location::Streaming, "slots/1.json"),
///     Path::new("/home/me/.game/slots/1.json"),
/// );
/// assert_eq!(roots.resolve(Location::Local, "a.json"), Path::new("a.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    bundled: PathBuf,
    streaming: PathBuf,
}

impl Default for StorageRoots {
    fn default() -> Self {
        Self::new("assets", "saves")
    }
}

impl StorageRoots {
    pub fn new(bundled: impl Into<PathBuf>, streaming: impl Into<PathBuf>) -> Self {
        Self {
            bundled: bundled.into(),
            streaming: streaming.into(),
        }
    }

    /// The root of `location`, `None` for [`Location::Local`].
    pub fn root(&self, location: Location) -> Option<&Path> {
        match location {
            Location::Local => None,
            Location::Bundled => Some(&self.bundled),
            Location::Streaming => Some(&self.streaming),
        }
    }

    /// Joins `relative` onto the root of `location`.
    pub fn resolve(&self, location: Location, relative: impl AsRef<Path>) -> PathBuf {
        match self.root(location) {
            Some(root) => root.join(relative),
            None => relative.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Location, StorageRoots};

    #[test]
    fn only_bundled_is_read_only() {
        assert!(Location::Local.is_writable());
        assert!(Location::Streaming.is_writable());
        assert!(!Location::Bundled.is_writable());
    }

    #[test]
    fn resolve_against_roots() {
        let roots = StorageRoots::default();
        assert_eq!(
            roots.resolve(Location::Bundled, "levels/one.json"),
            Path::new("assets/levels/one.json")
        );
        assert_eq!(roots.root(Location::Streaming), Some(Path::new("saves")));
        assert_eq!(roots.root(Location::Local), None);
    }
}
