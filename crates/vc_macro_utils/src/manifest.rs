use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;
use std::{env, fs};

use toml_edit::{Document, Item, Table};

/// The facade crate re-exporting every `vc_*` crate under its short name.
const FACADE_NAME: &str = "vc_persist";
const CRATE_PREFIX: &str = "vc_";

/// The caller's `Cargo.toml`, used to find how a crate is reachable from
/// generated code.
///
/// # Example
///
/// ```no_run
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. A direct dependency `vc_reflect` gives `::vc_reflect`.
/// 2. A dependency on the facade gives `::vc_persist::reflect`.
/// 3. Steps 1 and 2 again over `dev-dependencies`.
/// 4. Otherwise `::vc_reflect`, which is right for the crate itself as long
///    as it declares `extern crate self as vc_reflect;`.
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: SystemTime,
}

impl Manifest {
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be set by cargo");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(path.exists(), "no Cargo.toml at {}", path.display());
        path
    }

    fn modified_time(path: &Path) -> SystemTime {
        fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .expect("Cargo.toml should have a modified time")
    }

    fn read(path: &Path, modified: SystemTime) -> Self {
        let text = fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
        let document = Document::parse(text.into_boxed_str())
            .unwrap_or_else(|err| panic!("cannot parse {}: {err}", path.display()));
        Self { document, modified }
    }

    fn path_of(segments: &[&str]) -> syn::Path {
        syn::parse_str(&format!("::{}", segments.join("::")))
            .expect("crate names are valid paths")
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::path_of(&[name]));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::path_of(&[FACADE_NAME, short]))
    }

    /// Returns the path of crate `name` as seen from the calling crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|key| match self.document.get(key) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::path_of(&[name]))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Parsed manifests are cached per path and re-read when the file
    /// changes. Still costly, call it once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified = Self::modified_time(&path);

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified == modified
            {
                return func(manifest);
            }
        }

        let manifest = Self::read(&path, modified);
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}
