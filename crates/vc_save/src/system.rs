use alloc::sync::Arc;
use core::fmt;
use std::fs;
use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;
use tempfile::NamedTempFile;
use vc_reflect::Reflect;
use vc_reflect::info::Typed;
use vc_reflect::registry::{GetTypeMeta, TypeRegistry, TypeRegistryArc};
use vc_reflect::serde::{SerdeContext, SerdeSettings};
use vc_task::{TaskPool, block_on};
use walkdir::WalkDir;

use crate::hash::{ContentHasher, HashAlgorithm};
use crate::probe::read_text;
use crate::result::Rejected;
use crate::{Loaded, Location, SaveError, StorageRoots, TextCodec};

// -----------------------------------------------------------------------------
// SaveSystemBuilder

/// Builder for creating a [`SaveSystem`].
///
/// Without an explicit registry the system starts from
/// [`TypeRegistry::new`] and, with the `auto_register` feature, every type
/// marked `#[reflect(auto_register)]`.
///
/// # Examples
///
/// ```
/// use vc_save::{SaveSystem, StorageRoots, TextCodec};
/// use vc_reflect::serde::{HintPolicy, SerdeSettings};
///
/// let system = SaveSystem::builder()
///     .settings(SerdeSettings::builder().hint_policy(HintPolicy::Always).build())
///     .codec(TextCodec::compact())
///     .roots(StorageRoots::new("assets", "saves"))
///     .build();
///
/// assert!(!system.codec().is_pretty());
/// ```
#[derive(Default)]
#[must_use]
pub struct SaveSystemBuilder {
    registry: Option<TypeRegistryArc>,
    settings: Option<SerdeSettings>,
    codec: TextCodec,
    roots: StorageRoots,
    task_pool: Option<Arc<TaskPool>>,
}

impl SaveSystemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a shared registry instead of building one.
    #[inline]
    pub fn registry(mut self, registry: TypeRegistryArc) -> Self {
        self.registry = Some(registry);
        self
    }

    #[inline]
    pub fn settings(mut self, settings: SerdeSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[inline]
    pub fn codec(mut self, codec: TextCodec) -> Self {
        self.codec = codec;
        self
    }

    #[inline]
    pub fn roots(mut self, roots: StorageRoots) -> Self {
        self.roots = roots;
        self
    }

    /// Runs file reads and bulk loads on `task_pool`.
    ///
    /// Defaults to a pool of its own.
    #[inline]
    pub fn task_pool(mut self, task_pool: Arc<TaskPool>) -> Self {
        self.task_pool = Some(task_pool);
        self
    }

    pub fn build(self) -> SaveSystem {
        let registry = self.registry.unwrap_or_else(|| {
            let mut registry = TypeRegistry::new();
            if registry.auto_register() {
                debug!("auto registered {} types", registry.len());
            }
            TypeRegistryArc::new(registry)
        });

        let task_pool = self.task_pool.unwrap_or_else(|| {
            Arc::new(TaskPool::builder().thread_name(String::from("vc_save")).build())
        });

        SaveSystem {
            shared: Arc::new(Shared {
                ctx: SerdeContext::new(registry, self.settings.unwrap_or_default()),
                codec: self.codec,
            }),
            roots: self.roots,
            task_pool,
        }
    }
}

// -----------------------------------------------------------------------------
// SaveSystem

/// Loads and saves reflected values as JSON files.
///
/// Loads never fail with an error, they report a [`Loaded`] whose
/// [`LoadResult`](crate::LoadResult) tells what went wrong. Saves and the
/// in-memory conversions return [`SaveError`].
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_save::{LoadResult, SaveSystem};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[reflect(auto_register)]
/// struct Settings {
///     pub volume: f32,
///     pub name: String,
/// }
///
/// let system = SaveSystem::new();
/// let dir = std::env::temp_dir().join("vc_save_doc");
/// let path = dir.join("settings.json");
///
/// let mut settings = Settings { volume: 0.5, name: "me".into() };
/// system.save(&path, &mut settings).unwrap();
///
/// let loaded = system.load::<Settings>(&path);
/// assert_eq!(loaded.result, LoadResult::Success);
/// assert_eq!(loaded.value, Some(settings));
///
/// let missing = system.load::<Settings>(dir.join("missing.json"));
/// assert_eq!(missing.result, LoadResult::FileDoesNotExist);
/// # std::fs::remove_dir_all(dir).unwrap();
/// ```
pub struct SaveSystem {
    shared: Arc<Shared>,
    roots: StorageRoots,
    task_pool: Arc<TaskPool>,
}

/// The part of the system bulk load tasks hold on to.
struct Shared {
    ctx: SerdeContext,
    codec: TextCodec,
}

impl fmt::Debug for SaveSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveSystem")
            .field("ctx", &self.shared.ctx)
            .field("codec", &self.shared.codec)
            .field("roots", &self.roots)
            .field("threads", &self.task_pool.thread_num())
            .finish()
    }
}

impl Default for SaveSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveSystem {
    /// A system with default settings, see [`SaveSystemBuilder`].
    #[inline]
    pub fn new() -> Self {
        SaveSystemBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> SaveSystemBuilder {
        SaveSystemBuilder::new()
    }

    #[inline]
    pub fn context(&self) -> &SerdeContext {
        &self.shared.ctx
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        self.shared.ctx.registry()
    }

    #[inline]
    pub fn codec(&self) -> &TextCodec {
        &self.shared.codec
    }

    #[inline]
    pub fn roots(&self) -> &StorageRoots {
        &self.roots
    }

    /// Registers `T` and its member types.
    ///
    /// Drops the resolver cache, earlier resolutions may change.
    pub fn register<T: GetTypeMeta>(&self) {
        self.registry().write().register::<T>();
        self.shared.ctx.clear_caches();
    }

    // -------------------------------------------------------------------------
    // In memory

    /// Serializes `value` to text, running its save hooks first.
    pub fn to_text<T: Reflect>(&self, value: &mut T) -> Result<String, SaveError> {
        let node = self.shared.ctx.to_value(value)?;
        Ok(self.shared.codec.encode(&node)?)
    }

    /// Serializes `value` to text, the root always records its type hint.
    pub fn to_text_dyn(&self, value: &mut dyn Reflect) -> Result<String, SaveError> {
        let node = self.shared.ctx.to_value_dyn(value)?;
        Ok(self.shared.codec.encode(&node)?)
    }

    /// Deserializes text, `None` when the text is `null`.
    ///
    /// `post_load` runs with an empty path and file name.
    pub fn from_text<T: Reflect + Typed>(&self, text: &str) -> Result<Option<T>, SaveError> {
        let mut value = self.shared.parse::<T>(text)?;
        if let Some(value) = value.as_mut() {
            value.post_load("", "");
        }
        Ok(value)
    }

    /// Deserializes text whose root records its type hint.
    pub fn from_text_dyn(&self, text: &str) -> Result<Option<Box<dyn Reflect>>, SaveError> {
        let node = self.shared.codec.decode(text)?;
        let mut value = self.shared.ctx.from_value_dyn(&node)?;
        if let Some(value) = value.as_mut() {
            value.post_load("", "");
        }
        Ok(value)
    }

    /// Hex digest of the persisted state of `value`, see [`HashAlgorithm`]
    /// for the accepted names.
    ///
    /// Runs the save hooks, nothing else is touched.
    pub fn compute_hash<T: Reflect>(&self, value: &mut T, algorithm: &str) -> Result<String, SaveError> {
        self.compute_hash_with(value, algorithm.parse()?)
    }

    pub fn compute_hash_with<T: Reflect>(
        &self,
        value: &mut T,
        algorithm: HashAlgorithm,
    ) -> Result<String, SaveError> {
        let node = self.shared.ctx.to_value(value)?;
        ContentHasher::new(algorithm).hash_node(&node)
    }

    // -------------------------------------------------------------------------
    // Load

    /// Loads one file.
    ///
    /// On success `post_load` receives the absolute path and the file name.
    pub fn load<T: Reflect + Typed>(&self, path: impl AsRef<Path>) -> Loaded<T> {
        self.shared.load(path.as_ref())
    }

    /// Loads `relative` from the root of `location`.
    pub fn load_from<T: Reflect + Typed>(&self, location: Location, relative: impl AsRef<Path>) -> Loaded<T> {
        self.load(self.roots.resolve(location, relative))
    }

    /// Loads one file, reading it on the task pool.
    ///
    /// The future only waits for the read, deserialization runs when it
    /// resumes.
    pub async fn load_async<T: Reflect + Typed>(&self, path: impl AsRef<Path>) -> Loaded<T> {
        let path = path.as_ref().to_path_buf();
        let read_path = path.clone();

        match self.task_pool.spawn(async move { read_text(&read_path) }).await {
            Ok(text) => self.shared.finish_load(&path, &text),
            Err(rejected) => rejected.into(),
        }
    }

    /// Loads every file below `folder` whose name ends with `suffix`.
    ///
    /// Each file is loaded by its own task on the pool. Files that fail or
    /// hold no value are logged and left out. The order of the result is
    /// unspecified.
    pub fn load_all_from_local<T: Reflect + Typed>(&self, folder: impl AsRef<Path>, suffix: &str) -> Vec<T> {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            warn!("cannot load from `{}`: not a directory", folder.display());
            return Vec::new();
        }

        let (tx, rx) = async_channel::unbounded::<T>();

        let tasks: Vec<_> = WalkDir::new(folder)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipping an entry of `{}`: {err}", folder.display());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
            .map(|entry| {
                let shared = Arc::clone(&self.shared);
                let tx = tx.clone();
                let path = entry.into_path();

                self.task_pool.spawn(async move {
                    let Some(value) = shared.load_logged::<T>(&path) else {
                        return;
                    };
                    if tx.send(value).await.is_err() {
                        debug!("result of `{}` dropped", path.display());
                    }
                })
            })
            .collect();

        drop(tx);
        let total = tasks.len();

        for task in tasks {
            block_on(task);
        }

        let values: Vec<T> = core::iter::from_fn(|| rx.try_recv().ok()).collect();
        info!(
            "loaded {} of {total} `{suffix}` files from `{}`",
            values.len(),
            folder.display()
        );
        values
    }

    /// [`load_all_from_local`](Self::load_all_from_local) on a folder
    /// relative to the root of `location`.
    pub fn load_all<T: Reflect + Typed>(
        &self,
        location: Location,
        folder: impl AsRef<Path>,
        suffix: &str,
    ) -> Vec<T> {
        self.load_all_from_local(self.roots.resolve(location, folder), suffix)
    }

    // -------------------------------------------------------------------------
    // Save

    /// Saves `value` to `path`, creating missing directories.
    ///
    /// Runs the save hooks once. The file is replaced atomically.
    pub fn save<T: Reflect>(&self, path: impl AsRef<Path>, value: &mut T) -> Result<(), SaveError> {
        let node = self.shared.ctx.to_value(value)?;
        self.write_node(path.as_ref(), &node)
    }

    /// Saves `relative` below the root of `location`.
    pub fn save_to<T: Reflect>(
        &self,
        location: Location,
        relative: impl AsRef<Path>,
        value: &mut T,
    ) -> Result<(), SaveError> {
        if !location.is_writable() {
            return Err(SaveError::ReadOnlyLocation(location));
        }
        self.save(self.roots.resolve(location, relative), value)
    }

    /// Saves `value` and returns the hash of what was written.
    ///
    /// The value is serialized once for both.
    pub fn save_with_hash<T: Reflect>(
        &self,
        path: impl AsRef<Path>,
        value: &mut T,
        algorithm: &str,
    ) -> Result<String, SaveError> {
        let hasher = ContentHasher::new(algorithm.parse()?);
        let node = self.shared.ctx.to_value(value)?;
        let hash = hasher.hash_node(&node)?;
        self.write_node(path.as_ref(), &node)?;
        Ok(hash)
    }

    fn write_node(&self, path: &Path, node: &Value) -> Result<(), SaveError> {
        if path.as_os_str().is_empty() {
            return Err(SaveError::EmptyPath);
        }

        let text = self.shared.codec.encode(node)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| SaveError::io("create directory", dir, e))?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| SaveError::io("create", dir, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| SaveError::io("write", file.path(), e))?;
        file.as_file()
            .sync_all()
            .map_err(|e| SaveError::io("sync", file.path(), e))?;
        file.persist(path)
            .map_err(|e| SaveError::io("replace", path, e.error))?;

        debug!("saved `{}`", path.display());
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Shared

impl Shared {
    fn parse<T: Reflect + Typed>(&self, text: &str) -> Result<Option<T>, SaveError> {
        let node = self.codec.decode(text)?;
        Ok(self.ctx.from_value::<T>(&node)?)
    }

    fn load<T: Reflect + Typed>(&self, path: &Path) -> Loaded<T> {
        match read_text(path) {
            Ok(text) => self.finish_load(path, &text),
            Err(rejected) => rejected.into(),
        }
    }

    fn finish_load<T: Reflect + Typed>(&self, path: &Path, text: &str) -> Loaded<T> {
        let mut value = match self.parse::<T>(text) {
            Ok(value) => value,
            Err(err) => return Rejected::other(err).into(),
        };

        if let Some(value) = value.as_mut() {
            let full_path = absolute_path(path);
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            value.post_load(&full_path.to_string_lossy(), &file_name);
        }

        Loaded::success(value)
    }

    /// Loads one file of a bulk load, failures only reach the log.
    fn load_logged<T: Reflect + Typed>(&self, path: &Path) -> Option<T> {
        let loaded = match catch_unwind(AssertUnwindSafe(|| self.load::<T>(path))) {
            Ok(loaded) => loaded,
            Err(_) => {
                warn!("skipping `{}`: panicked while loading", path.display());
                return None;
            }
        };

        let Loaded { value, result, error } = loaded;
        if value.is_some() {
            return value;
        }

        match error {
            _ if result.is_success() => warn!("skipping `{}`: holds no value", path.display()),
            Some(error) => warn!("skipping `{}`: {result}, {error}", path.display()),
            None => warn!("skipping `{}`: {result}", path.display()),
        }
        None
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
