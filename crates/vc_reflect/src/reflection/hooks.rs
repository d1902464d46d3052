/// Lifecycle callbacks of a persisted object.
///
/// Implement this and mark the type with `#[reflect(hooks)]`, the derived
/// [`Reflect`](crate::Reflect) implementation then forwards
/// [`Reflect::prepare_save`](crate::Reflect::prepare_save) and
/// [`Reflect::post_load`](crate::Reflect::post_load) here.
///
/// # Contract
///
/// - `prepare_save` runs once per serialize call, before any output is
///   produced, on every object of the graph. Parents run before children.
/// - `post_load` runs once on the root of a successful load. `full_path`
///   and `file_name` are empty when the value came from an in-memory string.
///
/// # Examples
///
/// ```
/// use vc_reflect::{SaveHooks, derive::Reflect};
///
/// #[derive(Reflect, Default)]
/// #[reflect(hooks)]
/// struct Inventory {
///     pub count: u32,
///     items: Vec<String>,
///     loaded_from: String,
/// }
///
/// impl SaveHooks for Inventory {
///     fn prepare_save(&mut self) {
///         self.count = self.items.len() as u32;
///     }
///
///     fn post_load(&mut self, full_path: &str, _file_name: &str) {
///         self.loaded_from = full_path.to_owned();
///     }
/// }
/// ```
pub trait SaveHooks {
    /// Moves transient state into persisted state.
    fn prepare_save(&mut self) {}

    /// Called after the object is fully rebuilt.
    fn post_load(&mut self, full_path: &str, file_name: &str) {
        let _ = (full_path, file_name);
    }
}
