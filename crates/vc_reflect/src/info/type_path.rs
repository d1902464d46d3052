use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Provide a stable alternative to [`core::any::type_name`] that survives
/// code refactoring, the path is what a type hint records.
///
/// # Methods
///
/// - [`type_path`]: The unique identifier of the type, e.g. `game::zoo::Dog`.
/// - [`type_name`]: Type name without module path, may be duplicated.
/// - [`module_qualifier`]: The crate-like qualifier written after the comma of a hint.
///
/// We guarantee that these names do not have the prefix `::`.
/// Users should also ensure this when manually implementing it.
///
/// # Examples
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::info::TypePath;
///
/// // Paths default to `module_path!()` + ident.
/// #[derive(Reflect, Default)]
/// struct Plain {}
///
/// // A pinned path does not change when the definition moves.
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "game::zoo::Dog", module = "game_data")]
/// struct Dog {}
///
/// assert_eq!(Dog::type_path(), "game::zoo::Dog");
/// assert_eq!(Dog::type_name(), "Dog");
/// assert_eq!(Dog::module_qualifier(), "game_data");
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`module_qualifier`]: TypePath::module_qualifier
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type.
    fn type_path() -> &'static str;

    /// Returns the type name without module path.
    fn type_name() -> &'static str;

    /// Returns the module path, if the type has one.
    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }

    /// Returns the module qualifier, the crate name by default.
    #[inline]
    fn module_qualifier() -> &'static str {
        crate_name_of(Self::type_path())
    }
}

/// Returns the first path segment, ignoring anything inside generics.
///
/// ```
/// use vc_reflect::info::crate_name_of;
///
/// assert_eq!(crate_name_of("alloc::vec::Vec<game::Dog>"), "alloc");
/// assert_eq!(crate_name_of("u32"), "u32");
/// ```
pub fn crate_name_of(path: &str) -> &str {
    let end = path.find(['<', ' ']).unwrap_or(path.len());
    let head = &path[..end];
    match head.find("::") {
        Some(idx) => &head[..idx],
        None => head,
    }
}

// -----------------------------------------------------------------------------
// Type

/// A `TypeId` paired with the names of its [`TypePath`] implementation.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
    module: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
            module: T::module_qualifier(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// See [`TypePath::module_qualifier`].
    #[inline(always)]
    pub const fn module(&self) -> &'static str {
        self.module
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The string written into a type hint: `"<path>, <module>"`.
    pub fn hint(&self) -> String {
        crate::impls::concat(&[self.path, ", ", self.module])
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_name() {
        assert_eq!(crate_name_of("game::zoo::Dog"), "game");
        assert_eq!(crate_name_of("Dog"), "Dog");
        assert_eq!(crate_name_of("std::collections::HashMap<alloc::string::String, u8>"), "std");
        assert_eq!(crate_name_of("alloc::boxed::Box<dyn game::Animal>"), "alloc");
    }

    #[test]
    fn type_hint_string() {
        let ty = Type::of::<String>();
        assert_eq!(ty.path(), "alloc::string::String");
        assert_eq!(ty.hint(), "alloc::string::String, alloc");
        assert!(ty.is::<String>());
    }
}
