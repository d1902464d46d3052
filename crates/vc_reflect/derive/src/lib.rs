//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits for a struct with
/// named fields:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct`
/// - `GetTypeMeta`
///
/// The type must implement `Default`, the registry constructs instances
/// through it before assigning loaded members. Generic types, tuple
/// structs and enums are not supported.
///
/// ## Type Path
///
/// The path defaults to `module_path!()` followed by the ident. Pin it so
/// saved data survives moving the definition:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "game::zoo::Dog", module = "game_data")]
/// struct Dog { /* ... */ }
/// ```
///
/// `module` sets the qualifier written after the comma of a type hint, it
/// defaults to the first segment of the path.
///
/// These attributes can only be applied at the type level.
///
/// ## Members
///
/// Every field is a member, its visibility is recorded: only `pub` counts
/// as public. Field attributes:
///
/// - `#[reflect(include)]`: persist although private.
/// - `#[reflect(exclude)]`: do not persist although public.
/// - `#[reflect(rename = "hp")]`: the key used in the text form.
/// - `#[reflect(ignore)]`: not reflected at all, the type does not need
///   to implement `Reflect`.
///
/// Properties are members computed by accessor methods. Only properties
/// with both a getter and a setter are ever persisted:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(property(name = "level", ty = u32, get = Hero::level, set = Hero::set_level))]
/// struct Hero {
///     experience: u32,
/// }
///
/// impl Hero {
///     fn level(&self) -> u32 { self.experience / 100 }
///     fn set_level(&mut self, level: u32) { self.experience = level * 100 }
/// }
/// ```
///
/// A property also accepts `private`, `include`, `exclude` and `rename`.
///
/// ## Polymorphism
///
/// `implements(Trait, ...)` lets the type fill `Box<dyn Trait>` slots, the
/// trait must be made reflectable with `impl_reflect_dyn!`:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(implements(Animal))]
/// struct Dog { /* ... */ }
///
/// impl Animal for Dog { /* ... */ }
/// ```
///
/// ## Save Hooks
///
/// `hooks` forwards `Reflect::prepare_save` and `Reflect::post_load` to the
/// type's `SaveHooks` implementation.
///
/// ## Auto Registration
///
/// `auto_register` submits the type to `TypeRegistry::auto_register`.
/// It is a no-op when the `auto_register` feature is disabled.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_derive_input(&ast) {
        Ok(info) => impls::impl_struct(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
