// -----------------------------------------------------------------------------
// Modules

mod hooks;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use hooks::SaveHooks;
pub(crate) use reflect::impl_reflect_cast_fn;
pub use reflect::Reflect;
