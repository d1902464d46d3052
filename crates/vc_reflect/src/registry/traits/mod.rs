// -----------------------------------------------------------------------------
// Modules

mod cast;
mod default;

// -----------------------------------------------------------------------------
// Exports

pub use cast::TypeTraitCast;
pub use default::TypeTraitDefault;
