//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, MarkerAttr, PropertyAttr, TypeAttributes};
pub(crate) use reflect_struct::ReflectStruct;
