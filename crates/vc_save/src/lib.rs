#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod error;
mod location;
mod probe;
mod result;
mod system;

pub mod hash;

// -----------------------------------------------------------------------------
// Exports

pub use codec::TextCodec;
pub use error::SaveError;
pub use location::{Location, StorageRoots};
pub use result::{LoadResult, Loaded};
pub use system::{SaveSystem, SaveSystemBuilder};
