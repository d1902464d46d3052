#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod task;
mod task_pool;

// -----------------------------------------------------------------------------
// Exports

pub use task::Task;
pub use task_pool::{TaskPool, TaskPoolBuilder};

pub use futures_lite::future::block_on;

// -----------------------------------------------------------------------------
// Re-Exports

pub use futures_lite;
pub use futures_lite::future::poll_once;
