#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_reflect as reflect;
pub use vc_save as save;
pub use vc_task as task;
