#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod de;
mod error;
pub mod run;
pub mod spec;

#[doc(hidden)]
pub mod prelude;

pub use error::{Error, Result};

/// Tracing target for data model operations.
pub const TRACING_TARGET: &str = "pipeviz_core";
