//! Batch-rename objects in local or remote storage.
//!
//! The name generation itself lives in [`naming`] and has no storage
//! dependency; [`storage`] selects objects and applies the generated names.

pub mod cli;
pub mod config;
pub mod error;
pub mod naming;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};
pub use naming::{NumberPosition, RenameConfig, RenameItem, RenamedItem, generate};
