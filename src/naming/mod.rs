//! Name generation for batch renames.
//!
//! [`generate`] is a pure function: it maps an ordered list of items and a
//! [`RenameConfig`] to the list of new names. Applying those names to a
//! storage backend lives in [`crate::storage`].

pub mod config;
pub mod generator;

pub use config::{NumberPosition, RenameConfig};
pub use generator::{
    NameGenerator, RenameItem, RenameResult, RenamedItem, generate, strip_trailing_number,
};
