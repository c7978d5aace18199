// Storage operation traits and implementations
pub mod group;
pub mod rename;
pub mod select;

pub use group::Grouper;
pub use rename::Renamer;
pub use select::Selector;
