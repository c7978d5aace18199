pub mod generate;
pub mod preview;
pub mod rename;
pub mod settings;
pub mod undo;
