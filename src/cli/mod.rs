pub mod context;
pub mod entry;
pub mod prompts;
pub mod rename;
pub mod settings;

pub use context::CliContext;
pub use entry::{
    Args, Command, GlobalOptions, RenameOptions, SettingsCommand, run, run_with_prompt,
};
pub use prompts::Prompt;
