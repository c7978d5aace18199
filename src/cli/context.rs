use crate::config::{SettingsStore, StorageConfig, load_storage_config};
use crate::error::{Error, Result};
use crate::naming::RenameConfig;
use crate::storage::StorageClient;

use super::entry::{Args, Command, GlobalOptions, RenameOptions};
use super::prompts::Prompt;

pub struct CliContext {
    options: GlobalOptions,
    command: Command,
    storage: Option<StorageConfig>,
    prompt: Prompt,
}

impl CliContext {
    pub fn from_args(args: Args, prompt: Prompt) -> Result<Self> {
        let storage = if args.command.requires_storage() {
            Some(load_storage_config(args.global.root.clone())?)
        } else {
            None
        };

        Ok(Self {
            options: args.global,
            command: args.command,
            storage,
            prompt,
        })
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn is_non_interactive(&self) -> bool {
        self.options.non_interactive
    }

    pub fn ensure_interactive(&self, action: &str) -> Result<()> {
        if self.is_non_interactive() {
            Err(Error::non_interactive(action))
        } else {
            Ok(())
        }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn open_settings(&self) -> Result<SettingsStore> {
        SettingsStore::open(self.options.settings.clone())
    }

    /// Stored settings with this invocation's flags layered on top.
    pub fn rename_config(&self, overrides: &RenameOptions) -> Result<RenameConfig> {
        let store = self.open_settings()?;
        let config = overrides.apply_to(store.config());
        config.validate()?;
        Ok(config)
    }

    pub fn storage_config(&self) -> Result<&StorageConfig> {
        self.storage.as_ref().ok_or_else(|| Error::InvalidArgument {
            message: "this command does not use storage".to_string(),
        })
    }

    pub fn storage_client(&self) -> Result<StorageClient> {
        StorageClient::new(self.storage_config()?.clone())
    }
}
