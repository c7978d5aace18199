pub mod journal;
pub mod loader;
pub mod provider;
pub mod settings_store;
pub mod storage_config;

pub use journal::RenameJournal;
pub use loader::{load_storage_config, prepare_storage_config};
pub use provider::StorageProvider;
pub use settings_store::SettingsStore;
pub use storage_config::StorageConfig;
