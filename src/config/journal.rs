use crate::config::settings_store::write_atomic;
use crate::error::{Error, Result};
use crate::storage::{RenameOp, RenamePlan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the journal, stored next to the settings file
pub const JOURNAL_FILE_NAME: &str = "last-rename.json";

/// The moves of the last applied rename, kept so it can be undone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameJournal {
    /// [`crate::config::StorageConfig::location`] the moves were applied to
    pub storage: String,
    pub moves: Vec<RenameOp>,
}

impl RenameJournal {
    pub fn new(storage: impl Into<String>, plan: &RenamePlan) -> Self {
        Self {
            storage: storage.into(),
            moves: plan.ops.clone(),
        }
    }

    pub fn path_beside(settings_path: &Path) -> PathBuf {
        settings_path.with_file_name(JOURNAL_FILE_NAME)
    }

    /// Read the journal; `None` when no rename has been recorded.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::SettingsStoreIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let journal = serde_json::from_slice(&raw).map_err(|source| Error::JournalParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(journal))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| Error::SettingsStoreIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = serde_json::to_vec_pretty(self)?;
        write_atomic(path, &serialized)?;
        log::debug!("recorded {} move(s) in {}", self.moves.len(), path.display());
        Ok(())
    }

    /// Forget the recorded rename once it has been undone.
    pub fn remove(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::SettingsStoreIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Moves that put every object back under its previous path, newest first.
    pub fn undo_plan(&self) -> RenamePlan {
        RenamePlan {
            ops: self
                .moves
                .iter()
                .rev()
                .map(|op| RenameOp {
                    from: op.to.clone(),
                    to: op.from.clone(),
                })
                .collect(),
            unchanged: 0,
        }
    }
}
