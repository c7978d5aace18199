use crate::error::{Error, Result};
use crate::naming::RenameConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Environment variable that overrides the settings file location
pub const SETTINGS_PATH_ENV: &str = "BATCHREN_SETTINGS";

/// Settings file structure (in-memory and persisted)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    rename: RenameConfig,
}

/// Rename settings remembered between invocations.
///
/// A missing file reads as [`RenameConfig::default`]; nothing is written
/// until [`SettingsStore::save`] or [`SettingsStore::clear`] is called.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    file: SettingsFile,
}

impl SettingsStore {
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(default_store_path);
        if path.is_dir() {
            return Err(Error::SettingsStoreIo {
                path,
                source: std::io::Error::other("settings path points to a directory"),
            });
        }

        let file = if path.exists() {
            Self::read_file(&path)?
        } else {
            log::debug!("settings file {} not found, using defaults", path.display());
            SettingsFile::default()
        };

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RenameConfig {
        &self.file.rename
    }

    pub fn save(&mut self, config: RenameConfig) -> Result<()> {
        config.validate()?;
        self.file.rename = config;
        self.persist()
    }

    /// Reset to the cleared state and persist it.
    pub fn clear(&mut self) -> Result<()> {
        self.file.rename = RenameConfig::cleared();
        self.persist()
    }

    /// Render the stored settings the way they are written to disk.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.file).map_err(|source| Error::SettingsStoreSerialize {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self) -> Result<()> {
        let serialized = self.to_toml()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| Error::SettingsStoreIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        write_atomic(&self.path, serialized.as_bytes())?;
        log::debug!("settings written to {}", self.path.display());
        Ok(())
    }

    fn read_file(path: &Path) -> Result<SettingsFile> {
        let raw = fs::read(path).map_err(|source| Error::SettingsStoreIo {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.is_empty() {
            return Ok(SettingsFile::default());
        }

        let text = String::from_utf8(raw).map_err(|source| Error::SettingsStoreUtf8 {
            path: path.to_path_buf(),
            source,
        })?;

        let file: SettingsFile = toml::from_str(&text).map_err(|source| Error::SettingsStoreParse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Err(err) = file.rename.validate() {
            log::warn!("ignoring stored settings in {}: {err}", path.display());
            return Ok(SettingsFile::default());
        }

        Ok(file)
    }
}

/// RAII guard for temporary files (auto-cleanup on drop)
struct TempFile {
    path: PathBuf,
    should_cleanup: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            should_cleanup: true,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn keep(mut self) {
        self.should_cleanup = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.should_cleanup && self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn default_store_path() -> PathBuf {
    env::var(SETTINGS_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            directories::BaseDirs::new().map(|base_dirs| {
                base_dirs
                    .home_dir()
                    .join(".config")
                    .join("batchren")
                    .join("settings.toml")
            })
        })
        .unwrap_or_else(|| {
            env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("batchren-settings.toml")
        })
}

pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let tmp_path = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("batchren"),
        Uuid::new_v4().simple()
    ));

    let temp_file = TempFile::new(tmp_path);
    write_atomic_inner(path, temp_file.path(), data)?;
    temp_file.keep();
    Ok(())
}

fn write_atomic_inner(path: &Path, tmp_path: &Path, data: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        options.mode(0o600);
    }

    let mut file = options.open(tmp_path).map_err(io_error(tmp_path))?;
    file.write_all(data).map_err(io_error(tmp_path))?;
    file.sync_all().map_err(io_error(tmp_path))?;
    drop(file);

    if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup).map_err(io_error(&backup))?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&backup, perms).map_err(io_error(&backup))?;
        }
    }

    fs::rename(tmp_path, path).map_err(io_error(path))?;
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.to_path_buf();
    move |source| Error::SettingsStoreIo { path, source }
}

fn backup_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("settings.toml");
    path.with_file_name(format!("{file_name}.bak"))
}
