use snafu::Snafu;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use toml::{de::Error as TomlDeError, ser::Error as TomlSerError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid search pattern '{pattern}': {source}"))]
    InvalidSearchPattern {
        pattern: String,
        source: regex::Error,
    },

    #[snafu(display("Invalid replacement '{replacement}': {message}"))]
    InvalidReplacePattern { replacement: String, message: String },

    #[snafu(display("Invalid setting '{field}': {message}"))]
    InvalidSetting { field: String, message: String },

    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Missing required configuration field '{field}' for provider '{provider}'"))]
    MissingConfigField { provider: String, field: String },

    #[snafu(display("Unsupported storage provider: {provider}. Allowed: 'fs' | 's3' | 'minio' | 'oss'"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Path not found: {}", path.display()))]
    PathNotFound { path: PathBuf },

    #[snafu(display("No objects selected"))]
    NoSelection,

    #[snafu(display("Name conflict: '{first}' and '{second}' would both be renamed to '{target}'"))]
    NameConflict {
        target: String,
        first: String,
        second: String,
    },

    #[snafu(display("Cannot rename '{src_path}': '{dest_path}' already exists"))]
    TargetExists { src_path: String, dest_path: String },

    #[snafu(display("Operation not supported by this storage backend: {message}"))]
    Unsupported { message: String },

    #[snafu(display("Failed to select objects under '{path}': {source}"))]
    SelectFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to rename '{src_path}' to '{dest_path}': {source}"))]
    RenameFailed {
        src_path: String,
        dest_path: String,
        source: Box<Error>,
    },

    #[snafu(display(
        "{source}; {} object(s) could not be moved back: {}",
        stranded.len(),
        format_stranded(stranded)
    ))]
    RollbackIncomplete {
        /// `(current path, original path)` of every object left out of place
        stranded: Vec<(String, String)>,
        source: Box<Error>,
    },

    #[snafu(display("Failed to prepare group '{group}': {source}"))]
    GroupFailed { group: String, source: Box<Error> },

    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument { message: String },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("JSON serialization error: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("Failed to access '{}': {source}", path.display()))]
    SettingsStoreIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Nothing to undo: no rename recorded in '{}'", path.display()))]
    NothingToUndo { path: PathBuf },

    #[snafu(display("Failed to read rename journal '{}': {source}", path.display()))]
    JournalParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Failed to parse settings file '{}': {source}", path.display()))]
    SettingsStoreParse { path: PathBuf, source: TomlDeError },

    #[snafu(display("Failed to serialize settings file '{}': {source}", path.display()))]
    SettingsStoreSerialize { path: PathBuf, source: TomlSerError },

    #[snafu(display("Invalid UTF-8 in settings file '{}': {source}", path.display()))]
    SettingsStoreUtf8 {
        path: PathBuf,
        source: FromUtf8Error,
    },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json { source: error }
    }
}

impl Error {
    pub fn non_interactive(action: &str) -> Self {
        Error::InvalidArgument {
            message: format!(
                "{action} requires interactive input. Hint: rerun without --non-interactive or pass --yes."
            ),
        }
    }

    /// Whether the error stems from the rename configuration rather than storage.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSearchPattern { .. }
                | Error::InvalidReplacePattern { .. }
                | Error::InvalidSetting { .. }
        )
    }
}

fn format_stranded(stranded: &[(String, String)]) -> String {
    stranded
        .iter()
        .map(|(current, original)| format!("'{current}' (was '{original}')"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wrap a failed storage operation into a contextual error variant, boxing the cause.
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {
        $expr.map_err(|err| $crate::error::Error::$variant {
            $($field: $value,)*
            source: Box::new(err),
        })
    };
}
