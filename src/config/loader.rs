use crate::config::{StorageProvider, storage_config::StorageConfig};
use crate::error::{Error, Result};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root used by the filesystem provider when nothing else is configured.
pub const DEFAULT_FS_ROOT: &str = ".";
/// Region assumed for S3-compatible providers when none is given.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Read the first available environment variable from a list of keys.
/// Empty strings are treated as missing values.
fn env_any_from(keys: &[&str], get: &dyn Fn(&str) -> Option<String>) -> Option<String> {
    keys.iter().find_map(|key| get(key))
}

fn env_any_required_from(keys: &[&str], get: &dyn Fn(&str) -> Option<String>) -> Result<String> {
    env_any_from(keys, get).ok_or_else(|| Error::MissingEnvVar {
        key: keys.join(" or "),
    })
}

/// Provider-specific environment variable keys
#[derive(Clone, Copy)]
struct ProviderKeys {
    bucket: &'static [&'static str],
    access_key_id: &'static [&'static str],
    secret_key: &'static [&'static str],
    region: &'static [&'static str],
    endpoint: &'static [&'static str],
}

fn cloud_keys(provider: StorageProvider, raw_provider: &str) -> Option<ProviderKeys> {
    match provider {
        StorageProvider::S3 if raw_provider.eq_ignore_ascii_case("minio") => Some(ProviderKeys {
            bucket: &["STORAGE_BUCKET", "MINIO_BUCKET"],
            access_key_id: &["STORAGE_ACCESS_KEY_ID", "MINIO_ACCESS_KEY"],
            secret_key: &["STORAGE_ACCESS_KEY_SECRET", "MINIO_SECRET_KEY"],
            region: &["STORAGE_REGION", "MINIO_DEFAULT_REGION"],
            endpoint: &["STORAGE_ENDPOINT", "MINIO_ENDPOINT"],
        }),
        StorageProvider::S3 => Some(ProviderKeys {
            bucket: &["STORAGE_BUCKET", "AWS_S3_BUCKET"],
            access_key_id: &["STORAGE_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID"],
            secret_key: &["STORAGE_ACCESS_KEY_SECRET", "AWS_SECRET_ACCESS_KEY"],
            region: &["STORAGE_REGION", "AWS_DEFAULT_REGION"],
            endpoint: &["STORAGE_ENDPOINT"],
        }),
        StorageProvider::Oss => Some(ProviderKeys {
            bucket: &["STORAGE_BUCKET", "OSS_BUCKET"],
            access_key_id: &["STORAGE_ACCESS_KEY_ID", "OSS_ACCESS_KEY_ID"],
            secret_key: &["STORAGE_ACCESS_KEY_SECRET", "OSS_ACCESS_KEY_SECRET"],
            region: &["STORAGE_REGION", "OSS_REGION"],
            endpoint: &["STORAGE_ENDPOINT", "OSS_ENDPOINT"],
        }),
        StorageProvider::Fs => None,
    }
}

/// Load storage configuration from environment variables.
///
/// `root_override` replaces `STORAGE_ROOT_PATH` for the filesystem provider.
pub fn load_storage_config(root_override: Option<String>) -> Result<StorageConfig> {
    load_storage_config_from_source(&env_value, root_override)
}

fn load_storage_config_from_source(
    get: &dyn Fn(&str) -> Option<String>,
    root_override: Option<String>,
) -> Result<StorageConfig> {
    let provider_str = get("STORAGE_PROVIDER").unwrap_or_else(|| {
        debug!("STORAGE_PROVIDER not set, using local filesystem");
        StorageProvider::Fs.as_str().to_string()
    });

    let provider = StorageProvider::from_str(&provider_str)?;

    let mut config = match cloud_keys(provider, &provider_str) {
        Some(keys) => load_cloud_config(provider, keys, get)?,
        None => StorageConfig::fs(root_override.or_else(|| get("STORAGE_ROOT_PATH"))),
    };

    prepare_storage_config(&mut config)?;
    Ok(config)
}

fn load_cloud_config(
    provider: StorageProvider,
    keys: ProviderKeys,
    get: &dyn Fn(&str) -> Option<String>,
) -> Result<StorageConfig> {
    let bucket = env_any_required_from(keys.bucket, get)?;
    let mut config = match provider {
        StorageProvider::Oss => StorageConfig::oss(bucket),
        _ => StorageConfig::s3(bucket),
    };

    config.access_key_id = env_any_from(keys.access_key_id, get);
    config.access_key_secret = env_any_from(keys.secret_key, get);
    config.region = env_any_from(keys.region, get);
    config.endpoint = env_any_from(keys.endpoint, get);
    Ok(config)
}

/// Fill defaults and check credentials once the raw values are known.
pub fn prepare_storage_config(config: &mut StorageConfig) -> Result<()> {
    match config.provider {
        StorageProvider::Fs => {
            let root = config.root_path.as_deref().unwrap_or(DEFAULT_FS_ROOT);
            config.root_path = Some(absolute_root(Path::new(root))?);
        }
        StorageProvider::S3 | StorageProvider::Oss => {
            if config.bucket.trim().is_empty() {
                return Err(Error::MissingConfigField {
                    provider: config.provider.as_str().to_string(),
                    field: "bucket".to_string(),
                });
            }

            match (&config.access_key_id, &config.access_key_secret) {
                (None, None) => config.anonymous = true,
                (Some(_), None) => {
                    return Err(Error::MissingConfigField {
                        provider: config.provider.as_str().to_string(),
                        field: "access_key_secret".to_string(),
                    });
                }
                (None, Some(_)) => {
                    return Err(Error::MissingConfigField {
                        provider: config.provider.as_str().to_string(),
                        field: "access_key_id".to_string(),
                    });
                }
                (Some(_), Some(_)) => config.anonymous = false,
            }

            if config.provider == StorageProvider::S3 && config.region.is_none() {
                config.region = Some(DEFAULT_S3_REGION.to_string());
            }
        }
    }
    Ok(())
}

fn absolute_root(root: &Path) -> Result<String> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        env::current_dir()?.join(root)
    };
    Ok(normalize(&absolute).to_string_lossy().into_owned())
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
