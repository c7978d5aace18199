use crate::error::Error;
use std::str::FromStr;

/// Storage provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    Fs,
    S3,
    Oss,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fs" | "local" => Ok(Self::Fs),
            "s3" | "minio" => Ok(Self::S3),
            "oss" => Ok(Self::Oss),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::Fs => "fs",
            StorageProvider::S3 => "s3",
            StorageProvider::Oss => "oss",
        }
    }
}
