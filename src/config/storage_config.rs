use crate::config::StorageProvider;

/// Where the objects to rename live
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub root_path: Option<String>,
    pub anonymous: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Fs,
            bucket: String::new(),
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: None,
            anonymous: false,
        }
    }
}

impl StorageConfig {
    fn new(provider: StorageProvider, bucket: impl Into<String>) -> Self {
        Self {
            provider,
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    pub fn s3(bucket: impl Into<String>) -> Self {
        Self::new(StorageProvider::S3, bucket)
    }

    pub fn oss(bucket: impl Into<String>) -> Self {
        Self::new(StorageProvider::Oss, bucket)
    }

    /// Identifies the storage a rename was applied to, e.g. `fs:/data/scenes`
    /// or `s3:assets@http://127.0.0.1:9000`. Credentials are never included.
    pub fn location(&self) -> String {
        match self.provider {
            StorageProvider::Fs => {
                format!("fs:{}", self.root_path.as_deref().unwrap_or("/"))
            }
            provider => match self.endpoint.as_deref() {
                Some(endpoint) => format!("{}:{}@{endpoint}", provider.as_str(), self.bucket),
                None => format!("{}:{}", provider.as_str(), self.bucket),
            },
        }
    }

    pub fn fs(root_path: Option<String>) -> Self {
        Self {
            provider: StorageProvider::Fs,
            bucket: "local".to_string(),
            root_path,
            ..Default::default()
        }
    }
}
