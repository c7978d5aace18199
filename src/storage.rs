pub use crate::config::{StorageProvider, storage_config::StorageConfig};
use crate::error::{Error, Result};
use futures::future::try_join_all;
use opendal::Operator;

pub mod operations;
pub mod utils;

use self::operations::group::OpenDalGrouper;
use self::operations::rename::OpenDalRenamer;
use self::operations::select::{OpenDalSelector, merge_selections};
use self::operations::{Grouper, Renamer, Selector};
use crate::wrap_err;

pub use self::operations::rename::{RenameOp, RenamePlan};
pub use self::operations::select::{SelectOptions, SelectedObject};

/// Storage client for the objects being renamed
#[derive(Clone)]
pub struct StorageClient {
    operator: Operator,
    provider: StorageProvider,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Result<Self> {
        let provider = config.provider;
        let operator = Self::build_operator(&config)?;
        Ok(Self { operator, provider })
    }

    #[allow(unused_variables)]
    fn build_operator(config: &StorageConfig) -> Result<Operator> {
        match config.provider {
            StorageProvider::Fs => {
                #[cfg(feature = "fs")]
                {
                    let root = config.root_path.as_deref().unwrap_or("/");
                    let builder = opendal::services::Fs::default().root(root);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "fs"))]
                {
                    Err(Self::feature_disabled(config.provider))
                }
            }
            StorageProvider::S3 => {
                #[cfg(feature = "s3")]
                {
                    let mut builder = opendal::services::S3::default().bucket(&config.bucket);
                    if config.anonymous {
                        builder = builder.allow_anonymous();
                    }
                    if let Some(access_key_id) = config.access_key_id.as_deref() {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(secret_access_key) = config.access_key_secret.as_deref() {
                        builder = builder.secret_access_key(secret_access_key);
                    }
                    if let Some(region) = config.region.as_deref() {
                        builder = builder.region(region);
                    }
                    if let Some(endpoint) = config.endpoint.as_deref() {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "s3"))]
                {
                    Err(Self::feature_disabled(config.provider))
                }
            }
            StorageProvider::Oss => {
                #[cfg(feature = "oss")]
                {
                    let mut builder = opendal::services::Oss::default().bucket(&config.bucket);
                    if config.anonymous {
                        builder = builder.allow_anonymous();
                    }
                    if let Some(access_key_id) = config.access_key_id.as_deref() {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(access_key_secret) = config.access_key_secret.as_deref() {
                        builder = builder.access_key_secret(access_key_secret);
                    }
                    if let Some(endpoint) = config.endpoint.as_deref() {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "oss"))]
                {
                    Err(Self::feature_disabled(config.provider))
                }
            }
        }
    }

    #[allow(dead_code)]
    fn feature_disabled(provider: StorageProvider) -> Error {
        Error::UnsupportedProvider {
            provider: format!("{} (feature disabled)", provider.as_str()),
        }
    }

    /// Resolve every path into objects, keeping the first occurrence of duplicates.
    pub async fn select_objects(
        &self,
        paths: &[String],
        opts: &SelectOptions,
    ) -> Result<Vec<SelectedObject>> {
        log::debug!(
            "select_objects provider={:?} paths={:?} recursive={}",
            self.provider,
            paths,
            opts.recursive
        );
        let selector = OpenDalSelector::new(self.operator.clone());
        let selections = try_join_all(paths.iter().map(|path| {
            let selector = &selector;
            async move {
                wrap_err!(
                    selector.select(path, opts).await,
                    SelectFailed {
                        path: path.to_string()
                    }
                )
            }
        }))
        .await?;
        Ok(merge_selections(selections))
    }

    pub async fn ensure_group(&self, name: &str) -> Result<String> {
        log::debug!("ensure_group provider={:?} name={}", self.provider, name);
        let grouper = OpenDalGrouper::new(self.operator.clone());
        wrap_err!(
            grouper.ensure_group(name).await,
            GroupFailed {
                group: name.to_string()
            }
        )
    }

    pub async fn apply_plan(&self, plan: &RenamePlan) -> Result<usize> {
        log::debug!(
            "apply_plan provider={:?} moves={} unchanged={}",
            self.provider,
            plan.ops.len(),
            plan.unchanged
        );
        let renamer = OpenDalRenamer::new(self.operator.clone());
        renamer.apply(plan).await
    }
}
