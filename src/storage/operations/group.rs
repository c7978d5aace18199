use crate::error::{Error, Result};
use crate::storage::utils::path::as_dir_path;
use opendal::Operator;

/// Trait for preparing the directory a batch of renamed objects is collected into
pub trait Grouper {
    /// Create the group directory if needed and return its operator path.
    async fn ensure_group(&self, name: &str) -> Result<String>;
}

pub struct OpenDalGrouper {
    operator: Operator,
}

impl OpenDalGrouper {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Grouper for OpenDalGrouper {
    async fn ensure_group(&self, name: &str) -> Result<String> {
        let dir = as_dir_path(name);
        if dir == "/" {
            return Err(Error::InvalidArgument {
                message: "group name cannot be empty".to_string(),
            });
        }

        if self.operator.exists(&dir).await? {
            log::debug!("group {dir} already exists");
        } else {
            self.operator.create_dir(&dir).await?;
            log::debug!("group {dir} created");
        }
        Ok(dir)
    }
}
