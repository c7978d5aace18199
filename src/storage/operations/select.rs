use crate::error::{Error, Result};
use crate::naming::RenameItem;
use crate::storage::utils::path::{as_dir_path, normalize_path, object_name, split_extension};
use globset::GlobMatcher;
use opendal::{EntryMode, ErrorKind, Operator};
use regex::Regex;
use std::collections::HashSet;

/// An object picked for renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedObject {
    pub path: String,
    pub name: String,
}

impl SelectedObject {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = object_name(&path).to_string();
        Self { path, name }
    }

    /// The request entry handed to the name generator; with `keep_extension`
    /// only the stem is renamed.
    pub fn rename_item(&self, keep_extension: bool) -> RenameItem<SelectedObject> {
        let name = if keep_extension {
            split_extension(&self.name).0
        } else {
            self.name.as_str()
        };
        RenameItem::new(name, self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub recursive: bool,
    /// Matched against the object name
    pub name_glob: Option<GlobMatcher>,
    /// Matched against the full object path
    pub regex: Option<Regex>,
}

impl SelectOptions {
    fn is_match(&self, object: &SelectedObject) -> bool {
        if let Some(glob) = &self.name_glob
            && !glob.is_match(&object.name)
        {
            return false;
        }

        if let Some(re) = &self.regex
            && !re.is_match(&object.path)
        {
            return false;
        }

        true
    }
}

pub trait Selector {
    /// Resolve paths into the objects to rename, in selection order.
    async fn select(&self, path: &str, opts: &SelectOptions) -> Result<Vec<SelectedObject>>;
}

pub struct OpenDalSelector {
    operator: Operator,
}

impl OpenDalSelector {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    async fn list_dir(&self, dir: &str, opts: &SelectOptions) -> Result<Vec<SelectedObject>> {
        let entries = self
            .operator
            .list_with(dir)
            .recursive(opts.recursive)
            .await?;

        let mut objects: Vec<SelectedObject> = entries
            .into_iter()
            .filter(|entry| entry.metadata().mode() == EntryMode::FILE && entry.path() != dir)
            .map(|entry| SelectedObject::new(entry.path()))
            .filter(|object| opts.is_match(object))
            .collect();
        objects.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(objects)
    }
}

impl Selector for OpenDalSelector {
    async fn select(&self, path: &str, opts: &SelectOptions) -> Result<Vec<SelectedObject>> {
        let normalized = normalize_path(path);
        if normalized.ends_with('/') {
            return self.list_dir(&normalized, opts).await;
        }

        match self.operator.stat(&normalized).await {
            Ok(meta) if meta.mode() == EntryMode::DIR => {
                self.list_dir(&as_dir_path(&normalized), opts).await
            }
            Ok(_) => {
                let object = SelectedObject::new(normalized);
                Ok(if opts.is_match(&object) {
                    vec![object]
                } else {
                    Vec::new()
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Directories are only found by their '/'-terminated form on some backends
                let dir = as_dir_path(&normalized);
                match self.operator.stat(&dir).await {
                    Ok(meta) if meta.mode() == EntryMode::DIR => self.list_dir(&dir, opts).await,
                    _ => Err(Error::PathNotFound {
                        path: std::path::PathBuf::from(path),
                    }),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Merge per-path selections, keeping the first occurrence of each object.
pub fn merge_selections(selections: Vec<Vec<SelectedObject>>) -> Vec<SelectedObject> {
    let mut seen = HashSet::new();
    selections
        .into_iter()
        .flatten()
        .filter(|object| seen.insert(object.path.clone()))
        .collect()
}
