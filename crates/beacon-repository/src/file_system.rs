//! JSON-file key/value store
//!
//! The whole store is one JSON object on disk. Writes read the current
//! document, overlay the new keys and replace the file through a sibling
//! temporary file so a crash never leaves half a document behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::RepositoryError;
use crate::traits::{resolve, KeyValueStore, StoreMap};
use crate::RepositoryResult;

/// Key/value store persisted as a single JSON document
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> RepositoryResult<StoreMap> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(StoreMap::new());
        }

        match serde_json::from_str(&content)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(RepositoryError::Persistence(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, defaults: StoreMap) -> RepositoryResult<StoreMap> {
        let document = self.read_document().await?;
        Ok(resolve(&document, defaults))
    }

    async fn set(&self, items: StoreMap) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        let written = items.len();
        document.extend(items);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = written, "store document written");
        Ok(())
    }
}
