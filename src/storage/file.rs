use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use crate::storage::{DocumentStore, StorageError};

/// Stores each document as `<root>/<collection>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, collection: &str, key: &str) -> PathBuf {
        self.root
            .join(escape_segment(collection))
            .join(format!("{}.json", escape_segment(key)))
    }
}

/// Maps an arbitrary key onto a safe file name: ASCII alphanumerics, `-` and `_`
/// pass through, every other byte becomes `%XX`.
fn escape_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn put(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> Result<(), StorageError> {
        let path = self.path_for(collection, key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let body = serde_json::to_vec_pretty(&document)?;
        // Write-then-rename so readers never observe a half-written document.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &path).await?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StorageError> {
        let path = self.path_for(collection, key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
