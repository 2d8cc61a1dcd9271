//! File store backed by one flat directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{DomainError, FileStore, StoredFile};

const MAX_EXTENSION_LENGTH: usize = 10;

/// Stores each upload as `<uuid>[.<ext>]` under `root`
#[derive(Debug, Clone)]
pub struct DirectoryFileStore {
    root: PathBuf,
}

impl DirectoryFileStore {
    /// Open the store, creating the directory when missing
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();

        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            error!(root = %root.display(), error = %e, "Error init storage");
            DomainError::storage(format!("Cannot create {}: {}", root.display(), e))
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generate_name(original_name: Option<&str>) -> String {
        let id = Uuid::new_v4().to_string();

        match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id,
        }
    }
}

/// Extension of an uploaded file name, when it is short and alphanumeric
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LENGTH
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

/// Stored names never contain separators or parent references
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}

#[async_trait]
impl FileStore for DirectoryFileStore {
    async fn save(
        &self,
        original_name: Option<String>,
        content: Bytes,
    ) -> Result<String, DomainError> {
        let name = Self::generate_name(original_name.as_deref());
        let path = self.root.join(&name);

        tokio::fs::write(&path, &content).await.map_err(|e| {
            error!(original = ?original_name, error = %e, "Error saving file");
            DomainError::storage(format!(
                "Error saving {} : {}",
                original_name.as_deref().unwrap_or("upload"),
                e
            ))
        })?;

        debug!(name = %name, size = content.len(), "Saved file");
        Ok(name)
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| DomainError::storage(format!("Cannot iterate files : {}", e)))?;
        let mut names = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::storage(format!("Cannot iterate files : {}", e)))?
        {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn load(&self, name: &str) -> Result<Option<StoredFile>, DomainError> {
        if !is_plain_name(name) {
            return Ok(None);
        }

        let path = self.root.join(name);

        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Some(StoredFile {
                name: name.to_string(),
                content_type: mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .to_string(),
                content: Bytes::from(content),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Error reading {}: {}", name, e))),
        }
    }
}
