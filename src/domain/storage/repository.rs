//! File store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// A stored file loaded back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub content_type: String,
    pub content: Bytes,
}

/// Flat key-value blob store keyed by generated file names
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileStore: Send + Sync + Debug {
    /// Saves content under a freshly generated name and returns that name
    async fn save(&self, original_name: Option<String>, content: Bytes)
        -> Result<String, DomainError>;

    /// Lists every stored name
    async fn list(&self) -> Result<Vec<String>, DomainError>;

    /// Loads a stored file, `None` when the name is unknown
    async fn load(&self, name: &str) -> Result<Option<StoredFile>, DomainError>;
}
