//! Storage domain - flat file store for uploaded documents and images

mod repository;

pub use repository::{FileStore, StoredFile};

#[cfg(test)]
pub use repository::MockFileStore;
