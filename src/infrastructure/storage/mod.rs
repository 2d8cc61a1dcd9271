//! Storage infrastructure - directory-backed file store

mod directory;

pub use directory::DirectoryFileStore;
