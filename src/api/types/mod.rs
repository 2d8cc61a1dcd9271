//! Request extractors and response types shared by the handlers

pub mod error;
pub mod extract;

pub use error::{ApiError, ApiErrorResponse};
pub use extract::{Path, Query};
