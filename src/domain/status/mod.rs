//! Status domain - symbolic status classes and their concrete HTTP codes

mod class;
mod resolver;

pub use class::{StatusClass, StatusClassParseError};
pub use resolver::{StatusCodeResolver, StatusCodeTable};
