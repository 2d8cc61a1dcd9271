//! Symbolic status class

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A family of HTTP status codes, addressed on the wire as `2xx`, `3xx`,
/// `4xx`, `5xx` or `random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusClass {
    #[serde(rename = "2xx")]
    Success,
    #[serde(rename = "3xx")]
    Redirection,
    #[serde(rename = "4xx")]
    ClientError,
    #[serde(rename = "5xx")]
    ServerError,
    #[serde(rename = "random")]
    Random,
}

impl StatusClass {
    pub const ALL: [StatusClass; 5] = [
        Self::Success,
        Self::Redirection,
        Self::ClientError,
        Self::ServerError,
        Self::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "2xx",
            Self::Redirection => "3xx",
            Self::ClientError => "4xx",
            Self::ServerError => "5xx",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of the five symbolic classes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' must match \"2xx|3xx|4xx|5xx|random\"")]
pub struct StatusClassParseError {
    pub value: String,
}

impl FromStr for StatusClass {
    type Err = StatusClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| StatusClassParseError {
                value: s.to_string(),
            })
    }
}
