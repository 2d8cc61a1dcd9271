//! Chain call request, result and variant definitions

use std::fmt;

use super::headers::ForwardedHeaders;
use crate::domain::status::StatusClass;

/// The five status-forcing chain shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainVariant {
    /// Call the first peer's status endpoint
    One,
    /// Call the first peer's status endpoint, then the second peer's
    Two,
    /// Call the first peer's chain-one, which reaches the second peer
    Three,
    /// Like `One`, but the requested class goes to the peer instead
    Four,
    /// Like `Three`, but the requested class goes to the peer instead
    Five,
}

impl ChainVariant {
    pub const ALL: [ChainVariant; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Four => "four",
            Self::Five => "five",
        }
    }

    /// Class the outer response status is resolved from
    pub fn outer_class(&self, requested: StatusClass) -> StatusClass {
        match self {
            Self::One | Self::Two | Self::Three => requested,
            Self::Four | Self::Five => StatusClass::Success,
        }
    }

    /// Class sent to the first peer
    pub fn peer_class(&self, requested: StatusClass) -> StatusClass {
        match self {
            Self::One | Self::Two | Self::Three => StatusClass::Success,
            Self::Four | Self::Five => requested,
        }
    }
}

impl fmt::Display for ChainVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound headers plus the requested status class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest {
    pub headers: ForwardedHeaders,
    pub class: StatusClass,
}

impl ChainRequest {
    pub fn new(headers: ForwardedHeaders, class: StatusClass) -> Self {
        Self { headers, class }
    }
}

/// Outer status code plus the narrative of every hop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResult {
    pub status: u16,
    pub body: String,
}
