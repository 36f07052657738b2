use std::fmt;

use serde::{Deserialize, Serialize};

/// Social platform a post originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Twitter,
    Farcaster,
}

impl Source {
    /// Parse a lowercase platform name. Returns `None` for anything outside
    /// the allowed set; callers decide how to surface the rejection.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "twitter" => Some(Self::Twitter),
            "farcaster" => Some(Self::Farcaster),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Farcaster => "farcaster",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
