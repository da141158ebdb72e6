use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RelayError;

/// Which of the two transports a channel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelKind {
    CrossOrigin,
    SameOrigin,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::CrossOrigin => "cross-origin",
            ChannelKind::SameOrigin => "same-origin",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-slot text transport. Every write replaces the slot entirely.
#[async_trait]
pub trait Channel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Current slot content, `None` when the slot is empty
    async fn read_raw(&self) -> Result<Option<String>, RelayError>;

    async fn write_raw(&self, payload: &str) -> Result<(), RelayError>;
}
