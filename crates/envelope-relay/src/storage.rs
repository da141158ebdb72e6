//! Same-origin persistent slot.

use std::sync::Arc;

use action_primitives::{ActionError, DomPort};
use async_trait::async_trait;

use crate::channel::{Channel, ChannelKind};
use crate::errors::RelayError;

pub const DEFAULT_STORAGE_KEY: &str = "famrelay.envelope";

/// One named `localStorage` slot of the page's origin.
pub struct OriginStorageChannel {
    dom: Arc<dyn DomPort>,
    key: String,
}

impl OriginStorageChannel {
    pub fn new(dom: Arc<dyn DomPort>, key: impl Into<String>) -> Self {
        Self {
            dom,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn map_err(err: ActionError) -> RelayError {
    match err {
        ActionError::PermissionDenied(msg) => RelayError::PermissionDenied(msg),
        other => RelayError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl Channel for OriginStorageChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::SameOrigin
    }

    async fn read_raw(&self) -> Result<Option<String>, RelayError> {
        self.dom.storage_get(&self.key).await.map_err(map_err)
    }

    async fn write_raw(&self, payload: &str) -> Result<(), RelayError> {
        self.dom
            .storage_set(&self.key, payload)
            .await
            .map_err(map_err)
    }
}
