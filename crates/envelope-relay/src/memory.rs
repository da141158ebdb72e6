use async_trait::async_trait;
use parking_lot::Mutex;

use crate::channel::{Channel, ChannelKind};
use crate::errors::RelayError;

/// In-process channel. Can be made to refuse reads or writes, which is how a
/// permission-gated clipboard behaves.
#[derive(Debug)]
pub struct MemoryChannel {
    kind: ChannelKind,
    slot: Mutex<Option<String>>,
    deny_read: bool,
    deny_write: bool,
}

impl MemoryChannel {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            slot: Mutex::new(None),
            deny_read: false,
            deny_write: false,
        }
    }

    pub fn with_content(kind: ChannelKind, content: &str) -> Self {
        let channel = Self::new(kind);
        *channel.slot.lock() = Some(content.to_string());
        channel
    }

    pub fn deny_read(mut self) -> Self {
        self.deny_read = true;
        self
    }

    pub fn deny_write(mut self) -> Self {
        self.deny_write = true;
        self
    }

    pub fn content(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl Channel for MemoryChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn read_raw(&self) -> Result<Option<String>, RelayError> {
        if self.deny_read {
            return Err(RelayError::PermissionDenied(format!("{} read", self.kind)));
        }
        Ok(self.slot.lock().clone())
    }

    async fn write_raw(&self, payload: &str) -> Result<(), RelayError> {
        if self.deny_write {
            return Err(RelayError::PermissionDenied(format!("{} write", self.kind)));
        }
        *self.slot.lock() = Some(payload.to_string());
        Ok(())
    }
}
