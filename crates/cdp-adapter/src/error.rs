use std::fmt;

use action_primitives::ActionError;
use thiserror::Error;

/// High-level error categories surfaced by the adapter.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AdapterErrorKind {
    #[error("could not attach to the browser")]
    Connect,
    #[error("no page is open")]
    NoPage,
    #[error("cdp i/o failure")]
    CdpIo,
}

#[derive(Clone, Debug)]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub hint: Option<String>,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for AdapterError {}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind) -> Self {
        Self { kind, hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<AdapterError> for ActionError {
    fn from(err: AdapterError) -> Self {
        ActionError::CdpIo(err.to_string())
    }
}
