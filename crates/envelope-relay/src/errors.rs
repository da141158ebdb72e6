use famrelay_core_types::PipelineError;
use thiserror::Error;

/// Channel-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The host refused access to the channel
    #[error("channel access denied: {0}")]
    PermissionDenied(String),

    /// The channel held something that is not an envelope
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The channel could not be reached at all
    #[error("channel unavailable: {0}")]
    Unavailable(String),
}

impl From<RelayError> for PipelineError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::PermissionDenied(msg) | RelayError::Unavailable(msg) => {
                PipelineError::ChannelPermissionDenied(msg)
            }
            RelayError::Malformed(msg) => PipelineError::MalformedPayload(msg),
        }
    }
}
