//! Flow execution error types

use famrelay_core_types::PipelineError;
use thiserror::Error;

/// Flow execution errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Pipeline-level condition, e.g. no record to fill with
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A step of the open-form sequence never became available
    #[error("Form step '{step}' unavailable after {attempts} attempts")]
    FormUnavailable { step: String, attempts: u32 },

    /// Action primitive error
    #[error("Action primitive error: {0}")]
    ActionError(String),
}

impl From<action_primitives::ActionError> for FlowError {
    fn from(err: action_primitives::ActionError) -> Self {
        FlowError::ActionError(err.to_string())
    }
}
