use thiserror::Error;

/// Failure taxonomy shared across the pipeline.
///
/// None of these abort the host page. Each is either absorbed where it occurs
/// (with a fallback) or surfaced to the operator as a single notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Expected source markup is absent; the field is omitted.
    #[error("extraction markup not found: {0}")]
    ExtractionNotFound(String),

    /// The host refused access to a relay channel.
    #[error("channel permission denied: {0}")]
    ChannelPermissionDenied(String),

    /// Channel content is not a valid envelope; treated as absent.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Reconciliation found nothing usable; filling must not start.
    #[error("no authoritative record available")]
    NoAuthoritativeRecord,

    /// A target element never appeared within its budget.
    #[error("field '{field}' not found after {attempts} attempts")]
    FieldLocateTimeout { field: String, attempts: u32 },

    /// No acceptable suggestion resolved; the typed value is kept.
    #[error("no autocomplete suggestion for '{field}' after {attempts} attempts")]
    AutocompleteTimeout { field: String, attempts: u32 },
}
