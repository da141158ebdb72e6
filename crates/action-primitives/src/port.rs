//! The page seam.

use async_trait::async_trait;

use crate::errors::ActionError;
use crate::types::DomEvent;

/// Every read and write the pipeline performs against a live document.
///
/// Selectors are CSS selectors evaluated against the whole document. Methods
/// that target "the element" act on the first match. Implementations must
/// report a missing element as [`ActionError::AnchorNotFound`] so callers can
/// keep polling.
#[async_trait]
pub trait DomPort: Send + Sync {
    /// URL of the document currently loaded
    async fn current_url(&self) -> Result<String, ActionError>;

    /// Number of elements matching `selector`
    async fn count(&self, selector: &str) -> Result<usize, ActionError>;

    async fn exists(&self, selector: &str) -> Result<bool, ActionError> {
        Ok(self.count(selector).await? > 0)
    }

    /// Rendered text of the first match, `None` if nothing matches
    async fn text(&self, selector: &str) -> Result<Option<String>, ActionError>;

    /// Attribute of the first match, `None` if nothing matches or the
    /// attribute is missing
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ActionError>;

    async fn scroll_into_view(&self, selector: &str) -> Result<(), ActionError>;

    async fn focus(&self, selector: &str) -> Result<(), ActionError>;

    /// Low-level value injection.
    ///
    /// Writes the element's underlying value through the native property
    /// setter, bypassing any value a managed input component has cached, so
    /// that the next `input`/`change` event is seen as a real change by the
    /// hosting framework. Does not dispatch events itself.
    async fn inject_value(&self, selector: &str, value: &str) -> Result<(), ActionError>;

    /// Dispatches a bubbling synthetic event on the first match
    async fn dispatch(&self, selector: &str, event: DomEvent) -> Result<(), ActionError>;

    /// Clicks the `index`-th element matching `selector`
    async fn click(&self, selector: &str, index: usize) -> Result<(), ActionError>;

    /// Accessible labels of the elements matching `selector`, taken from
    /// `aria-label` or, failing that, the rendered text
    async fn labels(&self, selector: &str) -> Result<Vec<String>, ActionError>;

    /// Origin-scoped persistent storage read
    async fn storage_get(&self, key: &str) -> Result<Option<String>, ActionError>;

    /// Origin-scoped persistent storage write
    async fn storage_set(&self, key: &str, value: &str) -> Result<(), ActionError>;
}
