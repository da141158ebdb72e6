//! Field-level primitives
//!
//! Two interactions cover the whole target form:
//! 1. set_field_value - write a text value the framework will notice
//! 2. select_option - single click on a radio-style option

use tracing::{debug, info};

use crate::errors::ActionError;
use crate::port::DomPort;
use crate::types::DomEvent;

/// Sets the value of the element matching `selector`.
///
/// Steps:
/// 1. Scroll the element into view
/// 2. Focus it
/// 3. Inject the value through the low-level setter
/// 4. Dispatch `input` then `change`
///
/// An empty `value` is written like any other value; it clears the field.
pub async fn set_field_value(
    dom: &dyn DomPort,
    selector: &str,
    value: &str,
) -> Result<(), ActionError> {
    info!(selector, value_length = value.len(), "Setting field value");

    dom.scroll_into_view(selector).await?;
    dom.focus(selector).await?;
    dom.inject_value(selector, value).await?;
    for event in [DomEvent::Input, DomEvent::Change] {
        debug!(selector, event = %event, "Dispatching synthetic event");
        dom.dispatch(selector, event).await?;
    }
    Ok(())
}

/// Selects a radio-style option by clicking it once.
pub async fn select_option(dom: &dyn DomPort, selector: &str) -> Result<(), ActionError> {
    info!(selector, "Selecting option");

    dom.scroll_into_view(selector).await?;
    dom.click(selector, 0).await
}
