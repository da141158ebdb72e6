//! Dialog guard
//!
//! Clicking the open-form buttons while the form is already up reopens or
//! corrupts the in-progress form, so the trigger chain only runs when no
//! marker of an open form is present.

use action_primitives::{locate, DomPort, PollBudget, WaitOutcome};
use tracing::{debug, info};

use crate::catalogue::FormCatalogue;
use crate::errors::FlowError;

/// True if the first-name input exists anywhere or an open modal carries one
/// of the known labels. Read-only.
pub async fn is_target_form_open(dom: &dyn DomPort, catalogue: &FormCatalogue) -> bool {
    if dom.exists(&catalogue.first_name).await.unwrap_or(false) {
        debug!("First-name input present");
        return true;
    }
    let labels = dom.labels(&catalogue.modal).await.unwrap_or_default();
    let open = labels.iter().any(|label| catalogue.is_known_modal(label));
    debug!(?labels, open, "Checked open modals");
    open
}

/// Runs the open-form click chain, then waits for the first-name input.
///
/// Each button is polled for with `budget` before it is clicked.
pub async fn open_form(
    dom: &dyn DomPort,
    catalogue: &FormCatalogue,
    budget: PollBudget,
) -> Result<(), FlowError> {
    for button in &catalogue.open_form_buttons {
        await_step(dom, button, budget).await?;
        dom.click(button, 0).await?;
        debug!(button = %button, "Clicked open-form button");
    }
    await_step(dom, &catalogue.first_name, budget).await?;
    info!("Target form is open");
    Ok(())
}

async fn await_step(dom: &dyn DomPort, selector: &str, budget: PollBudget) -> Result<(), FlowError> {
    match locate(dom, selector, budget).await? {
        WaitOutcome::Found { .. } => Ok(()),
        WaitOutcome::TimedOut { attempts } => Err(FlowError::FormUnavailable {
            step: selector.to_string(),
            attempts,
        }),
    }
}
