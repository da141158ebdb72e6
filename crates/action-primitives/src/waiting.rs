//! Suspend-until-predicate waiting

use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, trace};

use crate::errors::ActionError;
use crate::port::DomPort;
use crate::types::{PollBudget, WaitOutcome};

/// Polls `probe` until it yields a value or the budget is spent.
///
/// The probe receives the 1-based attempt number. The first probe runs
/// immediately; every later probe runs `budget.interval()` after the previous
/// one. Never sleeps after the last attempt.
pub async fn wait_until<T, F, Fut>(budget: PollBudget, mut probe: F) -> WaitOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let max_attempts = budget.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if let Some(value) = probe(attempt).await {
            return WaitOutcome::Found { value, attempts: attempt };
        }
        if attempt < max_attempts {
            sleep(budget.interval()).await;
        }
    }
    WaitOutcome::TimedOut {
        attempts: max_attempts,
    }
}

/// Waits for at least one element to match `selector`.
///
/// Retryable query failures count as "not there yet"; the element is owned
/// by the host page and may be mid-render. Any other failure ends the wait
/// early and is returned.
pub async fn locate(
    dom: &dyn DomPort,
    selector: &str,
    budget: PollBudget,
) -> Result<WaitOutcome<()>, ActionError> {
    let outcome = wait_until(budget, |attempt| async move {
        match dom.exists(selector).await {
            Ok(true) => Some(Ok(())),
            Ok(false) => None,
            Err(err) if err.is_retryable() => {
                trace!(selector, attempt, "locate probe failed: {}", err);
                None
            }
            Err(err) => Some(Err(err)),
        }
    })
    .await;

    let outcome = match outcome {
        WaitOutcome::Found {
            value: Err(err),
            attempts,
        } => {
            debug!(selector, attempts, "locate aborted: {}", err);
            return Err(err);
        }
        WaitOutcome::Found { attempts, .. } => WaitOutcome::Found { value: (), attempts },
        WaitOutcome::TimedOut { attempts } => WaitOutcome::TimedOut { attempts },
    };
    debug!(
        selector,
        found = outcome.is_found(),
        attempts = outcome.attempts(),
        "locate finished"
    );
    Ok(outcome)
}
