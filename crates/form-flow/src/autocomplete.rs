//! Autocomplete resolution
//!
//! After a date is typed the host page may offer a list of standardized
//! interpretations, late and possibly growing between polls. The second
//! entry is the better-standardized match whenever there are several; a lone
//! entry is only trusted once the list has had time to fill.
//!
//! Each date input owns its own list; a list left open by one field is never
//! read as another field's suggestions.

use action_primitives::{wait_until, DomPort, PollBudget};
use tracing::{debug, trace, warn};

/// Outcome of one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index clicked, `None` when the value stays as typed
    pub selected: Option<usize>,
    /// Polls spent
    pub attempts: u32,
}

/// Index to pick given `count` candidates at poll `attempt`, if any yet
fn choose(count: usize, attempt: u32, min_single_attempts: u32) -> Option<usize> {
    match count {
        0 => None,
        1 if attempt >= min_single_attempts => Some(0),
        1 => None,
        _ => Some(1),
    }
}

/// Polls `suggestions` and clicks the chosen entry.
pub async fn resolve(
    dom: &dyn DomPort,
    suggestions: &str,
    budget: PollBudget,
    min_single_attempts: u32,
) -> Resolution {
    let outcome = wait_until(budget, |attempt| async move {
        let count = match dom.count(suggestions).await {
            Ok(count) => count,
            Err(err) => {
                trace!(attempt, "suggestion probe failed: {}", err);
                0
            }
        };
        choose(count, attempt, min_single_attempts)
    })
    .await;

    let attempts = outcome.attempts();
    let Some(index) = outcome.found() else {
        return Resolution {
            selected: None,
            attempts,
        };
    };
    if let Err(err) = dom.click(suggestions, index).await {
        warn!(index, "Suggestion vanished before it could be selected: {}", err);
        return Resolution {
            selected: None,
            attempts,
        };
    }
    debug!(index, attempts, "Selected suggestion");
    Resolution {
        selected: Some(index),
        attempts,
    }
}

/// Waits for the list behind `suggestions` to empty. Returns whether it did
/// within `budget`.
pub async fn wait_closed(dom: &dyn DomPort, suggestions: &str, budget: PollBudget) -> bool {
    let outcome = wait_until(budget, |_| async move {
        matches!(dom.count(suggestions).await, Ok(0)).then_some(())
    })
    .await;
    if !outcome.is_found() {
        warn!(
            suggestions,
            attempts = outcome.attempts(),
            "Suggestion list still open"
        );
    }
    outcome.is_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::testing::FakeDom;
    use pretty_assertions::assert_eq;

    const LIST: &str = "[role='option']";

    #[test]
    fn choice_policy() {
        assert_eq!(choose(0, 20, 5), None);
        assert_eq!(choose(1, 4, 5), None);
        assert_eq!(choose(1, 5, 5), Some(0));
        assert_eq!(choose(2, 1, 5), Some(1));
        assert_eq!(choose(7, 1, 5), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn growing_list_selects_second_entry() {
        let dom = FakeDom::new();
        dom.script_counts(LIST, vec![0, 0, 3]);

        let resolution = resolve(&dom, LIST, PollBudget::new(150, 20), 5).await;

        assert_eq!(
            resolution,
            Resolution {
                selected: Some(1),
                attempts: 3
            }
        );
        assert_eq!(dom.clicks(), vec![(LIST.to_string(), 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn lone_entry_is_accepted_only_after_minimum_polls() {
        let dom = FakeDom::new();
        dom.script_counts(LIST, vec![1]);

        let resolution = resolve(&dom, LIST, PollBudget::new(150, 20), 5).await;

        assert_eq!(resolution.selected, Some(0));
        assert_eq!(resolution.attempts, 5);
        assert_eq!(dom.clicks(), vec![(LIST.to_string(), 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_second_entry_wins_over_waiting_single() {
        let dom = FakeDom::new();
        dom.script_counts(LIST, vec![1, 1, 2]);

        let resolution = resolve(&dom, LIST, PollBudget::new(150, 20), 5).await;
        assert_eq!(resolution.selected, Some(1));
        assert_eq!(resolution.attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_list_is_awaited() {
        let dom = FakeDom::new();
        dom.script_counts(LIST, vec![2, 1, 0]);

        assert!(wait_closed(&dom, LIST, PollBudget::new(150, 20)).await);
        assert_eq!(dom.ops_for(LIST).len(), 3);
        assert!(dom.clicks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn list_that_stays_open_is_reported() {
        let dom = FakeDom::new();
        dom.script_counts(LIST, vec![1]);

        assert!(!wait_closed(&dom, LIST, PollBudget::new(150, 4)).await);
        assert_eq!(dom.ops_for(LIST).len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_list_times_out_without_clicking() {
        let dom = FakeDom::new();

        let resolution = resolve(&dom, LIST, PollBudget::new(150, 20), 5).await;

        assert_eq!(
            resolution,
            Resolution {
                selected: None,
                attempts: 20
            }
        );
        assert!(dom.clicks().is_empty());
    }
}
