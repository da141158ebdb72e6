//! Core data types for action primitives

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Bounded polling budget: a fixed interval between probes and a cap on the
/// number of probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollBudget {
    /// Delay between two consecutive probes (milliseconds)
    pub interval_ms: u64,

    /// Maximum number of probes, including the first one
    pub max_attempts: u32,
}

impl PollBudget {
    pub const fn new(interval_ms: u64, max_attempts: u32) -> Self {
        Self {
            interval_ms,
            max_attempts,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        // 100ms x 50 = roughly five seconds to find an element
        Self::new(100, 50)
    }
}

/// Result of a bounded wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// The predicate held; `attempts` probes were spent
    Found { value: T, attempts: u32 },

    /// The budget ran out
    TimedOut { attempts: u32 },
}

impl<T> WaitOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, WaitOutcome::Found { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            WaitOutcome::Found { attempts, .. } | WaitOutcome::TimedOut { attempts } => *attempts,
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            WaitOutcome::Found { value, .. } => Some(value),
            WaitOutcome::TimedOut { .. } => None,
        }
    }
}

/// Synthetic events dispatched after a low-level value write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    Input,
    Change,
}

impl DomEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            DomEvent::Input => "input",
            DomEvent::Change => "change",
        }
    }
}

impl fmt::Display for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_about_five_seconds() {
        let budget = PollBudget::default();
        assert_eq!(budget.interval(), Duration::from_millis(100));
        assert_eq!(budget.max_attempts, 50);
    }

    #[test]
    fn outcome_accessors() {
        let found = WaitOutcome::Found {
            value: 3usize,
            attempts: 2,
        };
        assert!(found.is_found());
        assert_eq!(found.attempts(), 2);
        assert_eq!(found.found(), Some(3));

        let timed_out: WaitOutcome<usize> = WaitOutcome::TimedOut { attempts: 9 };
        assert_eq!(timed_out.attempts(), 9);
        assert_eq!(timed_out.found(), None);
    }
}
