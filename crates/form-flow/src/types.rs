//! Core types for form filling

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Target form fields, in the order they are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Sex,
    Deceased,
    BirthDate,
    BirthPlace,
    DeathDate,
    DeathPlace,
}

/// How a field is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Typed value, settles immediately
    Text,
    /// Typed value followed by autocomplete resolution
    Date,
    /// Radio-style option, single click
    Choice,
}

impl Field {
    /// Deceased must precede the death fields; they only render once it is
    /// selected.
    pub const FILL_ORDER: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Sex,
        Field::Deceased,
        Field::BirthDate,
        Field::BirthPlace,
        Field::DeathDate,
        Field::DeathPlace,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            Field::FirstName | Field::LastName | Field::BirthPlace | Field::DeathPlace => {
                FieldKind::Text
            }
            Field::BirthDate | Field::DeathDate => FieldKind::Date,
            Field::Sex | Field::Deceased => FieldKind::Choice,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Sex => "sex",
            Field::Deceased => "deceased",
            Field::BirthDate => "birth date",
            Field::BirthPlace => "birth place",
            Field::DeathDate => "death date",
            Field::DeathPlace => "death place",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field automaton state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    Idle,
    Searching,
    Located,
    ValueSet,
    AutocompleteResolving,
    Settled,
    GaveUp,
}

impl FieldState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FieldState::Settled | FieldState::GaveUp)
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: FieldState) -> bool {
        use FieldState::*;
        matches!(
            (self, next),
            (Idle, Searching)
                | (Searching, Located)
                | (Searching, GaveUp)
                | (Located, ValueSet)
                | (Located, GaveUp)
                | (ValueSet, AutocompleteResolving)
                | (ValueSet, Settled)
                | (AutocompleteResolving, Settled)
                | (AutocompleteResolving, GaveUp)
        )
    }
}

/// What happened to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    pub field: Field,
    pub state: FieldState,

    /// Locate probes spent
    pub attempts: u32,

    /// Suggestion index picked by the autocomplete resolver
    pub suggestion: Option<usize>,

    /// Error message (if given up)
    pub error: Option<String>,
}

impl FieldOutcome {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            state: FieldState::Idle,
            attempts: 0,
            suggestion: None,
            error: None,
        }
    }

    pub fn advance(&mut self, next: FieldState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        trace!(field = %self.field, from = ?self.state, to = ?next, "Field state change");
        self.state = next;
    }

    pub fn give_up(mut self, error: String) -> Self {
        self.advance(FieldState::GaveUp);
        self.error = Some(error);
        self
    }
}

/// Result of one fill run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillReport {
    pub filled: Vec<Field>,
    pub skipped: Vec<Field>,
    pub gave_up: Vec<Field>,
    pub outcomes: Vec<FieldOutcome>,

    /// Start time
    pub started_at: DateTime<Utc>,

    /// Finish time
    pub finished_at: DateTime<Utc>,

    /// Total latency in milliseconds
    pub latency_ms: u64,
}

impl FillReport {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            filled: Vec::new(),
            skipped: Vec::new(),
            gave_up: Vec::new(),
            outcomes: Vec::new(),
            started_at: now,
            finished_at: now,
            latency_ms: 0,
        }
    }

    /// Files `outcome` under filled, skipped or gave up
    pub fn push(&mut self, outcome: FieldOutcome) {
        debug_assert!(
            outcome.state.is_terminal() || outcome.state == FieldState::Idle,
            "{} pushed mid-flight in {:?}",
            outcome.field,
            outcome.state
        );
        match outcome.state {
            FieldState::Settled => self.filled.push(outcome.field),
            FieldState::GaveUp => self.gave_up.push(outcome.field),
            _ => self.skipped.push(outcome.field),
        }
        self.outcomes.push(outcome);
    }

    pub fn outcome(&self, field: Field) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|outcome| outcome.field == field)
    }

    pub fn is_complete(&self) -> bool {
        self.gave_up.is_empty()
    }

    /// Set finish time and calculate latency
    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self.latency_ms = (self.finished_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
        self
    }
}

impl Default for FillReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deceased_precedes_death_fields() {
        let position = |field| Field::FILL_ORDER.iter().position(|f| *f == field);
        assert!(position(Field::Deceased) < position(Field::DeathDate));
        assert!(position(Field::Deceased) < position(Field::DeathPlace));
        assert_eq!(Field::FILL_ORDER[0], Field::FirstName);
    }

    #[test]
    fn give_up_only_from_searching_located_or_resolving() {
        assert!(FieldState::Searching.can_advance_to(FieldState::GaveUp));
        assert!(FieldState::AutocompleteResolving.can_advance_to(FieldState::GaveUp));
        assert!(!FieldState::Idle.can_advance_to(FieldState::GaveUp));
        assert!(!FieldState::Settled.can_advance_to(FieldState::Searching));
        assert!(FieldState::ValueSet.can_advance_to(FieldState::Settled));
    }

    #[test]
    fn report_sorts_outcomes_by_final_state() {
        let mut report = FillReport::new();

        let mut settled = FieldOutcome::new(Field::FirstName);
        for state in [FieldState::Searching, FieldState::Located, FieldState::ValueSet, FieldState::Settled] {
            settled.advance(state);
        }
        report.push(settled);

        let mut lost = FieldOutcome::new(Field::LastName);
        lost.advance(FieldState::Searching);
        report.push(lost.give_up("gone".into()));

        report.push(FieldOutcome::new(Field::Sex));

        assert_eq!(report.filled, vec![Field::FirstName]);
        assert_eq!(report.gave_up, vec![Field::LastName]);
        assert_eq!(report.skipped, vec![Field::Sex]);
        assert!(!report.is_complete());
        assert_eq!(
            report.outcome(Field::LastName).and_then(|o| o.error.as_deref()),
            Some("gone")
        );
    }
}
