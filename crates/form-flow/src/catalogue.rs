//! Target form surface and timing budgets.

use action_primitives::PollBudget;
use famrelay_core_types::Sex;
use serde::{Deserialize, Serialize};

use crate::types::Field;

/// Placeholder in [`FormCatalogue::sex_option`] replaced by `male`/`female`
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Selectors for every element of the destination form the automaton
/// touches. All of them belong to the host page and any may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormCatalogue {
    pub first_name: String,
    pub last_name: String,
    /// Radio option per sex, with `{value}` standing for the normalized value
    pub sex_option: String,
    pub deceased_option: String,
    pub birth_date: String,
    pub birth_place: String,
    pub death_date: String,
    pub death_place: String,
    /// Items of the suggestion list owned by the birth-date input
    pub birth_date_suggestions: String,
    /// Items of the suggestion list owned by the death-date input
    pub death_date_suggestions: String,
    pub modal: String,
    /// Labels of modals that already host the form
    pub modal_labels: Vec<String>,
    /// Buttons clicked in order to bring the form up
    pub open_form_buttons: Vec<String>,
}

impl FormCatalogue {
    pub fn sex_selector(&self, sex: Sex) -> String {
        self.sex_option.replace(VALUE_PLACEHOLDER, sex.as_str())
    }

    /// Suggestion items scoped to `field`; `None` for fields without
    /// autocomplete
    pub fn suggestions_for(&self, field: Field) -> Option<&str> {
        match field {
            Field::BirthDate => Some(&self.birth_date_suggestions),
            Field::DeathDate => Some(&self.death_date_suggestions),
            _ => None,
        }
    }

    /// Whether `label` names a modal that hosts the form
    pub fn is_known_modal(&self, label: &str) -> bool {
        let label = label.trim().to_lowercase();
        !label.is_empty()
            && self
                .modal_labels
                .iter()
                .any(|known| label.contains(&known.trim().to_lowercase()))
    }
}

impl Default for FormCatalogue {
    fn default() -> Self {
        Self {
            first_name: "input[name='givenName']".into(),
            last_name: "input[name='surname']".into(),
            sex_option: "input[type='radio'][name='sex'][value='{value}']".into(),
            deceased_option: "input[type='radio'][name='living'][value='deceased']".into(),
            birth_date: "input[name='birthDate']".into(),
            birth_place: "input[name='birthPlace']".into(),
            death_date: "input[name='deathDate']".into(),
            death_place: "input[name='deathPlace']".into(),
            birth_date_suggestions: "#birthDate-listbox [role='option']".into(),
            death_date_suggestions: "#deathDate-listbox [role='option']".into(),
            modal: "[role='dialog']".into(),
            modal_labels: vec![
                "Add Person".into(),
                "Add Father".into(),
                "Add Mother".into(),
                "Add Spouse".into(),
                "Add Child".into(),
            ],
            open_form_buttons: vec![
                "button[data-testid='add-person-button']".into(),
                "button[data-testid='add-unconnected-person']".into(),
            ],
        }
    }
}

/// Polling budgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Waiting for a target element to render
    pub locate: PollBudget,

    /// Waiting for a suggestion list after a date is typed
    pub autocomplete: PollBudget,

    /// Polls to wait before accepting a lone suggestion
    pub min_single_attempts: u32,

    /// Pause after each settled field (milliseconds)
    pub settle_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            locate: PollBudget::new(100, 50),
            autocomplete: PollBudget::new(150, 20),
            min_single_attempts: 5,
            settle_ms: 200,
        }
    }
}
