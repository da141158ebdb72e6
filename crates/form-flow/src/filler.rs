//! Form-fill automaton

use action_primitives::{locate, select_option, set_field_value, DomPort, WaitOutcome};
use famrelay_core_types::{PipelineError, Record};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::autocomplete::{resolve, wait_closed};
use crate::catalogue::{FormCatalogue, Timing};
use crate::errors::FlowError;
use crate::guard::{is_target_form_open, open_form};
use crate::types::{Field, FieldKind, FieldOutcome, FieldState, FillReport};

/// One planned interaction
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Type { selector: String, value: String },
    Choose { selector: String },
}

impl Step {
    fn selector(&self) -> &str {
        match self {
            Step::Type { selector, .. } | Step::Choose { selector } => selector,
        }
    }
}

/// Fills the destination form from a reconciled record.
#[derive(Debug, Clone, Default)]
pub struct FormFiller {
    catalogue: FormCatalogue,
    timing: Timing,
}

impl FormFiller {
    pub fn new(catalogue: FormCatalogue, timing: Timing) -> Self {
        Self { catalogue, timing }
    }

    pub fn catalogue(&self) -> &FormCatalogue {
        &self.catalogue
    }

    /// Opens the form unless it already is.
    ///
    /// Returns whether the trigger chain ran.
    pub async fn ensure_open(&self, dom: &dyn DomPort) -> Result<bool, FlowError> {
        if is_target_form_open(dom, &self.catalogue).await {
            info!("Target form already open; not triggering it again");
            return Ok(false);
        }
        open_form(dom, &self.catalogue, self.timing.locate).await?;
        Ok(true)
    }

    /// Fills every field the record has a value for, strictly in
    /// [`Field::FILL_ORDER`].
    ///
    /// Fields without a source value are skipped without touching the page.
    /// Name fields are always written once the record is non-empty, an absent
    /// last name as "". A field that cannot be reached is given up and the
    /// run moves on.
    pub async fn fill(&self, dom: &dyn DomPort, record: &Record) -> Result<FillReport, FlowError> {
        if record.is_empty() {
            warn!("Refusing to fill the form from an empty record");
            return Err(PipelineError::NoAuthoritativeRecord.into());
        }
        let record = record.clone().normalized();

        let mut report = FillReport::new();
        let mut open_list = None;
        for field in Field::FILL_ORDER {
            let outcome = match self.plan(field, &record) {
                Some(step) => self.fill_field(dom, field, step, &mut open_list).await,
                None => {
                    debug!(field = %field, "No source value; skipping");
                    FieldOutcome::new(field)
                }
            };
            report.push(outcome);
        }

        let report = report.finish();
        info!(
            filled = report.filled.len(),
            skipped = report.skipped.len(),
            gave_up = report.gave_up.len(),
            latency_ms = report.latency_ms,
            "Form fill finished"
        );
        Ok(report)
    }

    fn plan(&self, field: Field, record: &Record) -> Option<Step> {
        let catalogue = &self.catalogue;
        let typed = |selector: &str, value: Option<&String>| {
            value.map(|value| Step::Type {
                selector: selector.to_string(),
                value: value.clone(),
            })
        };
        match field {
            Field::FirstName => Some(Step::Type {
                selector: catalogue.first_name.clone(),
                value: record.given_names(),
            }),
            Field::LastName => Some(Step::Type {
                selector: catalogue.last_name.clone(),
                value: record.last_name.clone().unwrap_or_default(),
            }),
            Field::Sex => record.sex.map(|sex| Step::Choose {
                selector: catalogue.sex_selector(sex),
            }),
            Field::Deceased => record.is_deceased().then(|| Step::Choose {
                selector: catalogue.deceased_option.clone(),
            }),
            Field::BirthDate => typed(&catalogue.birth_date, record.birth_date.as_ref()),
            Field::BirthPlace => typed(&catalogue.birth_place, record.birth_place.as_ref()),
            Field::DeathDate => typed(&catalogue.death_date, record.death_date.as_ref()),
            Field::DeathPlace => typed(&catalogue.death_place, record.death_place.as_ref()),
        }
    }

    /// `open_list` carries the suggestion list the previous date field may
    /// have left open.
    async fn fill_field(
        &self,
        dom: &dyn DomPort,
        field: Field,
        step: Step,
        open_list: &mut Option<String>,
    ) -> FieldOutcome {
        let mut outcome = FieldOutcome::new(field);
        outcome.advance(FieldState::Searching);

        match locate(dom, step.selector(), self.timing.locate).await {
            Ok(WaitOutcome::Found { attempts, .. }) => {
                outcome.attempts = attempts;
                outcome.advance(FieldState::Located);
            }
            Err(err) => {
                warn!(field = %field, selector = step.selector(), "Field cannot be reached: {}", err);
                return outcome.give_up(err.to_string());
            }
            Ok(WaitOutcome::TimedOut { attempts }) => {
                outcome.attempts = attempts;
                let err = PipelineError::FieldLocateTimeout {
                    field: field.label().to_string(),
                    attempts,
                };
                warn!(field = %field, selector = step.selector(), "{}", err);
                return outcome.give_up(err.to_string());
            }
        }

        let written = match &step {
            Step::Type { selector, value } => set_field_value(dom, selector, value).await,
            Step::Choose { selector } => select_option(dom, selector).await,
        };
        if let Err(err) = written {
            warn!(field = %field, "Located field could not be written: {}", err);
            return outcome.give_up(err.to_string());
        }
        outcome.advance(FieldState::ValueSet);

        if let (FieldKind::Date, Some(suggestions)) =
            (field.kind(), self.catalogue.suggestions_for(field))
        {
            outcome.advance(FieldState::AutocompleteResolving);
            if let Some(previous) = open_list.take() {
                if previous != suggestions {
                    wait_closed(dom, &previous, self.timing.autocomplete).await;
                }
            }
            let resolution = resolve(
                dom,
                suggestions,
                self.timing.autocomplete,
                self.timing.min_single_attempts,
            )
            .await;
            *open_list = Some(suggestions.to_string());
            outcome.suggestion = resolution.selected;
            if resolution.selected.is_none() {
                let err = PipelineError::AutocompleteTimeout {
                    field: field.label().to_string(),
                    attempts: resolution.attempts,
                };
                info!(field = %field, "{}; keeping typed value", err);
            }
        }

        outcome.advance(FieldState::Settled);
        debug!(field = %field, attempts = outcome.attempts, "Field settled");
        if self.timing.settle_ms > 0 {
            sleep(std::time::Duration::from_millis(self.timing.settle_ms)).await;
        }
        outcome
    }
}
