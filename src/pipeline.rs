//! extract → relay → reconcile → fill
//!
//! One run handles the page the operator is on: a source page is extracted
//! and its envelope published to both channels, the destination page reads
//! both channels back, reconciles them and fills the form.

use std::fmt;
use std::sync::Arc;

use action_primitives::DomPort;
use anyhow::{Context, Result};
use envelope_relay::{
    publish, read, read_or_paste, reconcile, Channel, OriginStorageChannel, PasteFallback,
    Reconciled,
};
use famrelay_core_types::{Envelope, PipelineError, SourceTag};
use form_flow::{FillReport, FlowError, FormFiller};
use record_extract::SiteAdapter;
use tracing::{info, warn};

use crate::config::Config;
use crate::notify::{NoticeLevel, Notifier};
use crate::routes::PageCommand;

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Envelope published; `relayed` is false when the clipboard refused it
    Extracted { envelope: Envelope, relayed: bool },
    /// The source page held no usable person
    NothingExtracted(SourceTag),
    Filled(FillReport),
    /// Neither channel held a usable record
    NoRecord,
    /// The destination form could not be brought up
    FormUnavailable(String),
    Ignored(String),
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Extracted { envelope, relayed } => write!(
                f,
                "extracted from {} (clipboard {})",
                envelope.source(),
                if *relayed { "written" } else { "refused" }
            ),
            RunOutcome::NothingExtracted(source) => write!(f, "nothing found on {}", source),
            RunOutcome::Filled(report) => write!(
                f,
                "filled {}, skipped {}, gave up {}",
                report.filled.len(),
                report.skipped.len(),
                report.gave_up.len()
            ),
            RunOutcome::NoRecord => f.write_str("no record"),
            RunOutcome::FormUnavailable(reason) => write!(f, "form unavailable: {}", reason),
            RunOutcome::Ignored(reason) => write!(f, "ignored: {}", reason),
        }
    }
}

pub struct Pipeline {
    config: Config,
    notifier: Arc<dyn Notifier>,
    paste: Option<Arc<dyn PasteFallback>>,
}

impl Pipeline {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            notifier,
            paste: None,
        }
    }

    /// Enables the interactive fallback for a refused clipboard read
    pub fn with_paste_fallback(mut self, paste: Arc<dyn PasteFallback>) -> Self {
        self.paste = Some(paste);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classifies the page `dom` shows and executes the matching command.
    pub async fn handle(
        &self,
        dom: Arc<dyn DomPort>,
        clipboard: &dyn Channel,
    ) -> Result<RunOutcome> {
        let url = dom
            .current_url()
            .await
            .context("Failed to read the current page URL")?;
        let command = self.config.routes.classify(&url);
        info!(url = %url, command = %command, "Classified page");

        let outcome = match command {
            PageCommand::Extract(source) => self.extract(source, dom, clipboard).await,
            PageCommand::Fill => self.fill(dom, clipboard).await,
            PageCommand::Ignore(reason) => {
                info!("Nothing to do: {}", reason);
                RunOutcome::Ignored(reason)
            }
        };
        Ok(outcome)
    }

    /// Extracts the person on a source page and publishes the envelope.
    ///
    /// The same-origin slot is always written; the clipboard is best effort
    /// and a refusal prints the payload for manual copying instead.
    pub async fn extract(
        &self,
        source: SourceTag,
        dom: Arc<dyn DomPort>,
        clipboard: &dyn Channel,
    ) -> RunOutcome {
        let adapter = SiteAdapter::for_source(source, &self.config.sites);
        let envelope = adapter.capture(dom.as_ref()).await;
        if envelope.record().is_empty() {
            self.notify(
                NoticeLevel::Warn,
                &format!("No person found on this {} page; nothing was copied", source),
            );
            return RunOutcome::NothingExtracted(source);
        }

        let storage = OriginStorageChannel::new(dom, self.config.storage_key.clone());
        if let Err(err) = publish(&storage, &envelope).await {
            warn!(key = storage.key(), "Same-origin publish failed: {}", err);
        }

        let relayed = match publish(clipboard, &envelope).await {
            Ok(()) => true,
            Err(err) => {
                let err = PipelineError::from(err);
                let payload = envelope.to_payload().unwrap_or_default();
                self.notify(
                    NoticeLevel::Warn,
                    &format!("{}. Copy this record manually:\n{}", err, payload),
                );
                false
            }
        };

        let name = envelope.record().full_name.as_deref().unwrap_or("record");
        self.notify(NoticeLevel::Info, &format!("Copied {} from {}", name, source));
        RunOutcome::Extracted { envelope, relayed }
    }

    /// Reconciles both channels and fills the destination form.
    pub async fn fill(&self, dom: Arc<dyn DomPort>, clipboard: &dyn Channel) -> RunOutcome {
        let reconciled = self.reconcile(dom.clone(), clipboard).await;
        if reconciled.is_none() {
            self.notify(
                NoticeLevel::Error,
                &format!(
                    "{}; copy a record from a source page first",
                    PipelineError::NoAuthoritativeRecord
                ),
            );
            return RunOutcome::NoRecord;
        }
        info!(
            source = reconciled.source_label(),
            channel = reconciled.channel_label(),
            "Filling from reconciled record"
        );
        let record = reconciled.record;

        let filler = FormFiller::new(self.config.catalogue.clone(), self.config.timing.clone());
        if let Err(err) = filler.ensure_open(dom.as_ref()).await {
            self.notify(NoticeLevel::Error, &format!("Could not open the form: {}", err));
            return RunOutcome::FormUnavailable(err.to_string());
        }

        match filler.fill(dom.as_ref(), &record).await {
            Ok(report) => {
                self.report(&report);
                RunOutcome::Filled(report)
            }
            Err(FlowError::Pipeline(PipelineError::NoAuthoritativeRecord)) => {
                self.notify(NoticeLevel::Error, "No data to fill the form with");
                RunOutcome::NoRecord
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, &format!("Form fill failed: {}", err));
                RunOutcome::FormUnavailable(err.to_string())
            }
        }
    }

    async fn reconcile(&self, dom: Arc<dyn DomPort>, clipboard: &dyn Channel) -> Reconciled {
        let cross = match self.paste.as_deref() {
            Some(paste) if self.config.paste_fallback => {
                read_or_paste(clipboard, Some(paste)).await
            }
            _ => read(clipboard).await.envelope(),
        };
        let storage = OriginStorageChannel::new(dom, self.config.storage_key.clone());
        let same = read(&storage).await.envelope();
        reconcile(cross, same, self.config.reconcile_policy)
    }

    fn report(&self, report: &FillReport) {
        let list = |fields: &[form_flow::Field]| {
            fields
                .iter()
                .map(|field| field.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if report.is_complete() {
            self.notify(
                NoticeLevel::Info,
                &format!("Filled {} field(s): {}", report.filled.len(), list(&report.filled)),
            );
        } else {
            self.notify(
                NoticeLevel::Warn,
                &format!(
                    "Filled {}; could not reach {}",
                    list(&report.filled),
                    list(&report.gave_up)
                ),
            );
        }
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notifier.notify(level, message);
    }
}
