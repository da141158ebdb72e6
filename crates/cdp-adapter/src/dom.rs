use async_trait::async_trait;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use action_primitives::{ActionError, DomEvent, DomPort};

use crate::scripts;

/// Uniform shape every page script returns.
#[derive(Debug, Deserialize)]
struct ScriptReply {
    status: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    message: Option<String>,
}

/// [`DomPort`] over one Chromium tab.
#[derive(Clone, Debug)]
pub struct ChromiumDom {
    page: Page,
}

impl ChromiumDom {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn run(&self, script: String, target: &str) -> Result<ScriptReply, ActionError> {
        let params = EvaluateParams::builder()
            .expression(script)
            .return_by_value(true)
            .await_promise(true)
            .build()
            .map_err(ActionError::Internal)?;
        let result = self
            .page
            .evaluate_expression(params)
            .await
            .map_err(|err| ActionError::CdpIo(err.to_string()))?;
        let reply: ScriptReply = result
            .into_value()
            .map_err(|err| ActionError::Script(format!("unexpected reply: {}", err)))?;
        trace!(target, status = %reply.status, "script evaluated");

        match reply.status.as_str() {
            "ok" => Ok(reply),
            "missing" => Err(ActionError::AnchorNotFound(target.to_string())),
            "denied" => Err(ActionError::PermissionDenied(
                reply.message.unwrap_or_else(|| target.to_string()),
            )),
            other => Err(ActionError::Script(format!(
                "unexpected status '{}' for {}",
                other, target
            ))),
        }
    }

    async fn run_unit(&self, script: String, target: &str) -> Result<(), ActionError> {
        self.run(script, target).await.map(|_| ())
    }
}

fn optional_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

#[async_trait]
impl DomPort for ChromiumDom {
    async fn current_url(&self) -> Result<String, ActionError> {
        self.page
            .url()
            .await
            .map_err(|err| ActionError::CdpIo(err.to_string()))
            .map(Option::unwrap_or_default)
    }

    async fn count(&self, selector: &str) -> Result<usize, ActionError> {
        let reply = self.run(scripts::count(selector)?, selector).await?;
        Ok(reply.count.unwrap_or_default())
    }

    async fn text(&self, selector: &str) -> Result<Option<String>, ActionError> {
        match self.run(scripts::text(selector)?, selector).await {
            Ok(reply) => Ok(optional_text(reply.value)),
            Err(ActionError::AnchorNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>, ActionError> {
        match self.run(scripts::attribute(selector, name)?, selector).await {
            Ok(reply) => Ok(optional_text(reply.value)),
            Err(ActionError::AnchorNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), ActionError> {
        self.run_unit(scripts::scroll_into_view(selector)?, selector).await
    }

    async fn focus(&self, selector: &str) -> Result<(), ActionError> {
        self.run_unit(scripts::focus(selector)?, selector).await
    }

    async fn inject_value(&self, selector: &str, value: &str) -> Result<(), ActionError> {
        self.run_unit(scripts::inject_value(selector, value)?, selector)
            .await
    }

    async fn dispatch(&self, selector: &str, event: DomEvent) -> Result<(), ActionError> {
        self.run_unit(scripts::dispatch(selector, event.as_str())?, selector)
            .await
    }

    async fn click(&self, selector: &str, index: usize) -> Result<(), ActionError> {
        self.run_unit(scripts::click(selector, index)?, selector).await
    }

    async fn labels(&self, selector: &str) -> Result<Vec<String>, ActionError> {
        let reply = self.run(scripts::labels(selector)?, selector).await?;
        serde_json::from_value(reply.value)
            .map_err(|err| ActionError::Script(format!("labels: {}", err)))
    }

    async fn storage_get(&self, key: &str) -> Result<Option<String>, ActionError> {
        let reply = self.run(scripts::storage_get(key)?, key).await?;
        Ok(optional_text(reply.value))
    }

    async fn storage_set(&self, key: &str, value: &str) -> Result<(), ActionError> {
        self.run_unit(scripts::storage_set(key, value)?, key).await
    }
}
