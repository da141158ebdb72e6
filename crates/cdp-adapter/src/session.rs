use std::time::Duration;

use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::CdpConfig;
use crate::dom::ChromiumDom;
use crate::error::{AdapterError, AdapterErrorKind};

/// Time given to the handler to attach to targets discovered on connect.
const TARGET_ATTACH_GRACE: Duration = Duration::from_millis(300);

/// A connection to a running browser.
pub struct CdpSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl CdpSession {
    pub async fn connect(config: &CdpConfig) -> Result<Self, AdapterError> {
        info!(endpoint = %config.debugger_url, "Attaching to browser");
        let (mut browser, mut handler) = Browser::connect(config.debugger_url.clone())
            .await
            .map_err(|err| AdapterError::new(AdapterErrorKind::Connect).with_hint(err.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    warn!("cdp handler stopped: {}", err);
                    break;
                }
            }
        });

        let targets = browser
            .fetch_targets()
            .await
            .map_err(|err| AdapterError::new(AdapterErrorKind::CdpIo).with_hint(err.to_string()))?;
        debug!(targets = targets.len(), "Discovered browser targets");
        sleep(TARGET_ATTACH_GRACE).await;

        Ok(Self { browser, handler })
    }

    /// Picks the tab to work on.
    ///
    /// With a hint, the first tab whose URL starts with it; otherwise the
    /// first tab showing a web page.
    pub async fn active_page(&self, url_hint: Option<&str>) -> Result<ChromiumDom, AdapterError> {
        let pages = self
            .browser
            .pages()
            .await
            .map_err(|err| AdapterError::new(AdapterErrorKind::CdpIo).with_hint(err.to_string()))?;

        for page in pages {
            let url = page
                .url()
                .await
                .map_err(|err| AdapterError::new(AdapterErrorKind::CdpIo).with_hint(err.to_string()))?
                .unwrap_or_default();
            let wanted = match url_hint {
                Some(hint) => url.starts_with(hint),
                None => url.starts_with("http://") || url.starts_with("https://"),
            };
            if wanted {
                info!(url = %url, "Using browser tab");
                return Ok(ChromiumDom::new(page));
            }
        }

        let hint = url_hint.map_or_else(
            || "no tab shows a web page".to_string(),
            |hint| format!("no tab matches '{}'", hint),
        );
        Err(AdapterError::new(AdapterErrorKind::NoPage).with_hint(hint))
    }

    pub fn shutdown(self) {
        self.handler.abort();
    }
}
