use serde::{Deserialize, Serialize};
use std::env;

/// Where to find the browser's DevTools endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CdpConfig {
    /// `http://host:port` of the DevTools endpoint, or a full `ws://` URL
    pub debugger_url: String,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            debugger_url: resolve_debugger_url(),
        }
    }
}

fn resolve_debugger_url() -> String {
    match env::var("FAMRELAY_DEBUGGER_URL") {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => "http://127.0.0.1:9222".to_string(),
    }
}
