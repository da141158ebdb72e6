//! Configuration for famrelay

use cdp_adapter::CdpConfig;
use envelope_relay::{ReconcilePolicy, DEFAULT_CLIPBOARD_HOLD, DEFAULT_STORAGE_KEY};
use form_flow::{FormCatalogue, Timing};
use record_extract::SitesConfig;
use serde::{Deserialize, Serialize};

use crate::routes::RouteTable;

/// Main configuration structure. Every section is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// DevTools endpoint of the operator's browser
    pub browser: CdpConfig,

    /// Page classification table
    pub routes: RouteTable,

    /// Which channel wins when both hold an envelope
    pub reconcile_policy: ReconcilePolicy,

    /// Polling budgets of the form-fill automaton
    pub timing: Timing,

    /// Destination form selectors
    pub catalogue: FormCatalogue,

    /// Source site selectors
    pub sites: SitesConfig,

    /// `localStorage` key of the same-origin slot
    pub storage_key: String,

    /// Prompt for a pasted payload when the clipboard is refused
    pub paste_fallback: bool,

    /// Seconds a run keeps serving a written clipboard on X11/Wayland
    pub clipboard_hold_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: CdpConfig::default(),
            routes: RouteTable::default(),
            reconcile_policy: ReconcilePolicy::default(),
            timing: Timing::default(),
            catalogue: FormCatalogue::default(),
            sites: SitesConfig::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            paste_fallback: true,
            clipboard_hold_secs: DEFAULT_CLIPBOARD_HOLD.as_secs(),
        }
    }
}
