//! System clipboard channel.

use std::time::Duration;

use arboard::Clipboard;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::channel::{Channel, ChannelKind};
use crate::errors::RelayError;

/// The operating environment's shared clipboard, the only slot that survives
/// a change of origin.
///
/// A clipboard handle is opened per operation; the host may refuse either
/// direction independently.
///
/// On X11 and Wayland the clipboard is served by the process that wrote it,
/// so a write keeps ownership for up to `hold` (or until another program
/// copies something) before the process may exit.
#[derive(Debug, Clone, Copy)]
pub struct ClipboardChannel {
    hold: Duration,
}

pub const DEFAULT_CLIPBOARD_HOLD: Duration = Duration::from_secs(60);

impl ClipboardChannel {
    pub fn new() -> Self {
        Self::with_hold(DEFAULT_CLIPBOARD_HOLD)
    }

    /// A zero `hold` returns right after the write.
    pub fn with_hold(hold: Duration) -> Self {
        Self { hold }
    }
}

impl Default for ClipboardChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn open() -> Result<Clipboard, RelayError> {
    Clipboard::new().map_err(denied)
}

fn denied(err: arboard::Error) -> RelayError {
    RelayError::PermissionDenied(err.to_string())
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn write_text(payload: &str, hold: Duration) -> Result<(), RelayError> {
    use arboard::SetExtLinux;

    let mut clipboard = open()?;
    if hold.is_zero() {
        return clipboard.set_text(payload).map_err(denied);
    }
    info!(
        hold_secs = hold.as_secs(),
        "Serving the clipboard until it is replaced or the hold expires"
    );
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + hold)
        .text(payload)
        .map_err(denied)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn write_text(payload: &str, _hold: Duration) -> Result<(), RelayError> {
    open()?.set_text(payload).map_err(denied)
}

#[async_trait]
impl Channel for ClipboardChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::CrossOrigin
    }

    async fn read_raw(&self) -> Result<Option<String>, RelayError> {
        let mut clipboard = open()?;
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => {
                debug!("clipboard holds no text");
                Ok(None)
            }
            Err(arboard::Error::ConversionFailure) => {
                Err(RelayError::Malformed("clipboard text is not valid UTF-8".into()))
            }
            Err(err) => Err(denied(err)),
        }
    }

    async fn write_raw(&self, payload: &str) -> Result<(), RelayError> {
        let payload = payload.to_string();
        let hold = self.hold;
        tokio::task::spawn_blocking(move || write_text(&payload, hold))
            .await
            .map_err(|err| RelayError::Unavailable(format!("clipboard writer: {}", err)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_by_default() {
        assert_eq!(ClipboardChannel::default().hold, DEFAULT_CLIPBOARD_HOLD);
        assert_eq!(
            ClipboardChannel::with_hold(Duration::ZERO).hold,
            Duration::ZERO
        );
    }
}
