//! Interactive paste fallback for a refused clipboard.

use async_trait::async_trait;
use envelope_relay::PasteFallback;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Asks the operator to paste the envelope payload on standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPaste;

#[async_trait]
impl PasteFallback for StdinPaste {
    async fn request_payload(&self, reason: &str) -> Option<String> {
        eprintln!("Clipboard is not readable ({}).", reason);
        eprintln!("Paste the copied record and press Enter (empty line to skip):");
        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(_) => {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            }
            Err(err) => {
                warn!("Failed to read pasted payload: {}", err);
                None
            }
        }
    }
}
