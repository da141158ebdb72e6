//! Publishing to and reading from channels.

use async_trait::async_trait;
use famrelay_core_types::Envelope;
use tracing::{debug, info, warn};

use crate::channel::Channel;
use crate::errors::RelayError;

/// Interactive source of a payload when the cross-origin channel is refused.
/// The operator pastes the same text that would have been on the clipboard.
#[async_trait]
pub trait PasteFallback: Send + Sync {
    /// `None` when the operator declines or supplies nothing
    async fn request_payload(&self, reason: &str) -> Option<String>;
}

/// What a channel read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRead {
    Envelope(Envelope),
    /// Slot never written
    Empty,
    /// Slot holds text that is not an envelope (e.g. an unrelated copy)
    Unrelated(String),
    /// Host refused access
    Denied(String),
}

impl ChannelRead {
    pub fn envelope(self) -> Option<Envelope> {
        match self {
            ChannelRead::Envelope(envelope) => Some(envelope),
            _ => None,
        }
    }
}

/// Serializes `envelope` and overwrites the channel's slot.
pub async fn publish(channel: &dyn Channel, envelope: &Envelope) -> Result<(), RelayError> {
    let payload = envelope
        .to_payload()
        .map_err(|err| RelayError::Malformed(err.to_string()))?;
    channel.write_raw(&payload).await?;
    info!(
        channel = %channel.kind(),
        source = %envelope.source(),
        captured_at = envelope.captured_at(),
        "Published envelope"
    );
    Ok(())
}

/// Reads the channel. Never fails: refusal, absence and foreign content are
/// all reported as values.
pub async fn read(channel: &dyn Channel) -> ChannelRead {
    match channel.read_raw().await {
        Ok(Some(text)) => parse(channel, &text),
        Ok(None) => {
            debug!(channel = %channel.kind(), "Channel is empty");
            ChannelRead::Empty
        }
        Err(RelayError::Malformed(msg)) => {
            debug!(channel = %channel.kind(), "Ignoring unreadable channel content: {}", msg);
            ChannelRead::Unrelated(msg)
        }
        Err(err) => {
            warn!(channel = %channel.kind(), "Channel read refused: {}", err);
            ChannelRead::Denied(err.to_string())
        }
    }
}

/// Reads the channel, falling back to an operator-supplied payload when the
/// host refuses access.
pub async fn read_or_paste(
    channel: &dyn Channel,
    fallback: Option<&dyn PasteFallback>,
) -> Option<Envelope> {
    let outcome = read(channel).await;
    let ChannelRead::Denied(reason) = outcome else {
        return outcome.envelope();
    };
    let fallback = fallback?;
    let text = fallback.request_payload(&reason).await?;
    match Envelope::from_payload(&text) {
        Ok(envelope) => {
            info!(source = %envelope.source(), "Accepted pasted envelope");
            Some(envelope)
        }
        Err(err) => {
            warn!("Pasted text is not an envelope: {}", err);
            None
        }
    }
}

fn parse(channel: &dyn Channel, text: &str) -> ChannelRead {
    match Envelope::from_payload(text) {
        Ok(envelope) => {
            debug!(
                channel = %channel.kind(),
                source = %envelope.source(),
                captured_at = envelope.captured_at(),
                "Read envelope"
            );
            ChannelRead::Envelope(envelope)
        }
        Err(err) => {
            debug!(channel = %channel.kind(), "Channel holds unrelated content: {}", err);
            ChannelRead::Unrelated(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelKind;
    use crate::memory::MemoryChannel;
    use famrelay_core_types::{Record, SourceTag};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    struct ScriptedPaste {
        answer: Option<String>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedPaste {
        fn new(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(str::to_string),
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PasteFallback for ScriptedPaste {
        async fn request_payload(&self, reason: &str) -> Option<String> {
            self.asked.lock().push(reason.to_string());
            self.answer.clone()
        }
    }

    fn sample() -> Envelope {
        Envelope::new(
            Record::default().with_full_name("Mary Jane Smith"),
            SourceTag::SiteB,
            100,
        )
    }

    #[tokio::test]
    async fn publish_then_read_returns_the_envelope() {
        let channel = MemoryChannel::new(ChannelKind::SameOrigin);
        publish(&channel, &sample()).await.unwrap();
        assert_eq!(read(&channel).await, ChannelRead::Envelope(sample()));
    }

    #[tokio::test]
    async fn later_publish_overwrites_the_slot() {
        let channel = MemoryChannel::new(ChannelKind::CrossOrigin);
        publish(&channel, &sample()).await.unwrap();
        let newer = Envelope::new(
            Record::default().with_first_name("John"),
            SourceTag::SiteA,
            200,
        );
        publish(&channel, &newer).await.unwrap();
        assert_eq!(read(&channel).await.envelope(), Some(newer));
    }

    #[tokio::test]
    async fn unrelated_text_is_absent_not_an_error() {
        let channel = MemoryChannel::with_content(ChannelKind::CrossOrigin, "G7QK-9ZX");
        let outcome = read(&channel).await;
        assert!(matches!(outcome, ChannelRead::Unrelated(_)));
        assert_eq!(outcome.envelope(), None);
    }

    #[tokio::test]
    async fn empty_slot_reads_as_empty() {
        let channel = MemoryChannel::new(ChannelKind::SameOrigin);
        assert_eq!(read(&channel).await, ChannelRead::Empty);
    }

    #[tokio::test]
    async fn denied_read_uses_the_paste_fallback() {
        let channel = MemoryChannel::new(ChannelKind::CrossOrigin).deny_read();
        let payload = sample().to_payload().unwrap();
        let paste = ScriptedPaste::new(Some(&payload));

        let envelope = read_or_paste(&channel, Some(&paste)).await;
        assert_eq!(envelope, Some(sample()));
        assert_eq!(paste.asked.lock().len(), 1);
    }

    #[tokio::test]
    async fn fallback_is_not_asked_when_the_channel_answers() {
        let channel = MemoryChannel::with_content(ChannelKind::CrossOrigin, "hello");
        let paste = ScriptedPaste::new(None);
        assert_eq!(read_or_paste(&channel, Some(&paste)).await, None);
        assert!(paste.asked.lock().is_empty());
    }

    #[tokio::test]
    async fn garbage_paste_is_absent() {
        let channel = MemoryChannel::new(ChannelKind::CrossOrigin).deny_read();
        let paste = ScriptedPaste::new(Some("not json"));
        assert_eq!(read_or_paste(&channel, Some(&paste)).await, None);
        assert_eq!(read_or_paste(&channel, None).await, None);
    }

    #[tokio::test]
    async fn denied_write_is_reported() {
        let channel = MemoryChannel::new(ChannelKind::CrossOrigin).deny_write();
        let err = publish(&channel, &sample()).await.unwrap_err();
        assert!(matches!(err, RelayError::PermissionDenied(_)));
        assert_eq!(channel.content(), None);
    }
}
