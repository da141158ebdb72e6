//! Picks the authoritative record between the two channels.

use famrelay_core_types::{Envelope, Record, SourceTag};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::channel::ChannelKind;

/// How to choose when both channels hold an envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Larger `capturedAt` wins; equal timestamps go to the cross-origin copy
    #[default]
    PreferNewest,
    /// Cross-origin copy wins whenever present
    PreferRelay,
}

/// Result of reconciliation. `chosen_source == None` means there is nothing
/// to fill with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub record: Record,
    pub chosen_source: Option<SourceTag>,
    pub channel: Option<ChannelKind>,
}

impl Reconciled {
    fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.chosen_source.is_none()
    }

    /// Source tag of the winner, or `"none"`
    pub fn source_label(&self) -> &'static str {
        self.chosen_source.map_or("none", SourceTag::as_str)
    }

    pub fn channel_label(&self) -> &'static str {
        self.channel.map_or("none", ChannelKind::as_str)
    }
}

pub fn reconcile(
    cross_origin: Option<Envelope>,
    same_origin: Option<Envelope>,
    policy: ReconcilePolicy,
) -> Reconciled {
    let winner = match (cross_origin, same_origin) {
        (Some(cross), Some(same)) => {
            let cross_wins = match policy {
                ReconcilePolicy::PreferNewest => cross.captured_at() >= same.captured_at(),
                ReconcilePolicy::PreferRelay => true,
            };
            debug!(
                ?policy,
                cross_captured_at = cross.captured_at(),
                same_captured_at = same.captured_at(),
                cross_wins,
                "Both channels hold an envelope"
            );
            if cross_wins {
                Some((cross, ChannelKind::CrossOrigin))
            } else {
                Some((same, ChannelKind::SameOrigin))
            }
        }
        (Some(cross), None) => Some((cross, ChannelKind::CrossOrigin)),
        (None, Some(same)) => Some((same, ChannelKind::SameOrigin)),
        (None, None) => None,
    };

    let Some((envelope, channel)) = winner else {
        info!("No envelope on either channel");
        return Reconciled::none();
    };
    let source = envelope.source();
    let record = envelope.into_record().normalized();
    if record.is_empty() {
        info!(%channel, %source, "Chosen envelope carries an empty record");
        return Reconciled::none();
    }

    info!(%channel, %source, "Reconciled record");
    Reconciled {
        record,
        chosen_source: Some(source),
        channel: Some(channel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn envelope(first: &str, source: SourceTag, at: i64) -> Envelope {
        Envelope::new(Record::default().with_first_name(first), source, at)
    }

    #[test]
    fn newer_envelope_wins_regardless_of_argument_order() {
        let old = envelope("Old", SourceTag::SiteA, 10);
        let new = envelope("New", SourceTag::SiteC, 20);

        let a = reconcile(Some(old.clone()), Some(new.clone()), ReconcilePolicy::PreferNewest);
        let b = reconcile(Some(new), Some(old), ReconcilePolicy::PreferNewest);

        assert_eq!(a.record.first_name.as_deref(), Some("New"));
        assert_eq!(b.record.first_name.as_deref(), Some("New"));
        assert_eq!(a.chosen_source, Some(SourceTag::SiteC));
        assert_eq!(a.channel, Some(ChannelKind::SameOrigin));
        assert_eq!(b.channel, Some(ChannelKind::CrossOrigin));
    }

    #[test]
    fn tie_goes_to_cross_origin() {
        let cross = envelope("Cross", SourceTag::SiteA, 42);
        let same = envelope("Same", SourceTag::SiteB, 42);
        let result = reconcile(Some(cross), Some(same), ReconcilePolicy::PreferNewest);
        assert_eq!(result.record.first_name.as_deref(), Some("Cross"));
        assert_eq!(result.channel_label(), "cross-origin");
    }

    #[test]
    fn both_absent_is_none() {
        let result = reconcile(None, None, ReconcilePolicy::PreferNewest);
        assert!(result.is_none());
        assert_eq!(result.source_label(), "none");
        assert!(result.record.is_empty());
    }

    #[test]
    fn single_envelope_is_used() {
        let same = envelope("John", SourceTag::SiteA, 1);
        let result = reconcile(None, Some(same), ReconcilePolicy::PreferNewest);
        assert_eq!(result.record.first_name.as_deref(), Some("John"));
        assert_eq!(result.source_label(), "siteA");
    }

    #[test]
    fn newer_full_name_is_split_into_parts() {
        let cross = Envelope::new(
            Record::default().with_full_name("Mary Jane Smith"),
            SourceTag::SiteB,
            100,
        );
        let same = envelope("Unknown", SourceTag::SiteA, 50);

        let result = reconcile(Some(cross), Some(same), ReconcilePolicy::PreferNewest);
        assert_eq!(result.chosen_source, Some(SourceTag::SiteB));
        assert_eq!(result.record.first_name.as_deref(), Some("Mary"));
        assert_eq!(result.record.middle_name.as_deref(), Some("Jane"));
        assert_eq!(result.record.last_name.as_deref(), Some("Smith"));
    }

    #[test]
    fn prefer_relay_ignores_timestamps() {
        let cross = envelope("Relayed", SourceTag::SiteA, 1);
        let same = envelope("Local", SourceTag::SiteB, 999);
        let result = reconcile(Some(cross), Some(same.clone()), ReconcilePolicy::PreferRelay);
        assert_eq!(result.record.first_name.as_deref(), Some("Relayed"));

        let result = reconcile(None, Some(same), ReconcilePolicy::PreferRelay);
        assert_eq!(result.record.first_name.as_deref(), Some("Local"));
    }

    #[test]
    fn empty_winner_is_none_even_when_loser_has_data() {
        let cross = Envelope::new(Record::default().with_last_name("Smith"), SourceTag::SiteA, 200);
        let same = envelope("John", SourceTag::SiteB, 100);
        let result = reconcile(Some(cross), Some(same), ReconcilePolicy::PreferNewest);
        assert!(result.is_none());
        assert_eq!(result.record, Record::default());
    }

    #[test]
    fn policy_names_follow_config_spelling() {
        let policy: ReconcilePolicy = serde_json::from_str("\"prefer_relay\"").unwrap();
        assert_eq!(policy, ReconcilePolicy::PreferRelay);
        assert_eq!(ReconcilePolicy::default(), ReconcilePolicy::PreferNewest);
    }
}
