//! Provenance-tagged records.

use std::fmt;

use chrono::Utc;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::record::Record;

/// Identifies the extraction adapter that produced an envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    #[serde(rename = "siteA")]
    SiteA,
    #[serde(rename = "siteB")]
    SiteB,
    #[serde(rename = "siteC")]
    SiteC,
}

impl SourceTag {
    pub const ALL: [SourceTag; 3] = [SourceTag::SiteA, SourceTag::SiteB, SourceTag::SiteC];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceTag::SiteA => "siteA",
            SourceTag::SiteB => "siteB",
            SourceTag::SiteC => "siteC",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`Record`] plus the adapter that produced it and when.
///
/// Envelopes are immutable; a new extraction always builds a new one.
/// `captured_at` is milliseconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(flatten)]
    record: Record,
    source: SourceTag,
    #[serde(deserialize_with = "millis")]
    captured_at: i64,
}

impl Envelope {
    pub fn new(record: Record, source: SourceTag, captured_at: i64) -> Self {
        Self {
            record,
            source,
            captured_at,
        }
    }

    /// Stamps `record` with the current wall-clock time.
    pub fn capture(record: Record, source: SourceTag) -> Self {
        Self::new(record, source, Utc::now().timestamp_millis())
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn source(&self) -> SourceTag {
        self.source
    }

    pub fn captured_at(&self) -> i64 {
        self.captured_at
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses channel content. Fails for anything that is not a flat envelope
    /// object carrying a known source tag.
    pub fn from_payload(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim())
    }
}

fn millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64))
            .ok_or_else(|| D::Error::custom("capturedAt out of range")),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|err| D::Error::custom(format!("capturedAt: {}", err))),
        other => Err(D::Error::custom(format!(
            "capturedAt must be a number, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Sex;
    use pretty_assertions::assert_eq;

    #[test]
    fn payload_is_flat_camel_case() {
        let record = Record::default()
            .with_full_name("Mary Jane Smith")
            .with_sex("F");
        let envelope = Envelope::new(record, SourceTag::SiteB, 100);
        let value: Value = serde_json::from_str(&envelope.to_payload().unwrap()).unwrap();
        assert_eq!(value["fullName"], "Mary Jane Smith");
        assert_eq!(value["sex"], "female");
        assert_eq!(value["source"], "siteB");
        assert_eq!(value["capturedAt"], 100);
        assert!(value.get("record").is_none());
    }

    #[test]
    fn payload_survives_a_round_trip() {
        let record = Record::default()
            .with_first_name("John")
            .with_last_name("Doe")
            .with_birth(Some("3 March 1850"), Some("Ohio, United States"))
            .with_death(Some("1920"), None);
        let envelope = Envelope::new(record, SourceTag::SiteA, 1_700_000_000_000);
        let parsed = Envelope::from_payload(&envelope.to_payload().unwrap()).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn rejects_unknown_or_missing_source() {
        assert!(Envelope::from_payload(r#"{"firstName":"A","capturedAt":1}"#).is_err());
        assert!(
            Envelope::from_payload(r#"{"firstName":"A","source":"siteZ","capturedAt":1}"#)
                .is_err()
        );
    }

    #[test]
    fn rejects_unrelated_clipboard_text() {
        assert!(Envelope::from_payload("LZ9X-4QK").is_err());
        assert!(Envelope::from_payload("[1,2,3]").is_err());
    }

    #[test]
    fn accepts_string_timestamps() {
        let envelope = Envelope::from_payload(
            r#"{"firstName":"Ann","sex":"woman","source":"siteC","capturedAt":"42"}"#,
        )
        .unwrap();
        assert_eq!(envelope.captured_at(), 42);
        assert_eq!(envelope.record().sex, Some(Sex::Female));
    }

    #[test]
    fn source_tags_use_their_wire_names() {
        assert_eq!(
            serde_json::from_str::<SourceTag>("\"siteA\"").unwrap(),
            SourceTag::SiteA
        );
        assert!(serde_json::from_str::<SourceTag>("\"SiteA\"").is_err());
    }
}
