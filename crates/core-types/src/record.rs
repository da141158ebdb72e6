//! The normalized person record.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::names::{split_full_name, NameSplitPolicy};

/// Normalized person attributes extracted from one source page.
///
/// Every attribute is optional; blank strings never survive construction or
/// deserialization. A record is *empty* when it carries neither a full name
/// nor a first name and must never be used to populate a form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "sex_text", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
}

impl Record {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.first_name.is_none()
    }

    /// Records the full name and splits it into the name parts with `policy`.
    ///
    /// Parts that split to nothing are stored as empty strings rather than
    /// left absent, so a single-token name yields `last_name == Some("")`.
    pub fn set_full_name(&mut self, full_name: &str, policy: NameSplitPolicy) {
        let Some(full) = non_blank(full_name) else {
            return;
        };
        let parts = split_full_name(&full, policy);
        self.first_name = Some(parts.first);
        self.middle_name = Some(parts.middle);
        self.last_name = Some(parts.last);
        self.full_name = Some(full);
    }

    /// Fills absent first/middle/last names from the full name.
    ///
    /// Derivation uses [`NameSplitPolicy::WithMiddleNames`]; names already
    /// present are kept as they are.
    pub fn normalized(mut self) -> Self {
        let Some(full) = self.full_name.as_deref() else {
            return self;
        };
        if self.first_name.is_some() && self.last_name.is_some() {
            return self;
        }
        let parts = split_full_name(full, NameSplitPolicy::WithMiddleNames);
        self.first_name.get_or_insert(parts.first);
        self.last_name.get_or_insert(parts.last);
        self.middle_name.get_or_insert(parts.middle);
        self
    }

    /// True when any death attribute is known, which implies the person is
    /// deceased.
    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some() || self.death_place.is_some()
    }

    /// Given names as typed into a single first-names input.
    pub fn given_names(&self) -> String {
        [self.first_name.as_deref(), self.middle_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn with_full_name(mut self, value: impl AsRef<str>) -> Self {
        self.full_name = non_blank(value.as_ref());
        self
    }

    pub fn with_first_name(mut self, value: impl AsRef<str>) -> Self {
        self.first_name = non_blank(value.as_ref());
        self
    }

    pub fn with_last_name(mut self, value: impl AsRef<str>) -> Self {
        self.last_name = non_blank(value.as_ref());
        self
    }

    pub fn with_sex(mut self, value: impl AsRef<str>) -> Self {
        self.sex = Sex::parse(value.as_ref());
        self
    }

    pub fn with_birth(mut self, date: Option<&str>, place: Option<&str>) -> Self {
        self.birth_date = date.and_then(non_blank);
        self.birth_place = place.and_then(non_blank);
        self
    }

    pub fn with_death(mut self, date: Option<&str>, place: Option<&str>) -> Self {
        self.death_date = date.and_then(non_blank);
        self.death_place = place.and_then(non_blank);
        self
    }
}

/// Sex as accepted by the target form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Case-insensitive parse of free text. Unrecognized text yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "man" => Some(Sex::Male),
            "f" | "female" | "woman" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Accepts a string or a number; anything else is malformed.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(non_blank(&text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

fn sex_text<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.and_then(|text| Sex::parse(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_without_names_is_empty() {
        let record = Record::default().with_birth(Some("1 Jan 1900"), None);
        assert!(record.is_empty());
        assert!(!Record::default().with_first_name("John").is_empty());
        assert!(!Record::default().with_full_name("John Smith").is_empty());
    }

    #[test]
    fn blank_names_do_not_count() {
        let record = Record::default().with_first_name("   ").with_full_name("");
        assert!(record.is_empty());
    }

    #[test]
    fn normalized_derives_missing_names_with_middle() {
        let record = Record::default().with_full_name("Mary Jane Smith").normalized();
        assert_eq!(record.first_name.as_deref(), Some("Mary"));
        assert_eq!(record.middle_name.as_deref(), Some("Jane"));
        assert_eq!(record.last_name.as_deref(), Some("Smith"));
    }

    #[test]
    fn normalized_keeps_existing_names() {
        let record = Record::default()
            .with_full_name("Mary Jane Smith")
            .with_first_name("Molly")
            .normalized();
        assert_eq!(record.first_name.as_deref(), Some("Molly"));
        assert_eq!(record.last_name.as_deref(), Some("Smith"));
    }

    #[test]
    fn set_full_name_single_token() {
        let mut record = Record::default();
        record.set_full_name("Cher", NameSplitPolicy::SurnameLast);
        assert_eq!(record.first_name.as_deref(), Some("Cher"));
        assert_eq!(record.last_name.as_deref(), Some(""));
        assert_eq!(record.middle_name.as_deref(), Some(""));
    }

    #[test]
    fn sex_parses_case_insensitively() {
        assert_eq!(Sex::parse("MALE"), Some(Sex::Male));
        assert_eq!(Sex::parse(" f "), Some(Sex::Female));
        assert_eq!(Sex::parse("Unknown"), None);
    }

    #[test]
    fn deserializes_numbers_and_free_text_sex() {
        let record: Record = serde_json::from_str(
            r#"{"firstName":"John","birthDate":1901,"sex":"Female","deathPlace":"  "}"#,
        )
        .unwrap();
        assert_eq!(record.birth_date.as_deref(), Some("1901"));
        assert_eq!(record.sex, Some(Sex::Female));
        assert_eq!(record.death_place, None);
    }

    #[test]
    fn rejects_nested_values() {
        let parsed = serde_json::from_str::<Record>(r#"{"firstName":{"given":"John"}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn given_names_join_first_and_middle() {
        let record = Record::default().with_full_name("Mary Jane Smith").normalized();
        assert_eq!(record.given_names(), "Mary Jane");
        let record = Record::default().with_first_name("John");
        assert_eq!(record.given_names(), "John");
    }
}
