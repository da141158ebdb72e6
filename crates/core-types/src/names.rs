//! Full-name splitting.
//!
//! Source sites disagree on where middle names belong, so every extraction
//! adapter declares one [`NameSplitPolicy`] instead of sharing an implicit rule.

use serde::{Deserialize, Serialize};

/// How a whitespace-separated full name is apportioned.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSplitPolicy {
    /// Last token is the surname, every preceding token is the given name.
    #[default]
    SurnameLast,
    /// First token is the given name, interior tokens are middle names,
    /// last token is the surname.
    WithMiddleNames,
}

/// Result of splitting a full name. Absent parts are empty strings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NameParts {
    pub first: String,
    pub middle: String,
    pub last: String,
}

pub fn split_full_name(full_name: &str, policy: NameSplitPolicy) -> NameParts {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [only] => NameParts {
            first: (*only).to_string(),
            ..NameParts::default()
        },
        [head @ .., last] => match policy {
            NameSplitPolicy::SurnameLast => NameParts {
                first: head.join(" "),
                middle: String::new(),
                last: (*last).to_string(),
            },
            NameSplitPolicy::WithMiddleNames => NameParts {
                first: head[0].to_string(),
                middle: head[1..].join(" "),
                last: (*last).to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn two_tokens_have_no_middle_under_either_policy() {
        for policy in [NameSplitPolicy::SurnameLast, NameSplitPolicy::WithMiddleNames] {
            let parts = split_full_name("Ada Lovelace", policy);
            assert_eq!(parts.first, "Ada");
            assert_eq!(parts.middle, "");
            assert_eq!(parts.last, "Lovelace");
        }
    }

    #[test]
    fn single_token_is_first_name_only() {
        let parts = split_full_name("  Pocahontas ", NameSplitPolicy::WithMiddleNames);
        assert_eq!(
            parts,
            NameParts {
                first: "Pocahontas".into(),
                middle: String::new(),
                last: String::new(),
            }
        );
    }

    #[test]
    fn policies_disagree_on_interior_tokens() {
        let surname_last = split_full_name("Mary Jane Ann Smith", NameSplitPolicy::SurnameLast);
        assert_eq!(surname_last.first, "Mary Jane Ann");
        assert_eq!(surname_last.middle, "");

        let with_middle = split_full_name("Mary Jane Ann Smith", NameSplitPolicy::WithMiddleNames);
        assert_eq!(with_middle.first, "Mary");
        assert_eq!(with_middle.middle, "Jane Ann");
        assert_eq!(with_middle.last, "Smith");
    }

    #[test]
    fn blank_name_splits_to_nothing() {
        assert_eq!(
            split_full_name("   ", NameSplitPolicy::SurnameLast),
            NameParts::default()
        );
    }
}
