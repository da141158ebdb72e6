//! Where each site keeps the person's attributes.

use serde::{Deserialize, Serialize};

/// A single attribute's location: element text, or one of its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl FieldSource {
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attribute: None,
        }
    }

    pub fn attribute(selector: &str, attribute: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attribute: Some(attribute.to_string()),
        }
    }
}

/// Selector table for one source site. Attributes the site does not show are
/// left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSelectors {
    #[serde(default)]
    pub full_name: Option<FieldSource>,
    #[serde(default)]
    pub sex: Option<FieldSource>,
    #[serde(default)]
    pub birth_date: Option<FieldSource>,
    #[serde(default)]
    pub birth_place: Option<FieldSource>,
    #[serde(default)]
    pub death_date: Option<FieldSource>,
    #[serde(default)]
    pub death_place: Option<FieldSource>,
}

impl SiteSelectors {
    /// Memorial pages
    pub fn site_a() -> Self {
        Self {
            full_name: Some(FieldSource::text("#bio-name")),
            sex: None,
            birth_date: Some(FieldSource::text("#birthDateLabel")),
            birth_place: Some(FieldSource::text("#birthLocationLabel")),
            death_date: Some(FieldSource::text("#deathDateLabel")),
            death_place: Some(FieldSource::text("#deathLocationLabel")),
        }
    }

    /// Wiki profile pages with schema.org microdata
    pub fn site_b() -> Self {
        Self {
            full_name: Some(FieldSource::text("h1 span[itemprop='name']")),
            sex: Some(FieldSource::attribute("meta[itemprop='gender']", "content")),
            birth_date: Some(FieldSource::attribute("time[itemprop='birthDate']", "datetime")),
            birth_place: Some(FieldSource::text("span[itemprop='birthPlace']")),
            death_date: Some(FieldSource::attribute("time[itemprop='deathDate']", "datetime")),
            death_place: Some(FieldSource::text("span[itemprop='deathPlace']")),
        }
    }

    /// Historical record pages
    pub fn site_c() -> Self {
        Self {
            full_name: Some(FieldSource::text("[data-testid='fullName']")),
            sex: Some(FieldSource::text("[data-testid='sex-value']")),
            birth_date: Some(FieldSource::text("[data-testid='birthDate-value']")),
            birth_place: Some(FieldSource::text("[data-testid='birthPlace-value']")),
            death_date: Some(FieldSource::text("[data-testid='deathDate-value']")),
            death_place: Some(FieldSource::text("[data-testid='deathPlace-value']")),
        }
    }
}

/// Selector tables for every supported site. A site given in config replaces
/// that site's whole built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesConfig {
    #[serde(default = "SiteSelectors::site_a")]
    pub site_a: SiteSelectors,
    #[serde(default = "SiteSelectors::site_b")]
    pub site_b: SiteSelectors,
    #[serde(default = "SiteSelectors::site_c")]
    pub site_c: SiteSelectors,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            site_a: SiteSelectors::site_a(),
            site_b: SiteSelectors::site_b(),
            site_c: SiteSelectors::site_c(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_other_sites() {
        let yaml = r##"
site_b:
  full_name:
    selector: "#name"
  sex:
    selector: "#gender"
    attribute: data-value
"##;
        let config: SitesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.site_a, SiteSelectors::site_a());
        assert_eq!(config.site_c, SiteSelectors::site_c());
        assert_eq!(config.site_b.full_name, Some(FieldSource::text("#name")));
        assert_eq!(
            config.site_b.sex,
            Some(FieldSource::attribute("#gender", "data-value"))
        );
        assert_eq!(config.site_b.birth_date, None);
    }
}
