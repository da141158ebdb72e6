use action_primitives::DomPort;
use famrelay_core_types::{Envelope, NameSplitPolicy, PipelineError, Record, Sex, SourceTag};
use tracing::{debug, info};

use crate::selectors::{FieldSource, SiteSelectors, SitesConfig};
use crate::text;

/// Extraction adapter for one source site.
///
/// Each site declares how its full names are split; the policies disagree on
/// interior tokens, so the choice is fixed per site rather than per call.
#[derive(Debug, Clone)]
pub struct SiteAdapter {
    source: SourceTag,
    policy: NameSplitPolicy,
    selectors: SiteSelectors,
}

impl SiteAdapter {
    pub fn site_a(selectors: SiteSelectors) -> Self {
        Self {
            source: SourceTag::SiteA,
            policy: NameSplitPolicy::SurnameLast,
            selectors,
        }
    }

    pub fn site_b(selectors: SiteSelectors) -> Self {
        Self {
            source: SourceTag::SiteB,
            policy: NameSplitPolicy::WithMiddleNames,
            selectors,
        }
    }

    pub fn site_c(selectors: SiteSelectors) -> Self {
        Self {
            source: SourceTag::SiteC,
            policy: NameSplitPolicy::SurnameLast,
            selectors,
        }
    }

    /// Adapter for `source` using the configured selector tables.
    pub fn for_source(source: SourceTag, sites: &SitesConfig) -> Self {
        match source {
            SourceTag::SiteA => Self::site_a(sites.site_a.clone()),
            SourceTag::SiteB => Self::site_b(sites.site_b.clone()),
            SourceTag::SiteC => Self::site_c(sites.site_c.clone()),
        }
    }

    pub fn source(&self) -> SourceTag {
        self.source
    }

    pub fn name_policy(&self) -> NameSplitPolicy {
        self.policy
    }

    /// Reads the person on the current page. Missing markup leaves the
    /// matching attribute unset; the result may be empty.
    pub async fn extract(&self, dom: &dyn DomPort) -> Record {
        let selectors = &self.selectors;
        let mut record = Record::default();

        if let Some(full_name) = self.read(dom, "full name", &selectors.full_name).await {
            record.set_full_name(&full_name, self.policy);
        }
        if let Some(sex) = self.read(dom, "sex", &selectors.sex).await {
            record.sex = Sex::parse(&sex);
            if record.sex.is_none() {
                debug!(source = %self.source, value = %sex, "Unrecognized sex value");
            }
        }
        record.birth_date = self.read(dom, "birth date", &selectors.birth_date).await;
        record.birth_place = self.read(dom, "birth place", &selectors.birth_place).await;
        record.death_date = self.read(dom, "death date", &selectors.death_date).await;
        record.death_place = self.read(dom, "death place", &selectors.death_place).await;

        info!(
            source = %self.source,
            empty = record.is_empty(),
            deceased = record.is_deceased(),
            "Extracted record"
        );
        record
    }

    /// [`extract`](Self::extract) stamped with this adapter's tag and the
    /// current time.
    pub async fn capture(&self, dom: &dyn DomPort) -> Envelope {
        Envelope::capture(self.extract(dom).await, self.source)
    }

    async fn read(
        &self,
        dom: &dyn DomPort,
        field: &str,
        source: &Option<FieldSource>,
    ) -> Option<String> {
        let source = source.as_ref()?;
        let raw = match &source.attribute {
            Some(name) => dom.attribute(&source.selector, name).await,
            None => dom.text(&source.selector).await,
        };
        let value = match raw {
            Ok(value) => value.as_deref().and_then(text::clean),
            Err(err) => {
                debug!(source = %self.source, field, "Read failed: {}", err);
                None
            }
        };
        if value.is_none() {
            let err = PipelineError::ExtractionNotFound(format!(
                "{} ({})",
                field, source.selector
            ));
            debug!(source = %self.source, "{}", err);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::testing::FakeDom;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn surname_last_site_keeps_interior_tokens_in_first_name() {
        let dom = FakeDom::new();
        dom.add_text("#bio-name", "  Mary Jane\n Smith ");
        dom.add_text("#birthDateLabel", "3 May 1901");
        dom.add_text("#deathLocationLabel", "Leeds, West Yorkshire, England");

        let record = SiteAdapter::site_a(SiteSelectors::site_a())
            .extract(&dom)
            .await;

        assert_eq!(record.full_name.as_deref(), Some("Mary Jane Smith"));
        assert_eq!(record.first_name.as_deref(), Some("Mary Jane"));
        assert_eq!(record.middle_name.as_deref(), Some(""));
        assert_eq!(record.last_name.as_deref(), Some("Smith"));
        assert_eq!(record.birth_date.as_deref(), Some("3 May 1901"));
        assert_eq!(record.birth_place, None);
        assert_eq!(record.death_date, None);
        assert_eq!(
            record.death_place.as_deref(),
            Some("Leeds, West Yorkshire, England")
        );
        assert!(record.is_deceased());
    }

    #[tokio::test]
    async fn middle_name_site_reads_microdata_attributes() {
        let dom = FakeDom::new();
        dom.add_text("h1 span[itemprop='name']", "Mary Jane Smith");
        dom.add_attribute("meta[itemprop='gender']", "content", "Female");
        dom.add_attribute("time[itemprop='birthDate']", "datetime", "1901-05-03");
        dom.add_text("span[itemprop='birthPlace']", "Born: Leeds");

        let adapter = SiteAdapter::site_b(SiteSelectors::site_b());
        let envelope = adapter.capture(&dom).await;
        let record = envelope.record();

        assert_eq!(envelope.source(), SourceTag::SiteB);
        assert_eq!(record.first_name.as_deref(), Some("Mary"));
        assert_eq!(record.middle_name.as_deref(), Some("Jane"));
        assert_eq!(record.last_name.as_deref(), Some("Smith"));
        assert_eq!(record.sex, Some(Sex::Female));
        assert_eq!(record.birth_date.as_deref(), Some("1901-05-03"));
        assert_eq!(record.birth_place.as_deref(), Some("Leeds"));
        assert!(!record.is_deceased());
    }

    #[tokio::test]
    async fn single_token_name_has_empty_surname() {
        let dom = FakeDom::new();
        dom.add_text("[data-testid='fullName']", "Cher");
        let record = SiteAdapter::site_c(SiteSelectors::site_c())
            .extract(&dom)
            .await;
        assert_eq!(record.first_name.as_deref(), Some("Cher"));
        assert_eq!(record.last_name.as_deref(), Some(""));
        assert_eq!(record.middle_name.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn page_without_markup_yields_empty_record() {
        let dom = FakeDom::new();
        let record = SiteAdapter::for_source(SourceTag::SiteC, &SitesConfig::default())
            .extract(&dom)
            .await;
        assert!(record.is_empty());
        assert_eq!(record, Record::default());
    }

    #[tokio::test]
    async fn unrecognized_sex_is_dropped() {
        let dom = FakeDom::new();
        dom.add_text("[data-testid='fullName']", "John Smith");
        dom.add_text("[data-testid='sex-value']", "Unknown");
        let record = SiteAdapter::site_c(SiteSelectors::site_c())
            .extract(&dom)
            .await;
        assert_eq!(record.sex, None);
        assert_eq!(record.first_name.as_deref(), Some("John"));
    }

    #[test]
    fn sites_declare_their_split_policy() {
        let sites = SitesConfig::default();
        assert_eq!(
            SiteAdapter::for_source(SourceTag::SiteA, &sites).name_policy(),
            NameSplitPolicy::SurnameLast
        );
        assert_eq!(
            SiteAdapter::for_source(SourceTag::SiteB, &sites).name_policy(),
            NameSplitPolicy::WithMiddleNames
        );
        assert_eq!(
            SiteAdapter::for_source(SourceTag::SiteC, &sites).name_policy(),
            NameSplitPolicy::SurnameLast
        );
    }
}
