//! Page classification
//!
//! The current page URL decides the single command a run executes.

use std::fmt;

use famrelay_core_types::SourceTag;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL '{0}' has no host")]
    NoHost(String),
}

/// A host suffix plus a path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub host: String,
    pub path_prefix: String,
}

impl Route {
    pub fn new(host: &str, path_prefix: &str) -> Self {
        Self {
            host: host.to_string(),
            path_prefix: path_prefix.to_string(),
        }
    }

    /// Host equals the route host or is one of its subdomains, and the path
    /// starts with the prefix, optionally after a locale segment (`/en/`,
    /// `/pt-BR/`).
    pub fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let wanted = self.host.to_ascii_lowercase();
        let host_ok = host == wanted || host.ends_with(&format!(".{}", wanted));
        if !host_ok {
            return false;
        }
        let path = url.path();
        path.starts_with(&self.path_prefix)
            || strip_locale(path).is_some_and(|rest| rest.starts_with(&self.path_prefix))
    }
}

/// `/en/tree/...` -> `/tree/...`; `None` when the first segment is not a
/// language tag.
fn strip_locale(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    let (segment, _) = rest.split_once('/')?;
    let (language, region) = match segment.split_once('-') {
        Some((language, region)) => (language, Some(region)),
        None => (segment, None),
    };
    let letters = |part: &str| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic());
    if !letters(language) || !region.map_or(true, letters) {
        return None;
    }
    Some(&rest[segment.len()..])
}

/// What a run does on the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    Extract(SourceTag),
    Fill,
    /// Nothing to do; carries the reason for the log
    Ignore(String),
}

impl fmt::Display for PageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCommand::Extract(source) => write!(f, "extract-{}", source),
            PageCommand::Fill => f.write_str("fill-destination"),
            PageCommand::Ignore(_) => f.write_str("no-op"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub site_a: Route,
    pub site_b: Route,
    pub site_c: Route,
    pub destination: Route,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            site_a: Route::new("findagrave.com", "/memorial/"),
            site_b: Route::new("wikitree.com", "/wiki/"),
            site_c: Route::new("familysearch.org", "/ark:/"),
            destination: Route::new("familysearch.org", "/tree/"),
        }
    }
}

impl RouteTable {
    pub fn route_for(&self, source: SourceTag) -> &Route {
        match source {
            SourceTag::SiteA => &self.site_a,
            SourceTag::SiteB => &self.site_b,
            SourceTag::SiteC => &self.site_c,
        }
    }

    /// Maps `url` to exactly one command. Source sites are checked before
    /// the destination.
    pub fn classify(&self, url: &str) -> PageCommand {
        let parsed = match parse(url) {
            Ok(parsed) => parsed,
            Err(err) => return PageCommand::Ignore(err.to_string()),
        };
        if let Some(source) = SourceTag::ALL
            .into_iter()
            .find(|source| self.route_for(*source).matches(&parsed))
        {
            return PageCommand::Extract(source);
        }
        if self.destination.matches(&parsed) {
            return PageCommand::Fill;
        }
        debug!(url, "No route matches");
        PageCommand::Ignore(format!("no route matches {}", url))
    }
}

fn parse(url: &str) -> Result<Url, RouteError> {
    let parsed = Url::parse(url.trim()).map_err(|err| RouteError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    if parsed.host_str().is_none() {
        return Err(RouteError::NoHost(url.to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_each_source_and_destination() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.classify("https://www.findagrave.com/memorial/12345/mary-smith"),
            PageCommand::Extract(SourceTag::SiteA)
        );
        assert_eq!(
            routes.classify("https://www.wikitree.com/wiki/Smith-123"),
            PageCommand::Extract(SourceTag::SiteB)
        );
        assert_eq!(
            routes.classify("https://www.familysearch.org/ark:/61903/1:1:ABCD"),
            PageCommand::Extract(SourceTag::SiteC)
        );
        assert_eq!(
            routes.classify("https://www.familysearch.org/tree/pedigree/landscape/KWZ1-ABC"),
            PageCommand::Fill
        );
    }

    #[test]
    fn locale_prefixed_paths_still_classify() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.classify("https://www.familysearch.org/en/tree/person/details/KWZ1-ABC"),
            PageCommand::Fill
        );
        assert_eq!(
            routes.classify("https://www.familysearch.org/pt-BR/tree/pedigree/landscape/KWZ1-ABC"),
            PageCommand::Fill
        );
        assert_eq!(
            routes.classify("https://www.familysearch.org/en/ark:/61903/1:1:ABCD"),
            PageCommand::Extract(SourceTag::SiteC)
        );
    }

    #[test]
    fn only_language_tags_count_as_locale() {
        assert_eq!(strip_locale("/en/tree/x"), Some("/tree/x"));
        assert_eq!(strip_locale("/pt-BR/tree/x"), Some("/tree/x"));
        assert_eq!(strip_locale("/eng/tree/x"), None);
        assert_eq!(strip_locale("/search/tree/x"), None);
        assert_eq!(strip_locale("/en"), None);

        let routes = RouteTable::default();
        assert!(matches!(
            routes.classify("https://www.familysearch.org/xyz/tree/person"),
            PageCommand::Ignore(_)
        ));
    }

    #[test]
    fn lookalike_hosts_do_not_match() {
        let routes = RouteTable::default();
        assert!(matches!(
            routes.classify("https://notfindagrave.com/memorial/1"),
            PageCommand::Ignore(_)
        ));
        assert!(matches!(
            routes.classify("https://www.familysearch.org/search/"),
            PageCommand::Ignore(_)
        ));
    }

    #[test]
    fn garbage_is_a_no_op() {
        let routes = RouteTable::default();
        assert!(matches!(routes.classify("not a url"), PageCommand::Ignore(_)));
        assert!(matches!(routes.classify("about:blank"), PageCommand::Ignore(_)));
    }

    #[test]
    fn command_labels() {
        assert_eq!(PageCommand::Extract(SourceTag::SiteB).to_string(), "extract-siteB");
        assert_eq!(PageCommand::Fill.to_string(), "fill-destination");
        assert_eq!(PageCommand::Ignore("x".into()).to_string(), "no-op");
    }
}
