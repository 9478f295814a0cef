use crate::config::{CrawlerConfig, ScopeConfig};
use crate::ConfigError;
use url::{Position, Url};

/// Decides whether a discovered URL belongs to the crawl namespace
///
/// A candidate is in scope when:
/// 1. it shares the origin of the crawl base
/// 2. its path starts with the namespace prefix
/// 3. its path, query and fragment contain none of the excluded keywords
/// 4. it is not the page it was discovered on
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    base: Url,
    path_prefix: String,
    excluded_keywords: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter for the namespace rooted at `base` + `path_prefix`
    pub fn new(base: Url, path_prefix: impl Into<String>, excluded_keywords: Vec<String>) -> Self {
        Self {
            base,
            path_prefix: path_prefix.into(),
            excluded_keywords,
        }
    }

    /// Builds a filter from the crawler and scope configuration sections
    pub fn from_config(crawler: &CrawlerConfig, scope: &ScopeConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&crawler.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        Ok(Self::new(
            base,
            scope.path_prefix.clone(),
            scope.excluded_keywords.clone(),
        ))
    }

    /// The fixed base every href is resolved against
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Returns true if `candidate` should be traversed from `current`
    ///
    /// Pure and infallible.
    ///
    /// # Examples
    ///
    /// ```
    /// use topic_harvester::url::ScopeFilter;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.com").unwrap();
    /// let filter = ScopeFilter::new(base, "/en-ca/home/", vec!["professional".to_string()]);
    ///
    /// let current = Url::parse("https://example.com/en-ca/home/x").unwrap();
    /// let sibling = Url::parse("https://example.com/en-ca/home/y").unwrap();
    /// assert!(filter.is_in_scope(&sibling, &current));
    /// assert!(!filter.is_in_scope(&current, &current));
    /// ```
    pub fn is_in_scope(&self, candidate: &Url, current: &Url) -> bool {
        if candidate.origin() != self.base.origin() {
            return false;
        }

        if !candidate.path().starts_with(&self.path_prefix) {
            return false;
        }

        // Keywords are matched against everything after the host
        let relative = &candidate[Position::BeforePath..];
        if self
            .excluded_keywords
            .iter()
            .any(|keyword| relative.contains(keyword.as_str()))
        {
            return false;
        }

        candidate != current
    }
}
