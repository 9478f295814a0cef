use serde::Deserialize;

/// Main configuration structure for Topic-Harvester
///
/// Every section falls back to its defaults, which reproduce the reference
/// health-topics crawl, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub scope: ScopeConfig,
    pub extraction: ExtractionConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Fixed base that every href is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page the traversal starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Pause between consecutive fetches (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.merckmanuals.com".to_string(),
            seed_url: "https://www.merckmanuals.com/en-ca/home/health-topics".to_string(),
            politeness_delay: 1000,
            request_timeout: 10,
        }
    }
}

/// URL namespace the crawl is confined to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Path prefix every in-scope URL must start with
    #[serde(rename = "path-prefix")]
    pub path_prefix: String,

    /// Substrings that disqualify a URL
    #[serde(rename = "excluded-keywords")]
    pub excluded_keywords: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/en-ca/home/".to_string(),
            excluded_keywords: ["professional", "resourcespages", "author", "about", "contact"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Content extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Selector for the primary content container
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// Selector used when the content container is absent
    #[serde(rename = "fallback-selector")]
    pub fallback_selector: String,

    /// Elements removed from the content region before flattening
    #[serde(rename = "stripped-elements")]
    pub stripped_elements: Vec<String>,

    /// Title written when a page has no `<title>`
    #[serde(rename = "default-title")]
    pub default_title: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_selector: "div.content".to_string(),
            fallback_selector: "body".to_string(),
            stripped_elements: ["script", "style", "nav", "footer", "header", "a"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_title: "No Title".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match self.contact_url.as_deref().filter(|u| !u.is_empty()) {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV dataset, truncated at the start of each run
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "merck_latest.csv".to_string(),
        }
    }
}
