//! HTML parser for extracting page records and links
//!
//! This module handles parsing HTML content to extract:
//! - The page title
//! - Single-line text of the main content region
//! - Every anchor href in the document

use crate::config::ExtractionConfig;
use crate::ConfigError;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Flattened `<title>` text, or the configured placeholder
    pub title: String,

    /// Main-content text with stripped elements removed, on one line
    pub content: String,

    /// Raw href values of every anchor in the document, in document order
    pub hrefs: Vec<String>,
}

/// Compiles a CSS selector, reporting failures as configuration errors
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Compiled extraction rules
#[derive(Debug, Clone)]
pub struct Extractor {
    title: Selector,
    anchors: Selector,
    content: Selector,
    fallback: Selector,
    stripped: Vec<Selector>,
    default_title: String,
}

impl Extractor {
    /// Compiles the selectors named in the extraction configuration
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            title: compile_selector("title")?,
            anchors: compile_selector("a[href]")?,
            content: compile_selector(&config.content_selector)?,
            fallback: compile_selector(&config.fallback_selector)?,
            stripped: config
                .stripped_elements
                .iter()
                .map(|s| compile_selector(s))
                .collect::<Result<_, _>>()?,
            default_title: config.default_title.clone(),
        })
    }

    /// Parses HTML content and extracts the title, content and hrefs
    ///
    /// Never fails: missing structure degrades to the placeholder title or
    /// empty content.
    ///
    /// # Example
    ///
    /// ```
    /// use topic_harvester::config::ExtractionConfig;
    /// use topic_harvester::crawler::Extractor;
    ///
    /// let extractor = Extractor::from_config(&ExtractionConfig::default()).unwrap();
    /// let html = r#"<html><head><title>Test</title></head>
    ///     <body><div class="content">Hello <a href="/page">link</a> world</div></body></html>"#;
    /// let parsed = extractor.parse(html);
    /// assert_eq!(parsed.title, "Test");
    /// assert_eq!(parsed.content, "Hello world");
    /// assert_eq!(parsed.hrefs, vec!["/page"]);
    /// ```
    pub fn parse(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        ParsedPage {
            title: self.extract_title(&document),
            content: self.extract_main_text(&document),
            hrefs: self.extract_hrefs(&document),
        }
    }

    /// Extracts the first `<title>`, trimming each text fragment
    fn extract_title(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(|element| element.text().map(str::trim).collect::<String>())
            .unwrap_or_else(|| self.default_title.clone())
    }

    /// Extracts text from the content container, or the fallback region
    fn extract_main_text(&self, document: &Html) -> String {
        let region = document
            .select(&self.content)
            .next()
            .or_else(|| document.select(&self.fallback).next());

        let Some(region) = region else {
            return String::new();
        };

        let mut fragments = Vec::new();
        collect_text(region, &self.stripped, &mut fragments);

        fragments
            .join(" ")
            .replace(|c: char| c == '\n' || c == '\r', " ")
    }

    /// Collects every anchor href across the whole document
    fn extract_hrefs(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

/// Walks `element` depth-first, skipping stripped subtrees
fn collect_text<'a>(element: ElementRef<'a>, stripped: &[Selector], fragments: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    fragments.push(trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    if stripped.iter().any(|s| s.matches(&child_element)) {
                        continue;
                    }
                    collect_text(child_element, stripped, fragments);
                }
            }
            _ => {}
        }
    }
}
