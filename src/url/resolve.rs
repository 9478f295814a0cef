use url::Url;

/// Resolves an href against the fixed crawl base
///
/// Every href is resolved against the same base rather than the page it was
/// found on, so a given href always maps to the same absolute URL.
///
/// Returns None if the link should be excluded:
/// - empty hrefs and fragment-only anchors
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use topic_harvester::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let url = resolve_href(&base, "/en-ca/home/topic").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/en-ca/home/topic");
/// assert!(resolve_href(&base, "mailto:someone@example.com").is_none());
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
