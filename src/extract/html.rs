//! HTML link extractor
//!
//! Extracts `<a href>` targets from an HTML document, resolves them against
//! the originating URL, and normalizes them into [`ResourceId`]s.
//!
//! **Include:** `<a href="...">` anywhere in the document.
//!
//! **Exclude:**
//! - `<a href="..." download>`
//! - `javascript:`, `mailto:`, `tel:` links and data URIs
//! - Fragment-only links (same-page anchors)
//! - Anything that fails to resolve or normalize

use crate::extract::{ExtractError, LinkExtractor};
use crate::fetch::Content;
use crate::url::ResourceId;
use scraper::{Html, Selector};
use url::Url;

/// Default [`LinkExtractor`] for HTML content
pub struct HtmlLinkExtractor {
    anchors: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        let anchors = Selector::parse("a[href]")
            .map_err(|e| ExtractError::Selector(format!("a[href]: {:?}", e)))?;
        Ok(Self { anchors })
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, id: &ResourceId, content: &Content) -> Result<Vec<ResourceId>, ExtractError> {
        let document = Html::parse_document(&content.text());
        let mut links = Vec::new();

        for element in document.select(&self.anchors) {
            if element.value().attr("download").is_some() {
                continue;
            }

            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if let Some(link) = resolve_link(href, id.as_url()) {
                links.push(link);
            }
        }

        tracing::trace!("Extracted {} links from {}", links.len(), id);
        Ok(links)
    }
}

/// Resolves an href against its base URL into a crawlable identifier
///
/// Returns None for excluded or unresolvable candidates.
fn resolve_link(href: &str, base: &Url) -> Option<ResourceId> {
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

    let absolute = base.join(href).ok()?;
    ResourceId::parse(absolute.as_str()).ok()
}
