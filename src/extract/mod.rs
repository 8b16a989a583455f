//! Link extraction from fetched content
//!
//! The crawl engine depends on the [`LinkExtractor`] trait; the default
//! [`HtmlLinkExtractor`] pulls anchor targets out of HTML documents.

mod html;

pub use html::HtmlLinkExtractor;

use crate::fetch::Content;
use crate::url::ResourceId;
use thiserror::Error;

/// Errors raised while extracting links from content
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed content for {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Produces the ordered, finite sequence of resources referenced by a
/// piece of content.
///
/// Candidates that cannot be resolved into a valid [`ResourceId`] are
/// dropped rather than reported; an [`ExtractError`] means the content
/// itself could not be processed.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, id: &ResourceId, content: &Content) -> Result<Vec<ResourceId>, ExtractError>;
}
