use scraper::{Html, Selector};
use tracing::debug;

use super::types::{Candidate, ImageMetadata};

/// Result anchors carrying embedded metadata on the Bing results page.
const RESULT_SELECTOR: &str = "a.iusc";

/// Attribute holding the JSON metadata record.
const METADATA_ATTR: &str = "m";

/// Extracts candidate image URLs from a search results page, in document
/// order, truncated to `limit`. Elements with absent or malformed metadata
/// are skipped without affecting the rest of the page.
pub fn candidates(html: &str, limit: usize) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(RESULT_SELECTOR).expect("static selector parses");

    let mut found = Vec::new();
    for element in document.select(&selector) {
        if found.len() == limit {
            break;
        }

        let Some(raw) = element.value().attr(METADATA_ATTR) else {
            debug!("result anchor without metadata attribute, skipping");
            continue;
        };

        if let Some(meta) = decode_metadata(raw) {
            debug!(
                url = %meta.media_url,
                title = meta.title.as_deref().unwrap_or(""),
                "candidate"
            );
            found.push(Candidate {
                url: meta.media_url,
            });
        }
    }

    found
}

/// Strict decode of one metadata record. Anything that is not a JSON object
/// with an HTTP(S) `murl` is rejected.
fn decode_metadata(raw: &str) -> Option<ImageMetadata> {
    let meta: ImageMetadata = match serde_json::from_str(raw) {
        Ok(meta) => meta,
        Err(e) => {
            debug!(%e, "malformed metadata attribute, skipping");
            return None;
        }
    };

    match url::Url::parse(&meta.media_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(meta),
        _ => {
            debug!(url = %meta.media_url, "media URL is not HTTP(S), skipping");
            None
        }
    }
}
