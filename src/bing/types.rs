use serde::Deserialize;

/// Metadata record embedded in the `m` attribute of each result anchor.
///
/// Bing ships a dozen more fields per record; only the ones used here are
/// modeled, and a record without a string `murl` fails to decode.
#[derive(Debug, Deserialize)]
pub struct ImageMetadata {
    /// Full-resolution image URL.
    #[serde(rename = "murl")]
    pub media_url: String,

    /// Result title.
    #[serde(rename = "t", default)]
    pub title: Option<String>,
}

/// An image URL extracted from search-result markup, not yet validated as
/// fetchable.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub url: String,
}
