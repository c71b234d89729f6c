//! Blog metadata: the `{ title, url }` list that pairs each building with a post.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BlogEntry {
    pub title: String,
    pub url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum BlogDataError {
    #[error("malformed blog metadata: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("blog metadata has {found} entries but {required} buildings need one each")]
    TooFew { found: usize, required: usize },
}

/// Parses the metadata document and checks it covers every building.
///
/// Entries past `building_count` are kept; they are simply never revealed.
/// Empty titles and urls are accepted as-is.
pub fn parse_blog_entries(
    text: &str,
    building_count: usize,
) -> Result<Vec<BlogEntry>, BlogDataError> {
    let entries: Vec<BlogEntry> = serde_json::from_str(text)?;
    validate_blog_entries(&entries, building_count)?;
    Ok(entries)
}

pub fn validate_blog_entries(
    entries: &[BlogEntry],
    building_count: usize,
) -> Result<(), BlogDataError> {
    if entries.len() < building_count {
        return Err(BlogDataError::TooFew {
            found: entries.len(),
            required: building_count,
        });
    }
    Ok(())
}
