//! Reading `<loc>` values out of a sitemap payload.

use log::warn;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use xml::reader::{EventReader, XmlEvent};

use crate::buffer::UrlList;
use crate::error::ExtractionError;

/// Extracts the `<loc>` values of a sitemap document.
///
/// The text of every `<loc>` is kept as written, only surrounding whitespace is
/// trimmed, and entries left empty are dropped. Both `<url>` and `<sitemap>`
/// entries are collected in document order. Nested sitemaps are listed as they
/// are and never fetched.
///
/// # Arguments
///
/// * `content` - The raw XML payload.
///
/// # Returns
///
/// A `UrlList` with every non-empty location. It may be empty; deciding whether
/// that is an error is left to the caller.
///
/// # Errors
///
/// Returns `ExtractionError::Fetch` if the payload is not well-formed XML.
pub fn parse_loc_entries(content: &[u8]) -> Result<UrlList, ExtractionError> {
    let mut locations = Vec::new();
    let mut current: Option<String> = None;
    let mut depth = 0_usize;

    for event in EventReader::new(content) {
        match event.map_err(|e| ExtractionError::fetch(format!("invalid sitemap XML: {e}")))? {
            XmlEvent::StartElement { name, .. } => {
                if current.is_some() {
                    depth += 1;
                } else if name.local_name == "loc" {
                    current = Some(String::new());
                }
            }
            XmlEvent::EndElement { .. } => {
                if depth > 0 {
                    depth -= 1;
                } else if let Some(text) = current.take() {
                    locations.push(text.trim().to_owned());
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&text);
                }
            }
            _ => {}
        }
    }

    let nested = count_nested_sitemaps(content);
    if nested > 0 {
        warn!("Listing {nested} nested sitemaps without following them");
    }

    Ok(UrlList::new(locations))
}

/// Counts `<sitemap>` entries of a sitemap index.
fn count_nested_sitemaps(content: &[u8]) -> usize {
    let mut nested = 0;
    for entity in SiteMapReader::new(content) {
        match entity {
            SiteMapEntity::SiteMap(_) => nested += 1,
            SiteMapEntity::Url(_) => {}
            SiteMapEntity::Err(_) => break,
        }
    }
    nested
}
