//! State behind one extractor screen: the sitemap URL being typed and the
//! editable URL buffer.

use log::info;

use crate::buffer::{UrlBuffer, UrlList};
use crate::error::ExtractionError;
use crate::extract::{Extractor, validate_source};

/// A sitemap source paired with the text buffer it fills.
///
/// `load` borrows the session mutably for the whole request, so a second
/// extraction cannot start until the first one has resolved.
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: String,
    buffer: UrlBuffer,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replaces the sitemap URL input wholesale.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn buffer(&self) -> &UrlBuffer {
        &self.buffer
    }

    /// Applies a user edit to the buffer.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer.set_text(text);
    }

    /// Validates the source, extracts it and, on success, replaces the buffer with
    /// the newline-joined result. On any error the buffer is left untouched.
    ///
    /// # Returns
    ///
    /// The extracted list, so the caller can report its count.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Validation` without calling the extractor when the
    /// source is blank or malformed, and passes through the extractor's
    /// `Fetch` and `EmptyResult` errors.
    pub async fn load<E: Extractor>(
        &mut self,
        extractor: &E,
    ) -> Result<UrlList, ExtractionError> {
        let sitemap_url = validate_source(&self.source)?;
        let list = extractor.extract(&sitemap_url).await?;

        self.buffer = UrlBuffer::from(&list);
        info!("Extracted {} URLs from the sitemap", list.count());
        Ok(list)
    }
}
