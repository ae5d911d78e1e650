//! Error kinds surfaced to the user. The `Display` text of each variant is the
//! short notification shown when the operation fails.

use thiserror::Error;

/// Failure of a sitemap extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The sitemap URL was blank or malformed. No request was made.
    #[error("{0}")]
    Validation(String),
    /// Network, HTTP status, envelope or XML failure while extracting.
    #[error("Failed to extract URLs from the sitemap: {0}")]
    Fetch(String),
    /// The document was reachable and well-formed but had no usable `<loc>` entries.
    #[error("The sitemap doesn't contain any valid URLs")]
    EmptyResult,
}

impl ExtractionError {
    pub(crate) fn fetch(reason: impl std::fmt::Display) -> Self {
        Self::Fetch(reason.to_string())
    }
}

/// Failure of an export or clipboard operation.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export. Please extract URLs first")]
    NoData,
    #[error("Failed to write CSV: {0}")]
    Csv(String),
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),
    #[error("Failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub(crate) fn csv(reason: impl std::fmt::Display) -> Self {
        Self::Csv(reason.to_string())
    }
}
