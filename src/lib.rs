//! The sitemap_urls library extracts the page URLs listed by a sitemap.xml and
//! exports them as CSV or re-serialises them as a sitemap XML file.

pub mod buffer;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod extract;
pub mod session;
pub mod sitemap;

use crate::constants::{CSV_FILE_NAME, CSV_MIME_TYPE, XML_FILE_NAME, XML_MIME_TYPE};

/// Enum representing the file format of an export.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xml,
}

impl ExportFormat {
    /// Default name of the downloaded file.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Xml => XML_FILE_NAME,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME_TYPE,
            ExportFormat::Xml => XML_MIME_TYPE,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            _ => Err(format!("Invalid export format: {}", input)),
        }
    }
}

pub use buffer::{UrlBuffer, UrlList};
pub use config::Transport;
pub use error::{ExportError, ExtractionError};
pub use export::{Download, render, to_clipboard_text, to_csv, to_xml_sitemap};
pub use extract::{Extractor, validate_source};
pub use session::Session;
