//! The export module serialises the URL buffer into downloadable files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;

use crate::ExportFormat;
use crate::buffer::UrlBuffer;
use crate::constants::{CSV_HEADER, SITEMAP_CHANGEFREQ, SITEMAP_NAMESPACE, SITEMAP_PRIORITY};
use crate::error::ExportError;

fn non_blank_entries(buffer: &UrlBuffer) -> Result<Vec<&str>, ExportError> {
    if buffer.is_blank() {
        return Err(ExportError::NoData);
    }
    Ok(buffer.entries())
}

/// Renders the buffer as a single-column CSV with a `URL` header.
///
/// Every non-blank line becomes one quoted row, in buffer order. Embedded
/// quotes are doubled.
///
/// # Errors
///
/// Returns `ExportError::NoData` if the buffer is blank, or `ExportError::Csv`
/// if the writer fails.
pub fn to_csv(buffer: &UrlBuffer) -> Result<String, ExportError> {
    let entries = non_blank_entries(buffer)?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(format!("{CSV_HEADER}\n").into_bytes());
    for entry in entries {
        wtr.write_record([entry]).map_err(ExportError::csv)?;
    }

    let csv_content = wtr.into_inner().map_err(ExportError::csv)?;
    String::from_utf8(csv_content).map_err(ExportError::csv)
}

/// Renders the buffer as a sitemap `urlset` document.
///
/// Lines are written verbatim (trimmed) without checking that they are URLs.
///
/// # Arguments
///
/// * `buffer` - The current URL buffer
/// * `lastmod` - Date written to every `<lastmod>`, normally today
///
/// # Errors
///
/// Returns `ExportError::NoData` if the buffer is blank.
pub fn to_xml_sitemap(buffer: &UrlBuffer, lastmod: NaiveDate) -> Result<String, ExportError> {
    let entries = non_blank_entries(buffer)?;
    let lastmod = lastmod.format("%Y-%m-%d");

    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{SITEMAP_NAMESPACE}\">\n"
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{SITEMAP_CHANGEFREQ}</changefreq>\n    <priority>{SITEMAP_PRIORITY}</priority>\n  </url>\n",
            escape_xml(entry),
        ));
    }
    xml.push_str("</urlset>\n");

    Ok(xml)
}

/// Returns the text copied to the clipboard: the buffer exactly as it is.
///
/// # Errors
///
/// Returns `ExportError::NoData` if the buffer is blank.
pub fn to_clipboard_text(buffer: &UrlBuffer) -> Result<&str, ExportError> {
    if buffer.is_blank() {
        return Err(ExportError::NoData);
    }
    Ok(buffer.as_str())
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// A file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub body: String,
}

impl Download {
    /// Writes the file into `dir` under its default name.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    /// Writes the file to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be written.
    pub fn save_as(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, &self.body)?;
        info!(
            "Saved {} ({}) to {}",
            self.file_name,
            self.mime_type,
            path.display()
        );
        Ok(())
    }
}

/// Serialises the buffer in the given format.
///
/// # Errors
///
/// Returns `ExportError::NoData` if the buffer is blank.
pub fn render(
    format: ExportFormat,
    buffer: &UrlBuffer,
    lastmod: NaiveDate,
) -> Result<Download, ExportError> {
    let body = match format {
        ExportFormat::Csv => to_csv(buffer)?,
        ExportFormat::Xml => to_xml_sitemap(buffer, lastmod)?,
    };

    Ok(Download {
        file_name: format.file_name(),
        mime_type: format.mime_type(),
        body,
    })
}
