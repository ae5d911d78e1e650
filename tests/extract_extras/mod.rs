use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use sitemap_urls::{Extractor, ExtractionError, UrlList, clipboard::ClipboardSink, ExportError};
use url::Url;

#[macro_export]
macro_rules! assert_csv_exports {
    (
        $(
            $test_name:ident : buffer => $buffer:expr, csv => $csv:expr
        ),+ $(,)?
    ) => {
        $(
            #[test]
            fn $test_name() {
                let buffer = sitemap_urls::UrlBuffer::new($buffer);
                let result = sitemap_urls::to_csv(&buffer).expect("Expected a CSV export.");

                assert_that(&result).is_equal_to($csv.to_owned());
            }
        )+
    }
}

pub(crate) fn lastmod() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date")
}

/// A `<urlset>` document with one `<url>` per location.
pub(crate) fn urlset(locations: &[&str]) -> String {
    let urls: String = locations
        .iter()
        .map(|loc| format!("<url><loc>{loc}</loc><changefreq>daily</changefreq></url>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{urls}</urlset>"#
    )
}

/// Extractor returning a canned result and counting how often it was asked.
pub(crate) struct StubExtractor {
    result: Result<UrlList, ExtractionError>,
    calls: AtomicUsize,
}

impl StubExtractor {
    pub fn new(result: Result<UrlList, ExtractionError>) -> Self {
        StubExtractor {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(urls: &[&str]) -> Self {
        Self::new(Ok(UrlList::new(urls.iter().copied())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Extractor for StubExtractor {
    async fn extract(&self, _sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Clipboard that records what it was given, or refuses every write.
#[derive(Default)]
pub(crate) struct StubClipboard {
    pub contents: Option<String>,
    pub denied: bool,
}

impl ClipboardSink for StubClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        if self.denied {
            return Err(ExportError::Clipboard("permission denied".to_owned()));
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}
