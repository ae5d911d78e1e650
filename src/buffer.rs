//! The buffer module holds the two shapes a URL list takes: the ordered result of an
//! extraction, and the editable newline-joined text that is authoritative afterwards.

use std::fmt;

/// Ordered list of page URLs produced by a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlList {
    urls: Vec<String>,
}

impl UrlList {
    /// Builds a list from extracted entries, dropping the ones whose text is empty.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls
                .into_iter()
                .map(Into::into)
                .filter(|url| !url.trim().is_empty())
                .collect(),
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn count(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Newline-joined text, the form shown to the user for editing.
    pub fn to_text(&self) -> String {
        self.urls.join("\n")
    }
}

impl IntoIterator for UrlList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}

/// Editable text holding one URL per line.
///
/// There is no structured list kept next to it: every export re-derives its
/// entries from the text as it is at that moment, so user edits always win.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlBuffer {
    text: String,
}

impl UrlBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The verbatim text, blank lines included.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Non-blank lines, trimmed, in order.
    pub fn entries(&self) -> Vec<&str> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Replaces the whole text, as a direct user edit does.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl From<&UrlList> for UrlBuffer {
    fn from(list: &UrlList) -> Self {
        Self::new(list.to_text())
    }
}

impl fmt::Display for UrlBuffer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}
