//! The extract module turns a sitemap URL into the list of page URLs it contains.
//!
//! The transport is hidden behind the [`Extractor`] trait: the sitemap can be
//! fetched directly, through a relay that wraps the body in JSON, or handed to a
//! remote service that does the parsing itself. Every transport issues exactly
//! one request per call and never retries.

use std::future::Future;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::buffer::UrlList;
use crate::error::ExtractionError;
use crate::sitemap::parse_loc_entries;

/// Capability to extract page URLs from a sitemap.
pub trait Extractor {
    /// Extracts the page URLs listed by the sitemap at `sitemap_url`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Fetch` on transport, status, envelope or parse
    /// failure and `ExtractionError::EmptyResult` when no usable entry is found.
    fn extract(
        &self,
        sitemap_url: &Url,
    ) -> impl Future<Output = Result<UrlList, ExtractionError>> + Send;
}

/// Checks user input before any request is made.
///
/// # Errors
///
/// Returns `ExtractionError::Validation` if the input is blank, does not parse
/// as an absolute URL, or is not an http(s) URL with a host.
pub fn validate_source(input: &str) -> Result<Url, ExtractionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExtractionError::Validation(
            "Please enter a sitemap URL".to_owned(),
        ));
    }

    let invalid = || ExtractionError::Validation("Please enter a valid URL".to_owned());
    let url = Url::parse(input).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    Ok(url)
}

fn require_entries(list: UrlList, sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
    if list.is_empty() {
        return Err(ExtractionError::EmptyResult);
    }
    debug!("{} URLs found in {sitemap_url}", list.count());
    Ok(list)
}

/// Fetches the sitemap itself and parses the raw XML body.
#[derive(Debug, Clone)]
pub struct DirectExtractor {
    client: Client,
}

impl DirectExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Extractor for DirectExtractor {
    async fn extract(&self, sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
        debug!("GET {sitemap_url}");
        let response = self
            .client
            .get(sitemap_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ExtractionError::fetch)?;
        let content = response.bytes().await.map_err(ExtractionError::fetch)?;

        require_entries(parse_loc_entries(&content)?, sitemap_url)
    }
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: Option<String>,
}

/// Fetches the sitemap through a relay answering `{ "contents": "<raw body>" }`.
#[derive(Debug, Clone)]
pub struct RelayExtractor {
    client: Client,
    endpoint: Url,
}

impl RelayExtractor {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl Extractor for RelayExtractor {
    async fn extract(&self, sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
        debug!("GET {} for {sitemap_url}", self.endpoint);
        let envelope: RelayEnvelope = self
            .client
            .get(self.endpoint.clone())
            .query(&[("url", sitemap_url.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ExtractionError::fetch)?
            .json()
            .await
            .map_err(ExtractionError::fetch)?;

        let contents = envelope
            .contents
            .ok_or_else(|| ExtractionError::fetch("the relay returned no contents"))?;

        require_entries(parse_loc_entries(contents.as_bytes())?, sitemap_url)
    }
}

#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    success: bool,
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    error: Option<String>,
}

/// Delegates fetching and parsing to a remote extraction endpoint.
#[derive(Debug, Clone)]
pub struct ServiceExtractor {
    client: Client,
    endpoint: Url,
}

impl ServiceExtractor {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl Extractor for ServiceExtractor {
    async fn extract(&self, sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
        debug!("POST {} for {sitemap_url}", self.endpoint);
        let response: ServiceResponse = self
            .client
            .post(self.endpoint.clone())
            .json(&ServiceRequest {
                url: sitemap_url.as_str(),
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ExtractionError::fetch)?
            .json()
            .await
            .map_err(ExtractionError::fetch)?;

        if !response.success {
            return Err(ExtractionError::fetch(
                response
                    .error
                    .unwrap_or_else(|| "the extraction service reported a failure".to_owned()),
            ));
        }

        if let Some(count) = response.count
            && count != response.urls.len()
        {
            debug!(
                "Service reported {count} URLs but returned {}",
                response.urls.len()
            );
        }

        require_entries(UrlList::new(response.urls), sitemap_url)
    }
}

/// The transport chosen at deployment time.
#[derive(Debug, Clone)]
pub enum ConfiguredExtractor {
    Direct(DirectExtractor),
    Relay(RelayExtractor),
    Service(ServiceExtractor),
}

impl Extractor for ConfiguredExtractor {
    async fn extract(&self, sitemap_url: &Url) -> Result<UrlList, ExtractionError> {
        match self {
            Self::Direct(extractor) => extractor.extract(sitemap_url).await,
            Self::Relay(extractor) => extractor.extract(sitemap_url).await,
            Self::Service(extractor) => extractor.extract(sitemap_url).await,
        }
    }
}
