pub const TRANSPORT_ENV_NAME: &str = "SITEMAP_URLS_TRANSPORT";
pub const ENDPOINT_ENV_NAME: &str = "SITEMAP_URLS_ENDPOINT";

pub const USER_AGENT: &str = concat!("sitemap-urls/", env!("CARGO_PKG_VERSION"));

/// Relay that returns the raw body of `?url=` wrapped in `{ "contents": ... }`.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.allorigins.win/get";

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const SITEMAP_CHANGEFREQ: &str = "weekly";
pub const SITEMAP_PRIORITY: &str = "0.8";

pub const CSV_HEADER: &str = "URL";
pub const CSV_FILE_NAME: &str = "sitemap-urls.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
pub const XML_FILE_NAME: &str = "sitemap.xml";
pub const XML_MIME_TYPE: &str = "application/xml;charset=utf-8";
