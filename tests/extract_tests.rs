use crate::extract_extras::urlset;
use serde_json::json;
use sitemap_urls::{
    ExtractionError, Extractor, Transport, UrlList,
    config::ExtractorConfig,
    extract::{DirectExtractor, RelayExtractor, ServiceExtractor},
    validate_source,
};
use spectral::assert_that;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod extract_extras;

fn endpoint(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).expect("mock server url")
}

#[tokio::test]
async fn direct_extracts_locations_in_document_order() {
    let server = MockServer::start().await;
    let body = urlset(&[
        "",
        "https://a.com/",
        "https://a.com/about",
        "https://a.com/contact",
    ]);
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let list = extractor
        .extract(&endpoint(&server, "/sitemap.xml"))
        .await
        .expect("Expected successful extraction.");

    assert_that(&list.urls().to_vec()).is_equal_to(vec![
        "https://a.com/".to_owned(),
        "https://a.com/about".to_owned(),
        "https://a.com/contact".to_owned(),
    ]);
    assert_that(&list.count()).is_equal_to(3_usize);
}

#[tokio::test]
async fn direct_keeps_location_text_as_written() {
    let server = MockServer::start().await;
    let body = urlset(&["https://a.com", "  /about\n", "not a url", "https://a.com/café"]);
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let list = extractor
        .extract(&endpoint(&server, "/sitemap.xml"))
        .await
        .expect("Expected successful extraction.");

    assert_that(&list.urls().to_vec()).is_equal_to(vec![
        "https://a.com".to_owned(),
        "/about".to_owned(),
        "not a url".to_owned(),
        "https://a.com/café".to_owned(),
    ]);
    assert_that(&list.count()).is_equal_to(4_usize);
}

#[tokio::test]
async fn direct_lists_sitemap_index_entries_without_following_them() {
    let server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://a.com/posts.xml</loc></sitemap>
  <sitemap><loc>https://a.com/pages.xml</loc></sitemap>
</sitemapindex>"#;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let list = extractor
        .extract(&endpoint(&server, "/sitemap.xml"))
        .await
        .expect("Expected successful extraction.");

    assert_that(&list.urls().to_vec()).is_equal_to(vec![
        "https://a.com/posts.xml".to_owned(),
        "https://a.com/pages.xml".to_owned(),
    ]);
}

#[tokio::test]
async fn direct_reports_empty_result_for_sitemap_without_locations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&["", ""])))
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let result = extractor.extract(&endpoint(&server, "/sitemap.xml")).await;

    assert_that(&result.err()).is_equal_to(Some(ExtractionError::EmptyResult));
}

#[tokio::test]
async fn direct_reports_fetch_error_for_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let result = extractor.extract(&endpoint(&server, "/sitemap.xml")).await;

    assert_that(&matches!(result, Err(ExtractionError::Fetch(_)))).is_equal_to(true);
}

#[tokio::test]
async fn direct_reports_fetch_error_for_truncated_xml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<urlset><url><loc>https://a.com/</loc></url><url><loc>"),
        )
        .mount(&server)
        .await;

    let extractor = DirectExtractor::new(reqwest::Client::new());
    let result = extractor.extract(&endpoint(&server, "/sitemap.xml")).await;

    assert_that(&matches!(result, Err(ExtractionError::Fetch(_)))).is_equal_to(true);
}

#[tokio::test]
async fn relay_unwraps_contents_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("url", "https://a.com/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": urlset(&["https://a.com/", "https://a.com/blog"]),
            "status": { "http_code": 200 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = RelayExtractor::new(reqwest::Client::new(), endpoint(&server, "/get"));
    let sitemap_url = Url::parse("https://a.com/sitemap.xml").expect("valid url");
    let list = extractor
        .extract(&sitemap_url)
        .await
        .expect("Expected successful extraction.");

    assert_that(&list).is_equal_to(UrlList::new(["https://a.com/", "https://a.com/blog"]));
}

#[tokio::test]
async fn relay_without_contents_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contents": null })))
        .mount(&server)
        .await;

    let extractor = RelayExtractor::new(reqwest::Client::new(), endpoint(&server, "/get"));
    let sitemap_url = Url::parse("https://a.com/sitemap.xml").expect("valid url");
    let result = extractor.extract(&sitemap_url).await;

    assert_that(&matches!(result, Err(ExtractionError::Fetch(_)))).is_equal_to(true);
}

#[tokio::test]
async fn service_posts_url_and_returns_its_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract"))
        .and(body_json(json!({ "url": "https://a.com/sitemap.xml" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "urls": ["https://a.com/", "", "https://a.com/pricing"],
            "count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = ServiceExtractor::new(reqwest::Client::new(), endpoint(&server, "/extract"));
    let sitemap_url = Url::parse("https://a.com/sitemap.xml").expect("valid url");
    let list = extractor
        .extract(&sitemap_url)
        .await
        .expect("Expected successful extraction.");

    assert_that(&list.urls().to_vec()).is_equal_to(vec![
        "https://a.com/".to_owned(),
        "https://a.com/pricing".to_owned(),
    ]);
    assert_that(&list.count()).is_equal_to(2_usize);
}

#[tokio::test]
async fn service_failure_is_not_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "upstream timed out"
        })))
        .mount(&server)
        .await;

    let extractor = ServiceExtractor::new(reqwest::Client::new(), endpoint(&server, "/extract"));
    let sitemap_url = Url::parse("https://a.com/sitemap.xml").expect("valid url");
    let result = extractor.extract(&sitemap_url).await;

    assert_that(&result.err()).is_equal_to(Some(ExtractionError::Fetch(
        "upstream timed out".to_owned(),
    )));
}

#[tokio::test]
async fn service_with_no_urls_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "urls": [],
            "count": 0
        })))
        .mount(&server)
        .await;

    let extractor = ServiceExtractor::new(reqwest::Client::new(), endpoint(&server, "/extract"));
    let sitemap_url = Url::parse("https://a.com/sitemap.xml").expect("valid url");
    let result = extractor.extract(&sitemap_url).await;

    assert_that(&result.err()).is_equal_to(Some(ExtractionError::EmptyResult));
}

#[test]
fn validate_source_rejects_blank_and_malformed_input() {
    assert_that(&validate_source("   ").err()).is_equal_to(Some(ExtractionError::Validation(
        "Please enter a sitemap URL".to_owned(),
    )));

    for input in [
        "example.com/sitemap.xml",
        "not a url",
        "mailto:me@a.com",
        "file:///tmp/sitemap.xml",
    ] {
        assert_that(&validate_source(input).err()).is_equal_to(Some(ExtractionError::Validation(
            "Please enter a valid URL".to_owned(),
        )));
    }
}

#[test]
fn validate_source_trims_input() {
    let url = validate_source("  https://a.com/sitemap.xml \n").expect("Expected a valid URL.");

    assert_that(&url.as_str()).is_equal_to("https://a.com/sitemap.xml");
}

#[test]
fn transport_parses_case_insensitively() {
    assert_that(&"SERVICE".parse::<Transport>().ok()).is_equal_to(Some(Transport::Service));
    assert_that(&"relay".parse::<Transport>().ok()).is_equal_to(Some(Transport::Relay));
    assert_that(&"ftp".parse::<Transport>().is_err()).is_equal_to(true);
}

#[test]
fn service_transport_requires_endpoint() {
    let config = ExtractorConfig::default().with_overrides(Some(Transport::Service), None);

    assert_that(&config.build().is_err()).is_equal_to(true);
}

#[test]
fn relay_transport_falls_back_to_default_endpoint() {
    let config = ExtractorConfig::default().with_overrides(Some(Transport::Relay), None);

    assert_that(&config.build().is_ok()).is_equal_to(true);
}
