use crate::config::WikiConfig;
use crate::error::{Result, WikiError};
use crate::parsers::html::extract_content;
use crate::results::SearchResult;
use crate::sources::WikiSource;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// [`WikiSource`] backed by the MediaWiki action API
#[derive(Debug, Clone)]
pub struct MediaWikiSource {
    client: Client,
    api_url: String,
}

impl MediaWikiSource {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET the API with `params` and decode the body as JSON.
    ///
    /// A body that is not JSON decodes to `Value::Null` so the caller can
    /// still report the HTTP status.
    async fn request_json(&self, params: &[(&str, &str)]) -> Result<(StatusCode, Value)> {
        let response = self.client.get(&self.api_url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
        Ok((status, payload))
    }
}

impl WikiSource for MediaWikiSource {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        ::log::debug!("Searching {} for {:?}", self.api_url, query);
        let limit = limit.to_string();
        let (status, payload) = self
            .request_json(&[
                ("action", "opensearch"),
                ("format", "json"),
                ("formatversion", "2"),
                ("namespace", "0"),
                ("limit", limit.as_str()),
                ("search", query),
            ])
            .await?;

        if !status.is_success() || error_message(&payload).is_some() {
            return Err(WikiError::Query(
                error_message(&payload).unwrap_or_else(|| status_text(status)),
            ));
        }

        parse_search_payload(&payload)
    }

    async fn fetch_page(&self, title: &str) -> Result<String> {
        ::log::info!("Fetching page: {}", title);
        let (status, payload) = self
            .request_json(&[
                ("action", "parse"),
                ("page", title),
                ("prop", "text"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;

        if let Some(error) = payload.get("error") {
            if error.get("code").and_then(Value::as_str) == Some("missingtitle") {
                return Err(WikiError::PageNotFound(title.to_string()));
            }
        }
        if !status.is_success() || error_message(&payload).is_some() {
            return Err(WikiError::Query(
                error_message(&payload).unwrap_or_else(|| status_text(status)),
            ));
        }

        let html = payload
            .get("parse")
            .and_then(|parse| parse.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| WikiError::InvalidResponse(format!("no page text for {title}")))?;

        Ok(extract_content(html))
    }

    async fn probe(&self, url: &str) -> Result<bool> {
        let response = self.client.head(url).send().await?;
        ::log::trace!("Probe {} returned {}", url, response.status());
        Ok(response.status().is_success())
    }
}

/// Turn an opensearch payload `[query, [titles], [descriptions], [urls]]` into results
pub fn parse_search_payload(payload: &Value) -> Result<Vec<SearchResult>> {
    let parts = payload
        .as_array()
        .ok_or_else(|| WikiError::InvalidResponse("search payload is not an array".to_string()))?;

    let titles = parts
        .get(1)
        .and_then(Value::as_array)
        .ok_or_else(|| WikiError::InvalidResponse("search payload has no titles".to_string()))?;
    let urls = parts
        .get(3)
        .and_then(Value::as_array)
        .ok_or_else(|| WikiError::InvalidResponse("search payload has no urls".to_string()))?;

    let results = titles
        .iter()
        .zip(urls.iter())
        .filter_map(|(title, url)| {
            Some(SearchResult::new(
                title.as_str()?.to_string(),
                url.as_str()?.to_string(),
            ))
        })
        .collect::<Vec<_>>();

    ::log::debug!("Search returned {} results", results.len());
    Ok(results)
}

/// Message carried by an error payload: `message`, or MediaWiki's `error.info`
fn error_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.get("message") {
        return Some(
            message
                .as_str()
                .map(ToString::to_string)
                .unwrap_or_else(|| message.to_string()),
        );
    }

    let error = payload.get("error")?;
    error
        .get("info")
        .and_then(Value::as_str)
        .or_else(|| error.get("code").and_then(Value::as_str))
        .map(ToString::to_string)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(ToString::to_string)
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ImageState, ImageStatus};
    use mockito::Matcher;
    use serde_json::json;

    fn source_for(server: &mockito::ServerGuard) -> MediaWikiSource {
        MediaWikiSource::new(&WikiConfig::new(&format!("{}/api.php", server.url()))).unwrap()
    }

    #[test]
    fn test_parse_search_payload() {
        let payload = json!([
            "calendar",
            ["Calendar", "Festivals"],
            ["", ""],
            [
                "https://wiki.example/Calendar",
                "https://wiki.example/Festivals"
            ]
        ]);
        let results = parse_search_payload(&payload).unwrap();
        assert_eq!(
            results,
            vec![
                SearchResult::new("Calendar".into(), "https://wiki.example/Calendar".into()),
                SearchResult::new("Festivals".into(), "https://wiki.example/Festivals".into()),
            ]
        );
    }

    #[test]
    fn test_parse_search_payload_rejects_bad_shape() {
        assert!(matches!(
            parse_search_payload(&json!({"batchcomplete": true})),
            Err(WikiError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_search_payload(&json!(["q", ["A"]])),
            Err(WikiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(&json!({"message": "rate limited"})),
            Some("rate limited".to_string())
        );
        assert_eq!(
            error_message(&json!({"error": {"code": "badvalue", "info": "Bad value"}})),
            Some("Bad value".to_string())
        );
        assert_eq!(error_message(&json!(["q", [], [], []])), None);
    }

    #[tokio::test]
    async fn test_search_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "opensearch".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("search".into(), "parsnip seeds".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["parsnip seeds",["Parsnip Seeds"],[""],["https://wiki.example/Parsnip_Seeds"]]"#)
            .create_async()
            .await;

        let results = source_for(&server).search("parsnip seeds", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Parsnip Seeds");
        assert_eq!(results[0].url, "https://wiki.example/Parsnip_Seeds");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_error_message_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"message": "search is disabled"}"#)
            .create_async()
            .await;

        let err = source_for(&server).search("x", 10).await.unwrap_err();
        assert!(matches!(err, WikiError::Query(ref m) if m == "search is disabled"));
    }

    #[tokio::test]
    async fn test_search_status_text_when_no_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("<html>down</html>")
            .create_async()
            .await;

        let err = source_for(&server).search("x", 10).await.unwrap_err();
        assert!(matches!(err, WikiError::Query(ref m) if m == "Service Unavailable"));
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "parse".into()),
                Matcher::UrlEncoded("page".into(), "Calendar".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({"parse": {"title": "Calendar", "text": "<div class=\"mw-parser-output\"><p>Spring</p></div>"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let html = source_for(&server).fetch_page("Calendar").await.unwrap();
        assert_eq!(html, "<div class=\"mw-parser-output\"><p>Spring</p></div>");
    }

    #[tokio::test]
    async fn test_fetch_missing_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error": {"code": "missingtitle", "info": "The page you specified doesn't exist."}}"#)
            .create_async()
            .await;

        let err = source_for(&server).fetch_page("Nope").await.unwrap_err();
        assert!(matches!(err, WikiError::PageNotFound(ref t) if t == "Nope"));
    }

    #[tokio::test]
    async fn test_probe() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("HEAD", "/ok.png")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("HEAD", "/missing.png")
            .with_status(404)
            .create_async()
            .await;

        let source = source_for(&server);
        assert!(source.probe(&format!("{}/ok.png", server.url())).await.unwrap());
        assert!(!source.probe(&format!("{}/missing.png", server.url())).await.unwrap());
    }

    #[tokio::test]
    async fn test_refused_probe_is_classified_failed() {
        // Bind and release a port so nothing is listening on it
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/x.png");

        let source = MediaWikiSource::new(&WikiConfig::default()).unwrap();
        assert!(matches!(source.probe(&url).await, Err(WikiError::Http(_))));

        let statuses = crate::checker::check_all(&source, &[url.clone()]).await;
        assert_eq!(statuses, vec![ImageStatus::new(url, ImageState::Failed)]);
    }
}
