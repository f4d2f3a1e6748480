//! Catalog client: HTTP transport and the search executor.

use crate::config::TuiConfig;
use async_trait::async_trait;
use libris_core::{normalize, RequestDescriptor, SearchCriteria, SearchFailure, SearchOutcome};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request timed out after {0}ms")]
    Timeout(u64),
}

impl ApiClientError {
    /// Fold a transport error into the failure shown to the user.
    pub fn into_failure(self) -> SearchFailure {
        match self {
            ApiClientError::Timeout(ms) => SearchFailure::Timeout(ms),
            ApiClientError::Http(err) if err.is_decode() => SearchFailure::Decode(err.to_string()),
            other => SearchFailure::Transport(other.to_string()),
        }
    }
}

/// Fetches raw response bodies from the catalog service.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiClientError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            timeout_ms: config.request_timeout_ms,
        })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::debug!(%url, status = status.as_u16(), error = %err, "Failed to read error body");
                    String::new()
                }
            };
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await.map_err(|err| self.classify(err))?;
        Ok(bytes.to_vec())
    }
}

impl HttpTransport {
    fn classify(&self, err: reqwest::Error) -> ApiClientError {
        if err.is_timeout() {
            ApiClientError::Timeout(self.timeout_ms)
        } else {
            ApiClientError::Http(err)
        }
    }
}

/// Runs built requests against the catalog and normalizes the answers.
///
/// The executor never returns an error: transport and decoding problems come
/// back as a [`SearchFailure`] inside the outcome.
pub struct SearchExecutor<T = HttpTransport> {
    transport: Arc<T>,
    base_url: String,
}

impl<T> Clone for SearchExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
        }
    }
}

impl SearchExecutor<HttpTransport> {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(transport, &config.api_base_url))
    }
}

impl<T: CatalogTransport> SearchExecutor<T> {
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute `request`. `on_loading(true)` fires before the call and
    /// `on_loading(false)` once it has settled either way.
    pub async fn execute<F>(
        &self,
        request: &RequestDescriptor,
        criteria: SearchCriteria,
        mut on_loading: F,
    ) -> SearchOutcome
    where
        F: FnMut(bool) + Send,
    {
        on_loading(true);
        let url = request.url(&self.base_url);
        tracing::debug!(endpoint = ?request.endpoint, %url, "Submitting catalog search");

        let outcome = match self.transport.fetch(&url).await {
            Ok(body) => normalize(&body, criteria),
            Err(err) => Err(err.into_failure()),
        };

        match &outcome {
            Ok(result) => tracing::info!(
                endpoint = ?request.endpoint,
                primary = result.primary.len(),
                suggestions = result.suggestions.len(),
                "Catalog search settled"
            ),
            Err(failure) => tracing::warn!(
                endpoint = ?request.endpoint,
                %url,
                error = %failure,
                "Catalog search failed"
            ),
        }

        on_loading(false);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::{build_request, SearchMode};
    use std::sync::Mutex;

    /// Transport returning a canned answer and recording requested URLs.
    struct FakeTransport {
        answer: Mutex<Option<Result<Vec<u8>, ApiClientError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn answering(answer: Result<&str, ApiClientError>) -> Self {
            Self {
                answer: Mutex::new(Some(answer.map(|body| body.as_bytes().to_vec()))),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatalogTransport for FakeTransport {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiClientError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.answer
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(ApiClientError::Status {
                        status: 503,
                        body: "no answer left".to_string(),
                    })
                })
        }
    }

    fn listing_request(criteria: &SearchCriteria) -> RequestDescriptor {
        build_request(SearchMode::Simple, criteria).unwrap()
    }

    #[tokio::test]
    async fn test_listing_response_is_normalized() {
        let transport = FakeTransport::answering(Ok(
            r#"{"result": [{"title": "A"}, {"title": "B"}], "suggestions": [{"title": "C"}]}"#,
        ));
        let executor = SearchExecutor::with_transport(transport, "http://catalog.test/");
        let criteria = SearchCriteria::new().with_title("A");
        let request = listing_request(&criteria);

        let outcome = executor.execute(&request, criteria.clone(), |_| {}).await;
        let result = outcome.unwrap();
        assert_eq!(result.primary.len(), 2);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.criteria, criteria);

        let requested = executor.transport.requested.lock().unwrap().clone();
        assert_eq!(
            requested,
            vec!["http://catalog.test/server/books/?sort=download_count&ord=ascending&languages=en&title=A"]
        );
    }

    #[tokio::test]
    async fn test_similarity_flat_array_is_normalized() {
        let transport = FakeTransport::answering(Ok(r#"[{"title": "Magic Tales"}]"#));
        let executor = SearchExecutor::with_transport(transport, "http://catalog.test");
        let criteria = SearchCriteria::new().with_keyword("magic");
        let request = build_request(SearchMode::CosineSimilarity, &criteria).unwrap();

        let result = executor.execute(&request, criteria, |_| {}).await.unwrap();
        assert_eq!(result.primary[0].title, "Magic Tales");
        assert!(result.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_loading_toggles_around_call() {
        let transport = FakeTransport::answering(Ok(r#"{"result": [], "suggestions": []}"#));
        let executor = SearchExecutor::with_transport(transport, "http://catalog.test");
        let criteria = SearchCriteria::new();
        let mut seen = Vec::new();

        let outcome = executor
            .execute(&listing_request(&criteria), criteria, |loading| seen.push(loading))
            .await;
        assert!(outcome.unwrap().is_empty());
        assert_eq!(seen, vec![true, false]);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_failure_and_clears_loading() {
        let transport = FakeTransport::answering(Err(ApiClientError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        }));
        let executor = SearchExecutor::with_transport(transport, "http://catalog.test");
        let criteria = SearchCriteria::new();
        let mut seen = Vec::new();

        let outcome = executor
            .execute(&listing_request(&criteria), criteria, |loading| seen.push(loading))
            .await;
        assert!(matches!(outcome, Err(SearchFailure::Transport(ref msg)) if msg.contains("502")));
        assert_eq!(seen, vec![true, false]);
    }

    #[tokio::test]
    async fn test_timeout_and_garbage_bodies() {
        let executor = SearchExecutor::with_transport(
            FakeTransport::answering(Err(ApiClientError::Timeout(3_000))),
            "http://catalog.test",
        );
        let criteria = SearchCriteria::new();
        let outcome = executor
            .execute(&listing_request(&criteria), criteria.clone(), |_| {})
            .await;
        assert_eq!(outcome, Err(SearchFailure::Timeout(3_000)));

        let executor = SearchExecutor::with_transport(
            FakeTransport::answering(Ok("<html>oops</html>")),
            "http://catalog.test",
        );
        let outcome = executor
            .execute(&listing_request(&criteria), criteria, |_| {})
            .await;
        assert!(matches!(outcome, Err(SearchFailure::Decode(_))));
    }

    #[tokio::test]
    async fn test_exhausted_fake_reports_status_failure() {
        let executor = SearchExecutor::with_transport(
            FakeTransport::answering(Ok(r#"{"result": []}"#)),
            "http://catalog.test",
        );
        let criteria = SearchCriteria::new();
        let request = listing_request(&criteria);
        assert!(executor.execute(&request, criteria.clone(), |_| {}).await.is_ok());

        let outcome = executor.execute(&request, criteria, |_| {}).await;
        assert_eq!(
            outcome,
            Err(SearchFailure::Transport("HTTP 503: no answer left".to_string()))
        );
    }

    #[test]
    fn test_error_folding() {
        let status = ApiClientError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(status.into_failure(), SearchFailure::Transport("HTTP 404: ".to_string()));
        assert_eq!(ApiClientError::Timeout(250).into_failure(), SearchFailure::Timeout(250));
    }
}
