//! HTTP provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};
use wac_core::ResourceId;

use super::GraphProvider;
use crate::error::{FetchError, FetchResult, GraphError, GraphResult};
use crate::graph::Graph;
use crate::turtle::TurtleParser;

/// Configuration for [`HttpGraphProvider`].
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// `Accept` header value.
    pub accept: String,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("wac-graph/{}", env!("CARGO_PKG_VERSION")),
            accept: "text/turtle".to_string(),
        }
    }
}

impl HttpProviderConfig {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Dereferences documents over HTTP and parses them as Turtle.
///
/// - `404 Not Found` and `410 Gone` map to [`FetchError::NotFound`]
/// - any other non-success status maps to [`FetchError::Status`]
/// - transport failures and timeouts map to [`FetchError::Unreachable`]
/// - bodies that fail to parse map to [`FetchError::Parse`]
///
/// Relative IRIs in the body resolve against the requested URL.
#[derive(Debug, Clone)]
pub struct HttpGraphProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpGraphProvider {
    /// Creates a provider with its own client.
    pub fn new(config: HttpProviderConfig) -> GraphResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GraphError::Client(format!("failed to create client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a provider that shares an existing client.
    pub fn with_client(client: Client, config: HttpProviderConfig) -> Self {
        Self { client, config }
    }

    /// The provider configuration.
    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    async fn fetch_body(&self, document: &ResourceId) -> FetchResult<String> {
        let response = self
            .client
            .get(document.as_str())
            .header(ACCEPT, &self.config.accept)
            .send()
            .await
            .map_err(|e| FetchError::unreachable(document, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FetchError::not_found(document));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                document: document.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::unreachable(document, format!("failed to read body: {e}")))
    }
}

#[async_trait]
impl GraphProvider for HttpGraphProvider {
    #[instrument(skip(self), fields(document = %document))]
    async fn fetch(&self, document: &ResourceId) -> FetchResult<Arc<Graph>> {
        let start = Instant::now();
        let result = async {
            let body = self.fetch_body(document).await?;
            TurtleParser::new()
                .with_base(document.as_str())
                .and_then(|parser| parser.parse(&body))
                .map_err(|e| FetchError::parse(document, e))
        }
        .await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        wac_telemetry::metrics::record_document_fetch(outcome, start.elapsed());

        match result {
            Ok(graph) => {
                debug!(triples = graph.len(), "document fetched");
                Ok(Arc::new(graph))
            }
            Err(e) if e.is_not_found() => {
                debug!("document not found");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "document fetch failed");
                Err(e)
            }
        }
    }
}
