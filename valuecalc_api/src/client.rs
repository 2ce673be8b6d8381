//! HTTP client for the Yahoo-style quote-summary API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, QuoteSummaryQuery},
    types::{QuoteRecord, QuoteSummaryResponse},
    user_agent::get_user_agent,
    Error,
};

/// Default request timeout. Kept short: one lookup per run, no retries.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the quote-summary API.
///
/// Sends requests with a browser-like user agent. Each request builds a
/// fresh `reqwest::Client` carrying the configured timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://query2.finance.yahoo.com`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production Yahoo Finance API.
    pub fn new() -> Self {
        Self::with_base_url("https://query2.finance.yahoo.com")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::error!("Resource not found: {}", truncate_body(&body));
            return Err(Error::NotFound(segments.last().unwrap_or(&"").to_string()));
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            tracing::error!("Request timed out after {:?}", self.timeout);
            Error::Timeout(self.timeout)
        } else {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed
        }
    }

    /// Fetches the raw quote-summary envelope for a ticker.
    pub async fn get_quote_summary(
        &self,
        ticker: &str,
        query: &QuoteSummaryQuery,
    ) -> Result<QuoteSummaryResponse, Error> {
        self.get::<QuoteSummaryResponse, QuoteSummaryQuery>(
            &["v10", "finance", "quoteSummary", ticker],
            Some(query),
        )
        .await
    }

    /// Fetches every module for a ticker and flattens it into one record.
    ///
    /// A provider error object, a `null` result, or an empty result list are
    /// all reported as errors; an unknown symbol maps to [`Error::NotFound`].
    pub async fn get_quote_record(&self, ticker: &str) -> Result<QuoteRecord, Error> {
        let resp = self
            .get_quote_summary(ticker, &QuoteSummaryQuery::default())
            .await?;
        let summary = resp.quote_summary;

        if let Some(err) = summary.error {
            if err.is_not_found() {
                return Err(Error::NotFound(ticker.to_string()));
            }
            return Err(Error::Provider {
                code: err.code,
                description: err.description,
            });
        }

        match summary.result.and_then(|r| r.into_iter().next()) {
            Some(modules) => Ok(QuoteRecord::from_modules(&modules)),
            None => Err(Error::NotFound(ticker.to_string())),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
