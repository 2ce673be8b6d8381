//! Metrics retrieval: one provider lookup turned into a [`FinancialRecord`].

use std::future::Future;

use thiserror::Error;
use valuecalc_api::types::QuoteRecord;

use crate::metrics::FinancialRecord;
use crate::validation::Ticker;

/// The provider lookup failed. No partial record is produced.
#[derive(Error, Debug)]
#[error("could not retrieve metrics for {ticker}: {source}")]
pub struct RetrievalError {
    pub ticker: String,
    #[source]
    pub source: valuecalc_api::Error,
}

/// Something that can look up the flat provider record for a ticker.
pub trait MetricsSource {
    fn lookup(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<QuoteRecord, valuecalc_api::Error>> + Send;
}

impl MetricsSource for valuecalc_api::Client {
    async fn lookup(&self, ticker: &str) -> Result<QuoteRecord, valuecalc_api::Error> {
        self.get_quote_record(ticker).await
    }
}

/// Fetches metrics from a [`MetricsSource`]. One lookup per call; no
/// retries and no caching.
pub struct MetricsRetriever<S> {
    source: S,
}

impl<S: MetricsSource> MetricsRetriever<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a record with all 21 fields set; anything the provider did
    /// not report is [`crate::metrics::MetricValue::Unavailable`].
    pub async fn fetch(&self, ticker: &Ticker) -> Result<FinancialRecord, RetrievalError> {
        let quote = self
            .source
            .lookup(ticker.as_str())
            .await
            .map_err(|source| RetrievalError {
                ticker: ticker.to_string(),
                source,
            })?;

        let record = FinancialRecord::from_provider(&quote);
        let missing = record.unavailable_metrics();
        if !missing.is_empty() {
            tracing::debug!(
                "{}: {} of {} fields unavailable",
                ticker,
                missing.len(),
                crate::metrics::Metric::COUNT
            );
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Metric, MetricValue};
    use crate::validation::validate_ticker;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        result: fn() -> Result<QuoteRecord, valuecalc_api::Error>,
        calls: AtomicUsize,
    }

    impl MetricsSource for StaticSource {
        async fn lookup(&self, _ticker: &str) -> Result<QuoteRecord, valuecalc_api::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn full_quote() -> Result<QuoteRecord, valuecalc_api::Error> {
        let mut fields = serde_json::Map::new();
        for (i, metric) in Metric::ALL.iter().enumerate() {
            let path = metric.provider_path();
            let value = json!(i as f64 + 1.0);
            let value = if path.len() == 2 {
                let mut nested = serde_json::Map::new();
                nested.insert(path[1].to_string(), value);
                serde_json::Value::Object(nested)
            } else {
                value
            };
            fields.insert(path[0].to_string(), value);
        }
        Ok(QuoteRecord::from_fields(fields))
    }

    fn sparse_quote() -> Result<QuoteRecord, valuecalc_api::Error> {
        let fields = json!({"trailingEps": 7.5, "beta": null});
        Ok(QuoteRecord::from_fields(fields.as_object().cloned().unwrap()))
    }

    fn failing() -> Result<QuoteRecord, valuecalc_api::Error> {
        Err(valuecalc_api::Error::NotFound("NOPE".to_string()))
    }

    fn retriever(
        result: fn() -> Result<QuoteRecord, valuecalc_api::Error>,
    ) -> MetricsRetriever<StaticSource> {
        MetricsRetriever::new(StaticSource {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn full_record_has_no_unavailable_fields() {
        let r = retriever(full_quote);
        let record = r.fetch(&validate_ticker("TCS.NS").unwrap()).await.unwrap();
        assert!(record.unavailable_metrics().is_empty());
        assert_eq!(record.get(Metric::CurrentPrice), MetricValue::Present(1.0));
        assert_eq!(record.get(Metric::SectorPe), MetricValue::Present(14.0));
        assert_eq!(r.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_fields_become_unavailable() {
        let r = retriever(sparse_quote);
        let record = r.fetch(&validate_ticker("X").unwrap()).await.unwrap();
        assert_eq!(record.get(Metric::Eps), MetricValue::Present(7.5));
        assert_eq!(record.get(Metric::Beta), MetricValue::Unavailable);
        assert_eq!(record.unavailable_metrics().len(), Metric::COUNT - 1);
    }

    #[tokio::test]
    async fn provider_failure_is_typed() {
        let r = retriever(failing);
        let err = r.fetch(&validate_ticker("NOPE").unwrap()).await.unwrap_err();
        assert_eq!(err.ticker, "NOPE");
        assert!(matches!(err.source, valuecalc_api::Error::NotFound(_)));
        assert!(err.to_string().contains("NOPE"));
    }
}
