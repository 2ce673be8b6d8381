//! Library layer for valuecalc: metric retrieval, the valuation engine,
//! and the report handed to the display layer.
//!
//! Wraps the `valuecalc_api` HTTP client with a typed 21-field record,
//! input validation, provider configuration, and four simplified
//! intrinsic-value formulas.

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod retriever;
pub mod validation;
pub mod valuation;

pub use valuecalc_api;

pub use config::ProviderConfig;
pub use error::ValuecalcError;
pub use metrics::{FinancialRecord, Metric, MetricValue};
pub use report::{
    run_request, submit, MetricRow, ValuationLine, ValuationReport, ValuationRequest,
};
pub use retriever::{MetricsRetriever, MetricsSource, RetrievalError};
pub use validation::Ticker;
pub use valuation::{valuate, MethodId, Outcome, SkipReason, ValuationResult};
