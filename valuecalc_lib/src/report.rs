//! Request handling and the display-ready report.
//!
//! [`submit`] is the whole flow: validate the ticker, fetch the record,
//! run the selected methods, and package everything for rendering.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ValuecalcError;
use crate::metrics::{FinancialRecord, Metric, MetricValue};
use crate::retriever::{MetricsSource, MetricsRetriever};
use crate::validation::{validate_ticker, Ticker};
use crate::valuation::{valuate, MethodId, Outcome, SkipReason, ValuationResult};

/// Rows of the key metrics table, in display order.
pub const KEY_METRICS: [(&str, Metric); 10] = [
    ("ROA (Return on Assets)", Metric::Roa),
    ("ROE (Return on Equity)", Metric::Roe),
    ("ROCE (Return on Capital Employed)", Metric::Roce),
    ("ROIC (Return on Invested Capital)", Metric::Roic),
    ("Debt-to-Equity Ratio", Metric::DebtToEquity),
    ("Beta (Stock Volatility)", Metric::Beta),
    ("Face Value (₹)", Metric::FaceValue),
    ("Sector P/E", Metric::SectorPe),
    ("TTM P/E Ratio", Metric::TtmPe),
    ("Change in Promoter Holding (%)", Metric::PromoterHoldingChange),
];

/// Currency symbol used for every valuation figure.
pub const CURRENCY_SYMBOL: &str = "₹";

/// One validated submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuationRequest {
    pub ticker: Ticker,
    pub methods: BTreeSet<MethodId>,
}

impl ValuationRequest {
    /// Validates the ticker. Fails with [`ValuecalcError::InvalidInput`]
    /// before anything touches the network.
    pub fn new(ticker: &str, methods: BTreeSet<MethodId>) -> Result<Self, ValuecalcError> {
        Ok(Self {
            ticker: validate_ticker(ticker)?,
            methods,
        })
    }
}

/// One row of the key metrics table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: MetricValue,
}

/// A selected method and what it produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValuationLine {
    pub method: MethodId,
    pub title: &'static str,
    pub label: &'static str,
    /// Rounded value, absent when the method was skipped.
    pub value: Option<f64>,
    /// `₹<value>` for computed methods.
    pub display: Option<String>,
    pub skipped: Option<SkipReason>,
}

/// Everything the display surface needs for one lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValuationReport {
    pub ticker: String,
    pub record: FinancialRecord,
    pub key_metrics: Vec<MetricRow>,
    pub valuations: Vec<ValuationLine>,
}

impl ValuationReport {
    /// Packages a record and valuation result. Only methods that were
    /// selected appear in `valuations`.
    pub fn build(ticker: &Ticker, record: FinancialRecord, result: &ValuationResult) -> Self {
        let valuations = result
            .iter()
            .filter(|(_, outcome)| **outcome != Outcome::Skipped(SkipReason::NotSelected))
            .map(|(method, outcome)| ValuationLine {
                method,
                title: method.title(),
                label: method.result_label(),
                value: outcome.value(),
                display: outcome.value().map(format_currency),
                skipped: match outcome {
                    Outcome::Skipped(reason) => Some(reason.clone()),
                    Outcome::Computed(_) => None,
                },
            })
            .collect();

        Self {
            ticker: ticker.to_string(),
            key_metrics: key_metrics(&record),
            record,
            valuations,
        }
    }

    /// Lines that produced a value; skipped methods print nothing.
    pub fn computed(&self) -> impl Iterator<Item = &ValuationLine> + '_ {
        self.valuations.iter().filter(|line| line.value.is_some())
    }
}

/// The fixed 10-row metrics table.
pub fn key_metrics(record: &FinancialRecord) -> Vec<MetricRow> {
    KEY_METRICS
        .into_iter()
        .map(|(label, metric)| MetricRow {
            metric: label,
            value: record.get(metric),
        })
        .collect()
}

/// `₹1234.50`: two decimals, no grouping.
pub fn format_currency(value: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, value)
}

/// Runs one submission end to end.
///
/// An invalid ticker fails before the retriever is called; a failed lookup
/// fails the whole request; per-method problems only show up as skipped
/// lines in the report.
pub async fn submit<S: MetricsSource>(
    retriever: &MetricsRetriever<S>,
    ticker: &str,
    methods: BTreeSet<MethodId>,
) -> Result<ValuationReport, ValuecalcError> {
    let request = ValuationRequest::new(ticker, methods)?;
    run_request(retriever, &request).await
}

/// Fetches and values an already-validated request.
pub async fn run_request<S: MetricsSource>(
    retriever: &MetricsRetriever<S>,
    request: &ValuationRequest,
) -> Result<ValuationReport, ValuecalcError> {
    let record = retriever.fetch(&request.ticker).await?;
    let result = valuate(&record, &request.methods);
    Ok(ValuationReport::build(&request.ticker, record, &result))
}
