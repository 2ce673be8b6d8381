use std::collections::BTreeSet;

use anyhow::Result;
use clap::Args;
use valuecalc_lib::ValuationRequest;

use super::{fetch_report, report_failure, ProviderArgs};
use crate::output::{print_metrics, OutputFormat};

#[derive(Args)]
pub struct MetricsArgs {
    /// Ticker symbol, e.g. INFY.NS
    pub ticker: String,
}

pub async fn run(
    args: &MetricsArgs,
    provider: &ProviderArgs,
    format: &OutputFormat,
) -> Result<()> {
    let request = ValuationRequest::new(&args.ticker, BTreeSet::new()).map_err(report_failure)?;
    let retriever = provider.retriever()?;
    let report = fetch_report(&retriever, &request).await?;

    let missing = report.record.unavailable_metrics().len();
    if missing > 0 {
        tracing::info!("{}: {} fields not reported", report.ticker, missing);
    }
    print_metrics(&report, format)
}
