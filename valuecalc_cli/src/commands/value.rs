use std::collections::BTreeSet;

use anyhow::Result;
use clap::Args;
use valuecalc_lib::validation::parse_methods;
use valuecalc_lib::{MethodId, ValuationRequest};

use super::{fetch_report, report_failure, ProviderArgs};
use crate::output::{print_report, OutputFormat};

#[derive(Args)]
pub struct ValueArgs {
    /// Ticker symbol, e.g. TCS.NS
    pub ticker: String,

    /// Valuation method (dcf, pe, ddm, ev-ebitda); repeatable
    #[arg(short = 'm', long = "method")]
    pub methods: Vec<String>,

    /// Run every valuation method
    #[arg(long, conflicts_with = "methods")]
    pub all_methods: bool,
}

fn selected_methods(args: &ValueArgs) -> Result<BTreeSet<MethodId>> {
    if args.all_methods {
        return Ok(MethodId::ALL.into_iter().collect());
    }
    parse_methods(args.methods.as_slice()).map_err(|e| {
        eprintln!("{}", e);
        anyhow::Error::from(e)
    })
}

pub async fn run(
    args: &ValueArgs,
    provider: &ProviderArgs,
    format: &OutputFormat,
) -> Result<()> {
    let methods = selected_methods(args)?;
    let request = ValuationRequest::new(&args.ticker, methods).map_err(report_failure)?;

    if request.methods.is_empty() {
        eprintln!("No valuation methods selected; showing metrics only.");
    }

    let retriever = provider.retriever()?;
    let report = fetch_report(&retriever, &request).await?;
    tracing::info!(
        "{}: {} of {} selected methods computed",
        report.ticker,
        report.computed().count(),
        request.methods.len()
    );
    print_report(&report, format)
}
