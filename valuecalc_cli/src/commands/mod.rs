//! CLI subcommand implementations.

pub mod metrics;
pub mod value;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use valuecalc_lib::valuecalc_api::Client;
use valuecalc_lib::{
    run_request, MetricsRetriever, ProviderConfig, ValuationReport, ValuationRequest,
    ValuecalcError,
};

/// Provider flags from the command line, applied on top of the environment.
#[derive(Clone, Debug, Default)]
pub struct ProviderArgs {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderArgs {
    /// Builds the retriever. Called only once the request has been
    /// validated, so input errors win over configuration errors.
    pub(crate) fn retriever(&self) -> Result<MetricsRetriever<Client>> {
        let config = ProviderConfig::from_env()
            .with_overrides(self.base_url.as_deref(), self.timeout_secs)
            .map_err(report_failure)?;
        tracing::debug!("provider {} (timeout {:?})", config.base_url, config.timeout);
        Ok(MetricsRetriever::new(config.client()))
    }
}

/// Fetches and values one request behind a spinner on stderr.
///
/// Request-fatal errors print their user-facing message before being
/// returned, so the process exits non-zero with a readable line.
pub(crate) async fn fetch_report(
    retriever: &MetricsRetriever<Client>,
    request: &ValuationRequest,
) -> Result<ValuationReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("fetching metrics for {}...", request.ticker));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = run_request(retriever, request).await;
    spinner.finish_and_clear();

    result.map_err(report_failure)
}

pub(crate) fn report_failure(err: ValuecalcError) -> anyhow::Error {
    eprintln!("{}", err.user_message());
    err.into()
}
