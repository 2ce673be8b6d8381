//! Query builder for the `/v10/finance/quoteSummary/{ticker}` endpoint.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::common::Query;

/// A data module of the quote-summary endpoint. Each module is a flat group
/// of fields; the client merges them into one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Price,
    SummaryDetail,
    DefaultKeyStatistics,
    FinancialData,
}

impl Module {
    /// Every module, in the order fields are merged.
    pub const ALL: [Module; 4] = [
        Module::FinancialData,
        Module::DefaultKeyStatistics,
        Module::SummaryDetail,
        Module::Price,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Price => "price",
            Module::SummaryDetail => "summaryDetail",
            Module::DefaultKeyStatistics => "defaultKeyStatistics",
            Module::FinancialData => "financialData",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(Module::Price),
            "summaryDetail" => Ok(Module::SummaryDetail),
            "defaultKeyStatistics" => Ok(Module::DefaultKeyStatistics),
            "financialData" => Ok(Module::FinancialData),
            _ => Err(()),
        }
    }
}

/// Selects which modules the provider should return.
#[derive(Clone, Debug)]
pub struct QuoteSummaryQuery {
    pub modules: Vec<Module>,
}

impl Default for QuoteSummaryQuery {
    /// All modules needed to populate a full financial record.
    fn default() -> Self {
        Self {
            modules: Module::ALL.to_vec(),
        }
    }
}

impl QuoteSummaryQuery {
    /// An empty query; add modules with [`QuoteSummaryQuery::with_module`].
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Requests one more module. Duplicates are ignored.
    pub fn with_module(mut self, module: Module) -> Self {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        self
    }
}

impl Query for QuoteSummaryQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if !self.modules.is_empty() {
            let modules = self
                .modules
                .iter()
                .map(Module::as_str)
                .collect::<Vec<_>>()
                .join(",");
            url.query_pairs_mut().append_pair("modules", &modules);
        }
        url
    }
}
