use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level envelope of a quote-summary response.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummary,
}

/// Either a list of per-ticker module maps or an error object.
#[derive(Serialize, Deserialize, Debug)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProviderError {
    pub code: String,
    pub description: String,
}

impl ProviderError {
    /// Yahoo reports unknown symbols with code `Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("not found")
    }
}
