use std::collections::BTreeSet;
use std::fmt;

use crate::error::ValuecalcError;
use crate::valuation::MethodId;

/// A ticker symbol that is non-empty after trimming. Whether the provider
/// knows the symbol is only discovered by the lookup itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticker(String);

impl Ticker {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a ticker: trim surrounding whitespace and reject empty input.
/// Everything else goes to the provider unchanged.
pub fn validate_ticker(input: &str) -> Result<Ticker, ValuecalcError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValuecalcError::InvalidInput(
            "please enter a valid stock ticker".to_string(),
        ));
    }
    Ok(Ticker(trimmed.to_string()))
}

/// Parse method names (`dcf`, `pe`, `ddm`, `ev-ebitda`), case-insensitive.
/// Duplicates collapse; an empty list is an empty selection.
pub fn parse_methods<S: AsRef<str>>(inputs: &[S]) -> Result<BTreeSet<MethodId>, ValuecalcError> {
    inputs
        .iter()
        .map(|s| {
            s.as_ref()
                .parse::<MethodId>()
                .map_err(ValuecalcError::InvalidInput)
        })
        .collect()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
