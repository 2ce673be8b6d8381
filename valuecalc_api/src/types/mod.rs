mod quote_summary;
pub use self::quote_summary::{ProviderError, QuoteSummary, QuoteSummaryResponse};

mod record;
pub use self::record::QuoteRecord;
