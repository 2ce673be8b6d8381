mod common;
pub use self::common::Query;
mod quote_summary;
pub use self::quote_summary::{Module, QuoteSummaryQuery};
