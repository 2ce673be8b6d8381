//! The fixed-schema financial record and its typed fields.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use valuecalc_api::types::QuoteRecord;

/// One of the 21 fields of a [`FinancialRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    CurrentPrice,
    MarketCap,
    Revenue,
    NetIncome,
    FreeCashFlow,
    Eps,
    PeRatio,
    TtmPe,
    PriceToBook,
    DividendYield,
    EvToEbitda,
    Beta,
    FaceValue,
    SectorPe,
    DebtToEquity,
    Roa,
    Roe,
    Roce,
    Roic,
    PromoterHoldingChange,
    SharesOutstanding,
}

impl Metric {
    pub const COUNT: usize = 21;

    /// Every metric in display order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::CurrentPrice,
        Metric::MarketCap,
        Metric::Revenue,
        Metric::NetIncome,
        Metric::FreeCashFlow,
        Metric::Eps,
        Metric::PeRatio,
        Metric::TtmPe,
        Metric::PriceToBook,
        Metric::DividendYield,
        Metric::EvToEbitda,
        Metric::Beta,
        Metric::FaceValue,
        Metric::SectorPe,
        Metric::DebtToEquity,
        Metric::Roa,
        Metric::Roe,
        Metric::Roce,
        Metric::Roic,
        Metric::PromoterHoldingChange,
        Metric::SharesOutstanding,
    ];

    /// Key shown for this metric in the raw record.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::CurrentPrice => "Current Price",
            Metric::MarketCap => "Market Cap",
            Metric::Revenue => "Revenue",
            Metric::NetIncome => "Net Income",
            Metric::FreeCashFlow => "Free Cash Flow",
            Metric::Eps => "EPS",
            Metric::PeRatio => "P/E Ratio",
            Metric::TtmPe => "TTM P/E",
            Metric::PriceToBook => "P/B Ratio",
            Metric::DividendYield => "Dividend Yield",
            Metric::EvToEbitda => "EV/EBITDA",
            Metric::Beta => "Beta",
            Metric::FaceValue => "Face Value",
            Metric::SectorPe => "Sector P/E",
            Metric::DebtToEquity => "Debt-to-Equity",
            Metric::Roa => "ROA",
            Metric::Roe => "ROE",
            Metric::Roce => "ROCE",
            Metric::Roic => "ROIC",
            Metric::PromoterHoldingChange => "Change in Promoter Holding",
            Metric::SharesOutstanding => "Shares Outstanding",
        }
    }

    /// Path of the provider field this metric is read from.
    ///
    /// "TTM P/E" reads `forwardPE` and "Face Value" reads `bookValue`; the
    /// record keeps those pairings as-is.
    pub fn provider_path(&self) -> &'static [&'static str] {
        match self {
            Metric::CurrentPrice => &["currentPrice"],
            Metric::MarketCap => &["marketCap"],
            Metric::Revenue => &["totalRevenue"],
            Metric::NetIncome => &["netIncomeToCommon"],
            Metric::FreeCashFlow => &["freeCashflow"],
            Metric::Eps => &["trailingEps"],
            Metric::PeRatio => &["trailingPE"],
            Metric::TtmPe => &["forwardPE"],
            Metric::PriceToBook => &["priceToBook"],
            Metric::DividendYield => &["dividendYield"],
            Metric::EvToEbitda => &["enterpriseToEbitda"],
            Metric::Beta => &["beta"],
            Metric::FaceValue => &["bookValue"],
            Metric::SectorPe => &["industryKeyStats", "peRatio"],
            Metric::DebtToEquity => &["debtToEquity"],
            Metric::Roa => &["returnOnAssets"],
            Metric::Roe => &["returnOnEquity"],
            Metric::Roce => &["returnOnCapitalEmployed"],
            Metric::Roic => &["returnOnInvestedCapital"],
            Metric::PromoterHoldingChange => &["changeInPromotersHolding"],
            Metric::SharesOutstanding => &["sharesOutstanding"],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A field value: either a reported number or the explicit "not reported" marker.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MetricValue {
    Present(f64),
    #[default]
    Unavailable,
}

impl MetricValue {
    /// Shown in place of a missing value.
    pub const UNAVAILABLE_TEXT: &'static str = "N/A";

    /// Wraps a number; non-finite numbers count as unreported.
    pub fn from_number(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => MetricValue::Present(v),
            _ => MetricValue::Unavailable,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Present(v) => Some(*v),
            MetricValue::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, MetricValue::Present(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Present(v) => write!(f, "{}", v),
            MetricValue::Unavailable => f.write_str(Self::UNAVAILABLE_TEXT),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Present(v) => serializer.serialize_f64(*v),
            MetricValue::Unavailable => serializer.serialize_str(Self::UNAVAILABLE_TEXT),
        }
    }
}

/// Every [`Metric`] paired with a [`MetricValue`]. Lookups are total.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialRecord {
    values: [MetricValue; Metric::COUNT],
}

impl Default for FinancialRecord {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl FinancialRecord {
    /// A record with every field unavailable.
    pub fn unavailable() -> Self {
        Self {
            values: [MetricValue::Unavailable; Metric::COUNT],
        }
    }

    /// Reads every metric from a flattened provider record. Fields that are
    /// missing, null, or not finite numbers become [`MetricValue::Unavailable`].
    pub fn from_provider(quote: &QuoteRecord) -> Self {
        let mut record = Self::unavailable();
        for metric in Metric::ALL {
            record.values[metric.index()] =
                MetricValue::from_number(quote.number(metric.provider_path()));
        }
        record
    }

    /// Builder-style setter.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, MetricValue::from_number(Some(value)));
        self
    }

    pub fn set(&mut self, metric: Metric, value: MetricValue) {
        self.values[metric.index()] = value;
    }

    pub fn get(&self, metric: Metric) -> MetricValue {
        self.values[metric.index()]
    }

    /// Iterates `(metric, value)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, MetricValue)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Metrics the provider did not report.
    pub fn unavailable_metrics(&self) -> Vec<Metric> {
        self.iter()
            .filter(|(_, v)| !v.is_available())
            .map(|(m, _)| m)
            .collect()
    }
}

impl Serialize for FinancialRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Metric::COUNT))?;
        for (metric, value) in self.iter() {
            map.serialize_entry(metric.label(), &value)?;
        }
        map.end()
    }
}
