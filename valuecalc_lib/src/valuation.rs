//! Simplified intrinsic-value estimates computed from a [`FinancialRecord`].
//!
//! Each method is a one-line formula over one or two record fields. A method
//! whose inputs are unavailable, whose denominator is zero, or whose result
//! is not finite is skipped with a reason; the other methods still run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::metrics::{FinancialRecord, Metric};

/// Free cash flow multiple used by the DCF shortcut.
pub const DCF_MULTIPLIER: f64 = 10.0;
/// Assumed fair price/earnings ratio.
pub const FAIR_PE: f64 = 15.0;
/// Assumed discount rate for the dividend discount model.
pub const DISCOUNT_RATE: f64 = 0.07;

/// The fixed set of valuation methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodId {
    Dcf,
    PeComparison,
    Ddm,
    EvEbitda,
}

impl MethodId {
    pub const ALL: [MethodId; 4] = [
        MethodId::Dcf,
        MethodId::PeComparison,
        MethodId::Ddm,
        MethodId::EvEbitda,
    ];

    /// Section heading for this method.
    pub fn title(&self) -> &'static str {
        match self {
            MethodId::Dcf => "DCF Valuation",
            MethodId::PeComparison => "P/E Ratio Valuation",
            MethodId::Ddm => "Dividend Discount Model (DDM)",
            MethodId::EvEbitda => "EV/EBITDA Valuation",
        }
    }

    /// Label printed next to the computed value.
    pub fn result_label(&self) -> &'static str {
        match self {
            MethodId::Dcf => "Intrinsic Value per Share",
            MethodId::PeComparison => "Fair Value per Share (P/E Method)",
            MethodId::Ddm => "Intrinsic Value per Share (DDM)",
            MethodId::EvEbitda => "Fair Value based on EV/EBITDA",
        }
    }

    /// Name accepted on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            MethodId::Dcf => "dcf",
            MethodId::PeComparison => "pe",
            MethodId::Ddm => "ddm",
            MethodId::EvEbitda => "ev-ebitda",
        }
    }

    /// Record fields the formula reads. All must be available.
    pub fn required_metrics(&self) -> &'static [Metric] {
        match self {
            MethodId::Dcf => &[Metric::FreeCashFlow, Metric::SharesOutstanding],
            MethodId::PeComparison => &[Metric::Eps],
            MethodId::Ddm => &[Metric::DividendYield],
            MethodId::EvEbitda => &[Metric::EvToEbitda, Metric::NetIncome],
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for MethodId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "dcf" => Ok(MethodId::Dcf),
            "pe" | "pe-comparison" | "p/e" => Ok(MethodId::PeComparison),
            "ddm" => Ok(MethodId::Ddm),
            "ev-ebitda" | "ev/ebitda" | "evebitda" => Ok(MethodId::EvEbitda),
            _ => Err(format!(
                "unknown valuation method '{}'. Valid values: dcf, pe, ddm, ev-ebitda",
                s
            )),
        }
    }
}

/// Why a method produced no value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The caller did not ask for this method.
    NotSelected,
    /// These required fields were unavailable.
    MissingInput(Vec<Metric>),
    /// This field was zero and is used as a divisor.
    ZeroDenominator(Metric),
    /// The formula produced NaN or an infinity.
    NonFinite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSelected => f.write_str("not selected"),
            SkipReason::MissingInput(metrics) => {
                let names: Vec<&str> = metrics.iter().map(Metric::label).collect();
                write!(f, "missing input: {}", names.join(", "))
            }
            SkipReason::ZeroDenominator(metric) => write!(f, "{} is zero", metric),
            SkipReason::NonFinite => f.write_str("result is not a finite number"),
        }
    }
}

/// Result of one method.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Value rounded to two decimal places.
    Computed(f64),
    Skipped(SkipReason),
}

impl Outcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Computed(v) => Some(*v),
            Outcome::Skipped(_) => None,
        }
    }
}

/// Outcome for every method, selected or not.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuationResult {
    outcomes: BTreeMap<MethodId, Outcome>,
}

impl ValuationResult {
    pub fn get(&self, method: MethodId) -> &Outcome {
        // Every method is inserted by `valuate`.
        &self.outcomes[&method]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MethodId, &Outcome)> + '_ {
        self.outcomes.iter().map(|(m, o)| (*m, o))
    }

    /// Methods that produced a value, in enumeration order.
    pub fn computed(&self) -> impl Iterator<Item = (MethodId, f64)> + '_ {
        self.iter().filter_map(|(m, o)| o.value().map(|v| (m, v)))
    }
}

/// Applies each selected formula to the record.
///
/// Never fails: problems with individual methods are reported through
/// [`Outcome::Skipped`]. Pure; identical inputs give identical results.
pub fn valuate(record: &FinancialRecord, methods: &BTreeSet<MethodId>) -> ValuationResult {
    let outcomes = MethodId::ALL
        .into_iter()
        .map(|method| {
            let outcome = if methods.contains(&method) {
                evaluate(record, method)
            } else {
                Outcome::Skipped(SkipReason::NotSelected)
            };
            match &outcome {
                Outcome::Skipped(SkipReason::NotSelected) => {}
                Outcome::Skipped(reason) => tracing::debug!("{} not computed: {}", method, reason),
                Outcome::Computed(value) => tracing::debug!("{} = {:.2}", method, value),
            }
            (method, outcome)
        })
        .collect();
    ValuationResult { outcomes }
}

fn evaluate(record: &FinancialRecord, method: MethodId) -> Outcome {
    let missing: Vec<Metric> = method
        .required_metrics()
        .iter()
        .copied()
        .filter(|m| !record.get(*m).is_available())
        .collect();
    if !missing.is_empty() {
        return Outcome::Skipped(SkipReason::MissingInput(missing));
    }

    // All required metrics are present past this point.
    let field = |m: Metric| record.get(m).as_f64().unwrap_or_default();

    let raw = match method {
        MethodId::Dcf => {
            let shares = field(Metric::SharesOutstanding);
            if shares == 0.0 {
                return Outcome::Skipped(SkipReason::ZeroDenominator(Metric::SharesOutstanding));
            }
            field(Metric::FreeCashFlow) * DCF_MULTIPLIER / shares
        }
        MethodId::PeComparison => field(Metric::Eps) * FAIR_PE,
        MethodId::Ddm => field(Metric::DividendYield) * 100.0 / DISCOUNT_RATE,
        // Total-value figure, not per share: ratio times net income.
        MethodId::EvEbitda => field(Metric::EvToEbitda) * field(Metric::NetIncome),
    };

    let rounded = round_cents(raw);
    if rounded.is_finite() {
        Outcome::Computed(rounded)
    } else {
        Outcome::Skipped(SkipReason::NonFinite)
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
