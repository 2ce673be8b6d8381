//! Flattened view of the modules returned for one ticker.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::query::Module;

/// A flat key-value record merged from the quote-summary modules.
///
/// Yahoo wraps most numbers as `{"raw": 12.5, "fmt": "12.50"}`; those are
/// unwrapped to the raw value, and an empty object `{}` becomes `null`.
/// When two modules report the same key the first one in [`Module::ALL`]
/// order wins.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct QuoteRecord {
    fields: Map<String, Value>,
}

impl QuoteRecord {
    /// Builds a record from a single `result` entry of the response.
    pub fn from_modules(modules: &Map<String, Value>) -> Self {
        let mut fields = Map::new();
        let mut merge = |name: &str| {
            let Some(Value::Object(module)) = modules.get(name) else {
                return;
            };
            for (key, value) in module {
                if !fields.contains_key(key) {
                    fields.insert(key.clone(), unwrap_raw(value));
                }
            }
        };

        for module in Module::ALL {
            merge(module.as_str());
        }
        for name in modules.keys() {
            if name.parse::<Module>().is_err() {
                merge(name);
            }
        }

        Self { fields }
    }

    /// Builds a record directly from already-flat fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.clone(), unwrap_raw(v)))
                .collect(),
        }
    }

    /// Raw value at a dotted path such as `["industryKeyStats", "peRatio"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Finite number at the path, or `None` when missing, null, or non-numeric.
    pub fn number(&self, path: &[&str]) -> Option<f64> {
        self.get_path(path)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn unwrap_raw(value: &Value) -> Value {
    match value {
        Value::Object(obj) if obj.is_empty() => Value::Null,
        Value::Object(obj) => match obj.get("raw") {
            Some(raw) => raw.clone(),
            None => Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), unwrap_raw(v)))
                    .collect(),
            ),
        },
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn modules(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn unwraps_raw_values() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "financialData": {"currentPrice": {"raw": 3500.5, "fmt": "3,500.50"}}
        })));
        assert_eq!(rec.number(&["currentPrice"]), Some(3500.5));
    }

    #[test]
    fn plain_numbers_pass_through() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "summaryDetail": {"beta": 0.62}
        })));
        assert_eq!(rec.number(&["beta"]), Some(0.62));
    }

    #[test]
    fn empty_object_is_null() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "financialData": {"freeCashflow": {}}
        })));
        assert_eq!(rec.get_path(&["freeCashflow"]), Some(&Value::Null));
        assert_eq!(rec.number(&["freeCashflow"]), None);
    }

    #[test]
    fn first_module_wins_on_duplicate_keys() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "price": {"marketCap": {"raw": 1.0}},
            "financialData": {"marketCap": {"raw": 2.0}}
        })));
        assert_eq!(rec.number(&["marketCap"]), Some(2.0));
    }

    #[test]
    fn unknown_modules_are_merged_last() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "assetProfile": {"beta": 9.0, "sector": "Technology"},
            "summaryDetail": {"beta": 1.1}
        })));
        assert_eq!(rec.number(&["beta"]), Some(1.1));
        assert_eq!(
            rec.get_path(&["sector"]).and_then(Value::as_str),
            Some("Technology")
        );
    }

    #[test]
    fn nested_path_lookup() {
        let rec = QuoteRecord::from_modules(&modules(json!({
            "defaultKeyStatistics": {"industryKeyStats": {"peRatio": {"raw": 28.4}}}
        })));
        assert_eq!(rec.number(&["industryKeyStats", "peRatio"]), Some(28.4));
        assert_eq!(rec.number(&["industryKeyStats", "pbRatio"]), None);
    }

    #[test]
    fn non_numeric_values_are_not_numbers() {
        let rec = QuoteRecord::from_fields(modules(json!({
            "trailingPE": "Infinity",
            "beta": null
        })));
        assert_eq!(rec.number(&["trailingPE"]), None);
        assert_eq!(rec.number(&["beta"]), None);
        assert_eq!(rec.number(&["missing"]), None);
    }

    #[test]
    fn empty_path_is_none() {
        let rec = QuoteRecord::default();
        assert!(rec.is_empty());
        assert_eq!(rec.get_path(&[]), None);
    }
}
