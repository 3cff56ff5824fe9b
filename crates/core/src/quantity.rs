//! Loosely-typed counts and the numeric-coercion policy.

use serde::{Deserialize, Serialize};

/// A count as it arrives from callers or rests in older persisted documents:
/// a JSON number, a numeric string, or nothing at all.
///
/// Order quantities are stored in this form verbatim and coerced when stats
/// are computed; opening stock and stock-log amounts are coerced once at
/// write time. Either way [`RawQuantity::coerce`] is the single policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Int(i64),
    Float(f64),
    Text(String),
    /// JSON `null` (an absent field defaults here too).
    Missing,
}

impl RawQuantity {
    /// Coerce to whole units.
    ///
    /// Integers pass through, floats truncate toward zero, text must parse
    /// as a whole integer after trimming, everything else counts as 0.
    /// Never fails: malformed input must not block a write or a read.
    pub fn coerce(&self) -> i64 {
        match self {
            RawQuantity::Int(n) => *n,
            RawQuantity::Float(f) => *f as i64,
            RawQuantity::Text(s) => s.trim().parse().unwrap_or(0),
            RawQuantity::Missing => 0,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawQuantity::Missing)
    }
}

impl Default for RawQuantity {
    fn default() -> Self {
        RawQuantity::Missing
    }
}

impl From<i64> for RawQuantity {
    fn from(value: i64) -> Self {
        RawQuantity::Int(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_owned())
    }
}

impl From<String> for RawQuantity {
    fn from(value: String) -> Self {
        RawQuantity::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_pass_through() {
        assert_eq!(RawQuantity::Int(50).coerce(), 50);
        assert_eq!(RawQuantity::Int(-3).coerce(), -3);
        assert_eq!(RawQuantity::Int(0).coerce(), 0);
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(RawQuantity::Float(2.5).coerce(), 2);
        assert_eq!(RawQuantity::Float(-2.5).coerce(), -2);
        assert_eq!(RawQuantity::Float(f64::NAN).coerce(), 0);
    }

    #[test]
    fn text_parses_whole_integers_only() {
        assert_eq!(RawQuantity::from("50").coerce(), 50);
        assert_eq!(RawQuantity::from(" 7 ").coerce(), 7);
        assert_eq!(RawQuantity::from("-12").coerce(), -12);
        assert_eq!(RawQuantity::from("").coerce(), 0);
        assert_eq!(RawQuantity::from("abc").coerce(), 0);
        assert_eq!(RawQuantity::from("2.5").coerce(), 0);
        assert_eq!(RawQuantity::from("12 units").coerce(), 0);
    }

    #[test]
    fn missing_counts_as_zero() {
        assert_eq!(RawQuantity::Missing.coerce(), 0);
        assert!(RawQuantity::default().is_missing());
    }

    #[test]
    fn deserializes_every_legacy_shape() {
        let int: RawQuantity = serde_json::from_value(json!(100)).unwrap();
        assert_eq!(int, RawQuantity::Int(100));

        let float: RawQuantity = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(float, RawQuantity::Float(2.5));

        let text: RawQuantity = serde_json::from_value(json!("100")).unwrap();
        assert_eq!(text, RawQuantity::Text("100".to_owned()));

        let null: RawQuantity = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_missing());
    }

    #[test]
    fn missing_serializes_as_null() {
        assert_eq!(serde_json::to_value(RawQuantity::Missing).unwrap(), json!(null));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: coercion is exact for any integer, whether it arrives
        /// as a number or as its decimal spelling.
        #[test]
        fn integer_inputs_coerce_exactly(n in any::<i64>()) {
            prop_assert_eq!(RawQuantity::Int(n).coerce(), n);
            prop_assert_eq!(RawQuantity::Text(n.to_string()).coerce(), n);
        }

        /// Property: non-numeric text always coerces to 0.
        #[test]
        fn alphabetic_text_coerces_to_zero(s in "[a-zA-Z]{1,12}") {
            prop_assert_eq!(RawQuantity::Text(s).coerce(), 0);
        }
    }
}
