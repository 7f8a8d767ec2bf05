use crate::{
    error::CounterError,
    normalize::{Normalize, Normalized},
};
use std::{collections::HashMap, fmt};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A scalar value read from JSON, usable as a counter key.
///
/// Integers above `i64::MAX` keep their exact value in `UInt`. Floats compare
/// by value through [`OrderedFloat`], so all NaNs are one key and `-0.0` and
/// `0.0` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(OrderedFloat<f64>),
    Str(String),
}

/// Name of the shape of a JSON value, as reported in errors.
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            // JSON number formatting keeps the fractional part of whole floats
            Self::Float(x) => match Number::from_f64(x.0) {
                Some(number) => write!(f, "{}", number),
                None => write!(f, "{}", x),
            },
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Element {
    fn from(x: f64) -> Self {
        Self::Float(OrderedFloat(x))
    }
}

impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl TryFrom<&Value> for Element {
    type Error = CounterError;

    fn try_from(value: &Value) -> Result<Self, CounterError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => if let Some(i) = n.as_i64() {
                Ok(Self::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Self::UInt(u))
            } else {
                n.as_f64().map(Self::from).ok_or_else(|| {
                    CounterError::TypeMismatch(format!("number {} is not representable", n))
                })
            },
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(CounterError::TypeMismatch(format!(
                "value is not a sequence of scalar elements: found nested {}", shape_name(value)))),
        }
    }
}

impl Normalize<Element> for &Value {
    fn normalize(self) -> Result<Normalized<Element>, CounterError> {
        match self {
            Value::String(text) => text.as_str().normalize(),
            Value::Array(items) => items.iter()
                .map(Element::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Normalized::Elements),
            // JSON object keys are always text, so they count as string elements
            Value::Object(map) => map.iter()
                .map(|(key, value)| value.as_i64()
                    .map(|count| (Element::from(key.as_str()), count))
                    .ok_or_else(CounterError::map_element_not_int))
                .collect::<Result<HashMap<_, _>, _>>()
                .map(Normalized::Counts),
            other => Err(CounterError::UnsupportedInput(shape_name(other))),
        }
    }
}

impl Normalize<Element> for Value {
    fn normalize(self) -> Result<Normalized<Element>, CounterError> {
        (&self).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_become_elements() {
        assert_eq!(Element::try_from(&json!(null)).unwrap(), Element::Null);
        assert_eq!(Element::try_from(&json!(true)).unwrap(), Element::Bool(true));
        assert_eq!(Element::try_from(&json!(-7)).unwrap(), Element::Int(-7));
        assert_eq!(Element::try_from(&json!(2.5)).unwrap(), Element::from(2.5));
        assert_eq!(Element::try_from(&json!(u64::MAX)).unwrap(), Element::UInt(u64::MAX));
        assert_eq!(Element::try_from(&json!("x")).unwrap(), Element::from("x"));
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = Element::try_from(&json!([1])).unwrap_err();
        assert!(matches!(err, CounterError::TypeMismatch(_)));
        let err = json!([1, {"a": 1}]).normalize().unwrap_err();
        assert_eq!(err, CounterError::TypeMismatch(
            "value is not a sequence of scalar elements: found nested object".to_string()));
    }

    #[test]
    fn top_level_scalars_are_unsupported() {
        assert_eq!(json!(5).normalize().unwrap_err(), CounterError::UnsupportedInput("number"));
        assert_eq!(json!(false).normalize().unwrap_err(), CounterError::UnsupportedInput("bool"));
        assert_eq!(json!(null).normalize().unwrap_err(), CounterError::UnsupportedInput("null"));
    }

    #[test]
    fn object_values_must_be_integers() {
        for value in [json!({"a": "one"}), json!({"a": 1.5}), json!({"a": 1, "b": null})] {
            assert_eq!(value.normalize().unwrap_err(),
                CounterError::TypeMismatch("map element must be of type 'int'".to_string()));
        }
        match json!({"a": 1, "b": -2}).normalize().unwrap() {
            Normalized::Counts(counts) => {
                assert_eq!(counts, HashMap::from([(Element::from("a"), 1), (Element::from("b"), -2)]));
            }
            Normalized::Elements(_) => panic!("expected counts"),
        }
    }

    #[test]
    fn display_and_serialize() {
        let elements = [Element::Null, Element::from(false), Element::from(3), Element::from(0.5), Element::from("é")];
        let shown: Vec<String> = elements.iter().map(Element::to_string).collect();
        assert_eq!(shown, ["null", "false", "3", "0.5", "é"]);
        assert_eq!(Element::from(1.0).to_string(), "1.0");
        assert_eq!(Element::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Element::UInt(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(serde_json::to_value(&elements).unwrap(), json!([null, false, 3, 0.5, "é"]));
        let parsed: Vec<Element> = serde_json::from_value(json!([null, false, 3, 0.5, "é"])).unwrap();
        assert_eq!(parsed, elements);
    }

    #[test]
    fn large_integers_stay_distinct() {
        let normalized = json!([u64::MAX, u64::MAX - 1, u64::MAX]).normalize().unwrap();
        match normalized {
            Normalized::Elements(elements) => assert_eq!(elements, vec![
                Element::UInt(u64::MAX), Element::UInt(u64::MAX - 1), Element::UInt(u64::MAX)]),
            Normalized::Counts(_) => panic!("expected elements"),
        }
        let parsed: Element = serde_json::from_value(json!(u64::MAX)).unwrap();
        assert_eq!(parsed, Element::UInt(u64::MAX));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!(u64::MAX));
    }

    #[test]
    fn float_keys_compare_by_value() {
        assert_eq!(Element::from(0.0), Element::from(-0.0));
        assert_eq!(Element::from(f64::NAN), Element::from(f64::NAN));
        assert_ne!(Element::from(1.0), Element::from(1));
    }
}
