//! Structured record values.
//!
//! A record is a tree of maps, sequences, and scalar leaves. Parsing writes
//! field values into a fresh tree at each field's property path; stringifying
//! reads them back out and renders them with [`Value::to_text`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::PropertyPath;

/// A node of a structured record.
///
/// Serializes to the obvious JSON shape. `Number(NaN)` is the sentinel that
/// lenient numeric casts produce for unparsable text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// An empty map, the root of every parsed record.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the not-a-number sentinel.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_path(&self, path: &PropertyPath) -> Option<&Value> {
        path.get(self)
    }

    pub fn set_path(&mut self, path: &PropertyPath, value: Value) {
        path.set(self, value);
    }

    /// Canonical textual form used when laying a value into a column.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Integer(n) => Cow::Owned(n.to_string()),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::String(s) => Cow::Borrowed(s),
            Value::Sequence(_) | Value::Map(_) => {
                Cow::Owned(serde_json::to_string(self).unwrap_or_default())
            }
        }
    }
}

/// Shortest decimal form; whole numbers print without a fraction.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Bool(true).to_text(), "true");
        assert_eq!(Value::Bool(false).to_text(), "false");
        assert_eq!(Value::Integer(-42).to_text(), "-42");
        assert_eq!(Value::from("Alice").to_text(), "Alice");
    }

    #[test]
    fn test_number_text() {
        assert_eq!(Value::Number(1.0).to_text(), "1");
        assert_eq!(Value::Number(2.5).to_text(), "2.5");
        assert_eq!(Value::Number(-0.125).to_text(), "-0.125");
        assert_eq!(Value::Number(f64::NAN).to_text(), "NaN");
        assert_eq!(Value::Number(f64::INFINITY).to_text(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_text(), "-Infinity");
    }

    #[test]
    fn test_container_text_is_json() {
        let seq = Value::Sequence(vec![Value::Integer(1), Value::from("a")]);
        assert_eq!(seq.to_text(), r#"[1,"a"]"#);
    }

    #[test]
    fn test_nan_sentinel() {
        assert!(Value::Number(f64::NAN).is_nan());
        assert!(!Value::Number(0.0).is_nan());
        assert!(!Value::Integer(0).is_nan());
    }

    #[test]
    fn test_accessors() {
        assert!(Value::default().is_null());
        assert!(!Value::from("").is_null());
        assert_eq!(Value::from("Ada").as_str(), Some("Ada"));
        assert_eq!(Value::Integer(1).as_str(), None);
    }

    #[test]
    fn test_container_conversions() {
        let seq = Value::from(vec![Value::from(1i64), Value::from(true)]);
        assert_eq!(seq, Value::Sequence(vec![Value::Integer(1), Value::Bool(true)]));

        let mut entries = BTreeMap::new();
        entries.insert("rate".to_string(), Value::from(0.5));
        entries.insert("tags".to_string(), seq);
        let record = Value::from(entries);
        assert_eq!(record.to_text(), r#"{"rate":0.5,"tags":[1,true]}"#);

        let tags = "tags[1]".parse().unwrap();
        assert_eq!(record.get_path(&tags), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_json_shape() {
        let v: Value = serde_json::from_str(r#"{"id":42,"rate":1.5,"ok":true,"tags":["x",null]}"#)
            .unwrap();
        let Value::Map(m) = &v else {
            panic!("expected map, got {v:?}");
        };
        assert_eq!(m["id"], Value::Integer(42));
        assert_eq!(m["rate"], Value::Number(1.5));
        assert_eq!(m["ok"], Value::Bool(true));
        assert_eq!(
            m["tags"],
            Value::Sequence(vec![Value::from("x"), Value::Null])
        );
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"id":42,"ok":true,"rate":1.5,"tags":["x",null]}"#
        );
    }
}
