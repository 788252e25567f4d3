//! Field data types and the lenient casts that turn column text into values.
//!
//! Numeric casts read the longest numeric prefix after leading whitespace,
//! the way legacy record readers do, and yield the not-a-number sentinel
//! instead of an error when no digits are present.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Cast applied to a trimmed column slice.
pub type CastFn = fn(&str) -> Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DataType {
    #[default]
    String,
    Number,
    Integer,
    Float,
    Boolean,
}

impl DataType {
    /// The cast for this type, looked up once per field at schema build time.
    pub fn cast_fn(self) -> CastFn {
        match self {
            DataType::String => cast_string,
            DataType::Number | DataType::Float => cast_number,
            DataType::Integer => cast_integer,
            DataType::Boolean => cast_boolean,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
        }
    }
}

pub fn cast_string(text: &str) -> Value {
    Value::String(text.to_string())
}

pub fn cast_number(text: &str) -> Value {
    Value::Number(float_prefix(text).unwrap_or(f64::NAN))
}

/// Base-10 integer prefix. Overflowing literals keep their float value.
pub fn cast_integer(text: &str) -> Value {
    let s = text.trim_start();
    let sign = sign_len(s);
    let digits = count_digits(s.as_bytes(), sign);
    if digits == 0 {
        return Value::Number(f64::NAN);
    }
    let literal = &s[..sign + digits];
    match literal.parse::<i64>() {
        Ok(n) => Value::Integer(n),
        Err(_) => Value::Number(literal.parse().unwrap_or(f64::NAN)),
    }
}

/// Any non-empty text is true.
pub fn cast_boolean(text: &str) -> Value {
    Value::Bool(!text.is_empty())
}

fn float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let sign = sign_len(s);

    if s[sign..].starts_with("Infinity") {
        let inf = if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(inf);
    }

    let mut digits = count_digits(bytes, sign);
    let mut end = sign + digits;
    if bytes.get(end) == Some(&b'.') {
        let frac = count_digits(bytes, end + 1);
        digits += frac;
        end += 1 + frac;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&s[end + 1..]);
        let exp_digits = count_digits(bytes, end + 1 + exp_sign);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "number" => Ok(DataType::Number),
            "integer" | "int" => Ok(DataType::Integer),
            "float" => Ok(DataType::Float),
            "boolean" | "bool" => Ok(DataType::Boolean),
            other => Err(format!("unknown data type '{other}'")),
        }
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
