use std::cmp::Ordering;
use std::fmt;

use super::condition::CompareOp;

/// A scalar element value held in a dataset.
///
/// Record formats in this domain carry most elements as text; the numeric
/// and boolean kinds exist so conditions can compare ages, weights, and
/// flags without re-parsing strings on every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Free text, the dominant element representation.
    Str(String),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Decimal(f64),
    /// A flag.
    Bool(bool),
}

impl Value {
    /// The emptied form of a dataset element. A zero-length element reads
    /// back as the empty string regardless of its prior representation.
    #[must_use]
    pub fn empty() -> Value {
        Value::Str(String::new())
    }

    /// Whether this is the emptied form.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    /// Compare this value to another under the given operator.
    ///
    /// Equality is defined within a kind, ordering for strings and numbers;
    /// the two numeric kinds also compare across each other. Returns `None`
    /// when the pair supports neither, e.g. a string against an integer, or
    /// an ordering operator applied to flags.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Value) -> Option<bool> {
        match op {
            CompareOp::Eq => self.eq_value(other),
            CompareOp::Neq => self.eq_value(other).map(|eq| !eq),
            CompareOp::Gt => self.ord_value(other).map(|o| o == Ordering::Greater),
            CompareOp::Gte => self.ord_value(other).map(|o| o != Ordering::Less),
            CompareOp::Lt => self.ord_value(other).map(|o| o == Ordering::Less),
            CompareOp::Lte => self.ord_value(other).map(|o| o != Ordering::Greater),
        }
    }

    fn eq_value(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a == b),
            (Value::Bool(a), Value::Bool(b)) => Some(a == b),
            (Value::Int(a), Value::Int(b)) => Some(a == b),
            // Cross-kind numeric equality; NaN is equal to nothing
            _ => Some(self.as_decimal()? == other.as_decimal()?),
        }
    }

    fn ord_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            // Same-kind integers order exactly, without a float round trip
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            _ => self.as_decimal()?.partial_cmp(&other.as_decimal()?),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Decimal(v) => Some(*v),
            Value::Str(_) | Value::Bool(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// Conversion from a JSON scalar, used when reading configuration
/// parameters. Null, arrays and objects are rejected: elements hold scalars
/// only.
impl TryFrom<&serde_json::Value> for Value {
    type Error = ();

    fn try_from(v: &serde_json::Value) -> Result<Self, ()> {
        match v {
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Decimal))
                .ok_or(()),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(v) => f.write_str(v),
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}
