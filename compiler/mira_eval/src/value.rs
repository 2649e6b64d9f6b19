//! Runtime values.

use std::fmt;

use mira_ir::BinaryOp;

use crate::errors::{incompatible_value, invalid_literal, EvalError};

/// The kind of a [`Value`], named in source by a type name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Int,
    Num,
}

impl ValueKind {
    /// Resolve a type name as written in a definition.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(ValueKind::Int),
            "num" => Some(ValueKind::Num),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Num => "num",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value. The variant never changes; conversions build a new value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Num(f64),
}

/// 2^63: the first `f64` past the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl Value {
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Num(_) => ValueKind::Num,
        }
    }

    /// Real-number view of the value.
    #[inline]
    #[expect(clippy::cast_precision_loss, reason = "int to num widening is lossy by definition")]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(n) => n as f64,
            Value::Num(n) => n,
        }
    }

    /// Construct a value of `kind` from this one.
    ///
    /// Int to num widens. Num to int truncates toward zero and fails for
    /// NaN, infinities and anything outside the i64 range.
    pub fn coerce_to(self, kind: ValueKind) -> Result<Value, EvalError> {
        match (self, kind) {
            (Value::Int(_), ValueKind::Int) | (Value::Num(_), ValueKind::Num) => Ok(self),
            (Value::Int(_), ValueKind::Num) => Ok(Value::Num(self.as_f64())),
            (Value::Num(n), ValueKind::Int) => truncate(n).ok_or_else(|| incompatible_value(kind, self)),
        }
    }

    /// Parse literal source text (sign included) as a value of `kind`.
    pub fn parse_literal(kind: ValueKind, text: &str) -> Result<Value, EvalError> {
        match kind {
            ValueKind::Int => text.parse::<i64>().map(Value::Int).ok(),
            ValueKind::Num => text.parse::<f64>().map(Value::Num).ok(),
        }
        .ok_or_else(|| invalid_literal(kind, text))
    }

    /// Apply `op` with `rhs` on the right.
    pub fn binary(self, op: BinaryOp, rhs: Value) -> Result<Value, EvalError> {
        crate::operators::evaluate_binary(self, rhs, op)
    }
}

/// Truncate toward zero into an `Int`, if representable.
#[expect(clippy::cast_possible_truncation, reason = "range checked above the cast")]
pub(crate) fn truncate(n: f64) -> Option<Value> {
    let t = n.trunc();
    (t.is_finite() && (-I64_LIMIT..I64_LIMIT).contains(&t)).then(|| Value::Int(t as i64))
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

/// `15` for ints. Nums always show they are real: `15.0`, `0.5`, and
/// exponent form (`1e16`, `2.5e-9`) outside `1e-5..1e16`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Num(n) if !n.is_finite() || n == 0.0 => write!(f, "{n:?}"),
            Value::Num(n) if !(1e-5..1e16).contains(&n.abs()) => write!(f, "{n:e}"),
            Value::Num(n) if n.fract() == 0.0 => write!(f, "{n:.1}"),
            Value::Num(n) => write!(f, "{n}"),
        }
    }
}
