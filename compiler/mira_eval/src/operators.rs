//! Binary operator implementations.
//!
//! Every pair of operand kinds is matched explicitly. `Int op Int` stays
//! integral with checked arithmetic; any `Num` operand promotes the
//! operation to real arithmetic.

use mira_ir::BinaryOp;

use crate::errors::{division_by_zero, integer_overflow, EvalResult};
use crate::Value;

/// Checked integer operation where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op))
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(a, b, op),
        (Value::Num(a), Value::Num(b)) => eval_num_binary(a, b, op),
        (Value::Int(_), Value::Num(b)) => eval_num_binary(left.as_f64(), b, op),
        (Value::Num(a), Value::Int(_)) => eval_num_binary(a, right.as_f64(), op),
    }
}

/// Binary operations on two ints. Division truncates toward zero.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), op)
            }
        }
        BinaryOp::Exp => int_pow(a, b),
    }
}

/// Integer exponentiation.
///
/// A negative exponent yields the truncated real power: only bases `1` and
/// `-1` keep a non-zero result, and base `0` divides by zero.
fn int_pow(base: i64, exp: i64) -> EvalResult {
    if exp < 0 {
        return match base {
            0 => Err(division_by_zero()),
            1 => Ok(Value::Int(1)),
            -1 => Ok(Value::Int(if exp % 2 == 0 { 1 } else { -1 })),
            _ => Ok(Value::Int(0)),
        };
    }
    match u32::try_from(exp) {
        Ok(exp) => checked_arith(base.checked_pow(exp), BinaryOp::Exp),
        // Exponents past u32::MAX only stay in range for these bases.
        Err(_) => match base {
            0 | 1 => Ok(Value::Int(base)),
            -1 => Ok(Value::Int(if exp % 2 == 0 { 1 } else { -1 })),
            _ => Err(integer_overflow(BinaryOp::Exp)),
        },
    }
}

/// Binary operations on reals. A zero divisor is an error, not an infinity.
fn eval_num_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Num(a + b)),
        BinaryOp::Sub => Ok(Value::Num(a - b)),
        BinaryOp::Mul => Ok(Value::Num(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Num(a / b))
            }
        }
        BinaryOp::Exp => Ok(Value::Num(a.powf(b))),
    }
}
