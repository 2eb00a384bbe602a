//! Arithmetic and condition operators.
//!
//! Integers are `i64` and every arithmetic operation is checked: overflow,
//! division by zero, and modulo by zero are errors, never wrapped results.

use elang_ir::{ArithOp, CondOp, Heap};

use crate::errors::{dangling_view, integer_overflow};
use crate::{EvalError, EvalErrorKind, Value};

#[cfg(test)]
mod tests;

/// `lhs op rhs` for `+ - * / %`.
pub(crate) fn evaluate_arithmetic(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let (Value::Int(a), Value::Int(b)) = (lhs, rhs) else {
        let found = if let Value::Int(_) = lhs { rhs.ty() } else { lhs.ty() };
        return Err(EvalErrorKind::NonIntegerOperand { found }.into());
    };

    let result = match op {
        ArithOp::Add => a.checked_add(b),
        ArithOp::Sub => a.checked_sub(b),
        ArithOp::Mul => a.checked_mul(b),
        ArithOp::Div => {
            if b == 0 {
                return Err(EvalErrorKind::DivisionByZero.into());
            }
            a.checked_div(b)
        }
        ArithOp::Mod => {
            if b == 0 {
                return Err(EvalErrorKind::ModuloByZero.into());
            }
            a.checked_rem(b)
        }
    };
    result.map(Value::Int).ok_or_else(|| integer_overflow(op.name()))
}

/// Unary `-`.
pub(crate) fn evaluate_negation(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        other => Err(EvalErrorKind::NonIntegerOperand { found: other.ty() }.into()),
    }
}

/// `and`, `or`, `==`, `<`, `>`. Both operands are already evaluated.
pub(crate) fn evaluate_condition(
    op: CondOp,
    lhs: Value,
    rhs: Value,
    heap: &Heap,
) -> Result<bool, EvalError> {
    match (op, lhs, rhs) {
        (CondOp::And, Value::Bool(a), Value::Bool(b)) => Ok(a && b),
        (CondOp::Or, Value::Bool(a), Value::Bool(b)) => Ok(a || b),
        (CondOp::Lt, Value::Int(a), Value::Int(b)) => Ok(a < b),
        (CondOp::Gt, Value::Int(a), Value::Int(b)) => Ok(a > b),
        (CondOp::Eq, lhs, rhs) => values_equal(lhs, rhs, heap),
        (op, _, _) => Err(EvalErrorKind::InvalidComparison { op }.into()),
    }
}

fn values_equal(lhs: Value, rhs: Value, heap: &Heap) -> Result<bool, EvalError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => heap.views_equal(a, b).ok_or_else(dangling_view),
        (lhs, rhs) => Err(EvalErrorKind::ComparisonTypeMismatch {
            lhs: lhs.ty(),
            rhs: rhs.ty(),
        }
        .into()),
    }
}
