use super::*;
use elang_ir::ValueType;
use pretty_assertions::assert_eq;

fn arith(op: ArithOp, a: i64, b: i64) -> Result<Value, EvalErrorKind> {
    evaluate_arithmetic(op, Value::Int(a), Value::Int(b)).map_err(|err| err.kind)
}

#[test]
fn test_integer_arithmetic() {
    assert_eq!(arith(ArithOp::Add, 2, 3), Ok(Value::Int(5)));
    assert_eq!(arith(ArithOp::Sub, 2, 3), Ok(Value::Int(-1)));
    assert_eq!(arith(ArithOp::Mul, -4, 3), Ok(Value::Int(-12)));
    assert_eq!(arith(ArithOp::Div, 7, 2), Ok(Value::Int(3)));
    assert_eq!(arith(ArithOp::Div, -7, 2), Ok(Value::Int(-3)));
    assert_eq!(arith(ArithOp::Mod, -7, 3), Ok(Value::Int(-1)));
}

#[test]
fn test_division_and_modulo_by_zero() {
    assert_eq!(arith(ArithOp::Div, 1, 0), Err(EvalErrorKind::DivisionByZero));
    assert_eq!(arith(ArithOp::Mod, 1, 0), Err(EvalErrorKind::ModuloByZero));
}

#[test]
fn test_overflow_is_an_error() {
    assert_eq!(
        arith(ArithOp::Add, i64::MAX, 1),
        Err(EvalErrorKind::IntegerOverflow {
            operation: "addition"
        })
    );
    assert_eq!(
        arith(ArithOp::Div, i64::MIN, -1),
        Err(EvalErrorKind::IntegerOverflow {
            operation: "division"
        })
    );
    assert_eq!(
        evaluate_negation(Value::Int(i64::MIN)).map_err(|err| err.kind),
        Err(EvalErrorKind::IntegerOverflow {
            operation: "negation"
        })
    );
}

#[test]
fn test_non_integer_operands() {
    let err = evaluate_arithmetic(ArithOp::Add, Value::Int(1), Value::Bool(true));
    assert_eq!(
        err.map_err(|err| err.kind),
        Err(EvalErrorKind::NonIntegerOperand {
            found: ValueType::Bool
        })
    );
    assert!(evaluate_negation(Value::Bool(false)).is_err());
}

#[test]
fn test_conditions() {
    let heap = Heap::new();
    let cond = |op, a, b| evaluate_condition(op, a, b, &heap).map_err(|err| err.kind);

    assert_eq!(cond(CondOp::And, Value::Bool(true), Value::Bool(false)), Ok(false));
    assert_eq!(cond(CondOp::Or, Value::Bool(true), Value::Bool(false)), Ok(true));
    assert_eq!(cond(CondOp::Lt, Value::Int(1), Value::Int(2)), Ok(true));
    assert_eq!(cond(CondOp::Gt, Value::Int(1), Value::Int(2)), Ok(false));
    assert_eq!(cond(CondOp::Eq, Value::Bool(true), Value::Bool(true)), Ok(true));

    assert_eq!(
        cond(CondOp::And, Value::Int(1), Value::Bool(true)),
        Err(EvalErrorKind::InvalidComparison { op: CondOp::And })
    );
    assert_eq!(
        cond(CondOp::Lt, Value::Bool(true), Value::Bool(false)),
        Err(EvalErrorKind::InvalidComparison { op: CondOp::Lt })
    );
    assert_eq!(
        cond(CondOp::Eq, Value::Int(1), Value::Bool(true)),
        Err(EvalErrorKind::ComparisonTypeMismatch {
            lhs: ValueType::Int,
            rhs: ValueType::Bool
        })
    );
}

#[test]
fn test_string_equality_is_by_content() {
    let mut heap = Heap::new();
    let first = heap.create(16);
    let second = heap.create(16);
    let (Some(a), Some(b), Some(c)) = (
        heap.alloc_str(first, "same"),
        heap.alloc_str(second, "same"),
        heap.alloc_str(second, "diff"),
    ) else {
        panic!("arenas should be live");
    };

    assert_eq!(evaluate_condition(CondOp::Eq, Value::Str(a), Value::Str(b), &heap), Ok(true));
    assert_eq!(evaluate_condition(CondOp::Eq, Value::Str(a), Value::Str(c), &heap), Ok(false));

    heap.release(first);
    assert_eq!(
        evaluate_condition(CondOp::Eq, Value::Str(a), Value::Str(b), &heap).map_err(|err| err.kind),
        Err(EvalErrorKind::DanglingView)
    );
}
