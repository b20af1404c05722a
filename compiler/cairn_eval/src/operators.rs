//! Binary and unary operators on runtime values.
//!
//! `&&` and `||` short-circuit and are evaluated by the interpreter; every
//! other operator receives both operands already evaluated. Integer
//! arithmetic is checked.

use cairn_ir::BinaryOp;

use crate::errors::{integer_overflow, invalid_binary_op, type_mismatch, EvalResult};
use crate::value::Value;

pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(op, a, b),
        (Value::Str(a), Value::Str(b)) => eval_str_binary(op, a, b),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(op, a, b),
        (Value::Unit, Value::Unit) => match op {
            BinaryOp::Eq => Ok(Value::Bool(true)),
            BinaryOp::NotEq => Ok(Value::Bool(false)),
            _ => Err(invalid_binary_op(op, "()", "()")),
        },
        (left, right) => Err(invalid_binary_op(op, &left.type_name(), &right.type_name())),
    }
}

fn eval_int_binary(op: BinaryOp, a: i32, b: i32) -> EvalResult {
    let checked = |result: Option<i32>, operation: &str| {
        result
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(operation))
    };
    match op {
        BinaryOp::Add => checked(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked(a.checked_mul(b), "multiplication"),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op(op, "i32", "i32")),
    }
}

fn eval_str_binary(op: BinaryOp, mut a: String, b: String) -> EvalResult {
    match op {
        BinaryOp::Add => {
            a.push_str(&b);
            Ok(Value::Str(a))
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op(op, "String", "String")),
    }
}

fn eval_bool_binary(op: BinaryOp, a: bool, b: bool) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        _ => Err(invalid_binary_op(op, "Boolean", "Boolean")),
    }
}

/// Unary minus.
pub fn negate(value: Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        other => Err(type_mismatch("i32", &other.type_name())),
    }
}
