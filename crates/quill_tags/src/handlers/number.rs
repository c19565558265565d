//! Arithmetic and comparison steps for integers and decimals.
//!
//! Integer operands stay integral; mixing in a decimal produces a decimal.

use quill_foundation::{Error, Result, Type, Value};

use crate::registry::TagRegistry;

#[derive(Clone, Copy)]
enum Op {
    Add,
    Subtract,
    Multiply,
}

#[allow(clippy::cast_precision_loss)]
fn arithmetic(op: Op, a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => {
            let result = match op {
                Op::Add => x.checked_add(*y),
                Op::Subtract => x.checked_sub(*y),
                Op::Multiply => x.checked_mul(*y),
            };
            result
                .map(Value::Int)
                .ok_or_else(|| Error::failed("integer overflow"))
        }
        _ => {
            let x = a.to_float()?;
            let y = b.to_float()?;
            Ok(Value::Float(match op {
                Op::Add => x + y,
                Op::Subtract => x - y,
                Op::Multiply => x * y,
            }))
        }
    }
}

/// Divides, keeping the result integral only when it divides exactly.
fn divide(a: &Value, b: &Value) -> Result<Value> {
    if b.to_float()? == 0.0 {
        return Err(Error::failed("division by zero"));
    }
    match (a, b) {
        (Value::Int(x), Value::Int(y)) if x.checked_rem(*y) == Some(0) => x
            .checked_div(*y)
            .map(Value::Int)
            .ok_or_else(|| Error::failed("integer overflow")),
        _ => Ok(Value::Float(a.to_float()? / b.to_float()?)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: &Value) -> Result<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        other => {
            let rounded = other.to_float()?.round();
            if rounded.is_finite() && rounded.abs() < 9.0e18 {
                Ok(Value::Int(rounded as i64))
            } else {
                Err(Error::failed("number too large to round"))
            }
        }
    }
}

fn abs(value: &Value) -> Result<Value> {
    match value {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| Error::failed("integer overflow")),
        Value::Float(n) => Ok(Value::Float(n.abs())),
        other => Err(Error::type_mismatch(Type::Float, other.value_type())),
    }
}

pub(crate) fn register(tags: &mut TagRegistry) {
    tags.register_step_for_numbers("add", |call| {
        arithmetic(Op::Add, call.value, &call.param_numeric()?)
    });
    tags.register_step_for_numbers("subtract", |call| {
        arithmetic(Op::Subtract, call.value, &call.param_numeric()?)
    });
    tags.register_step_for_numbers("multiply", |call| {
        arithmetic(Op::Multiply, call.value, &call.param_numeric()?)
    });
    tags.register_step_for_numbers("divide", |call| divide(call.value, &call.param_numeric()?));
    tags.register_step_for_numbers("round", |call| round(call.value));
    tags.register_step_for_numbers("abs", |call| abs(call.value));
    tags.register_step_for_numbers("is_more_than", |call| {
        Ok(Value::Bool(call.value.to_float()? > call.param_float()?))
    });
    tags.register_step_for_numbers("is_less_than", |call| {
        Ok(Value::Bool(call.value.to_float()? < call.param_float()?))
    });
}
