//! Expression evaluation.
//!
//! Evaluation is pure: it reads globals and live world objects and never
//! caches a result, so a loop guard observes the current world each time it
//! is tested. A variant mismatch surfaces as a `TypeError` at the point the
//! operand is used.

use wormscript_ast::{BinOp, Expr, Kind, UnOp};

use crate::entity::{Entity, WormRef};
use crate::error::TypeError;
use crate::globals::Globals;
use crate::value::Value;

/// Evaluate an expression.
pub fn eval_expr(expr: &Expr, globals: &Globals, agent: &WormRef) -> Result<Value, TypeError> {
    match expr {
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Double(n) => Ok(Value::Double(*n)),
        Expr::Null => Ok(Value::Entity(None)),
        Expr::SelfWorm => Ok(Value::Entity(Some(Entity::Worm(agent.clone())))),

        Expr::Variable { name, kind } => {
            let value = globals
                .get(name)
                .cloned()
                .ok_or_else(|| TypeError::UndeclaredGlobal(name.clone()))?;
            if value.kind() != *kind {
                return Err(TypeError::mismatch(
                    format!("global '{}'", name),
                    *kind,
                    value.kind(),
                ));
            }
            Ok(value)
        }

        Expr::Binary { op, left, right } => {
            let left_val = eval_expr(left, globals, agent)?;
            let right_val = eval_expr(right, globals, agent)?;
            eval_binary(*op, &left_val, &right_val)
        }

        Expr::Unary { op, operand } => {
            let value = eval_expr(operand, globals, agent)?;
            eval_unary(*op, &value)
        }

        Expr::Query { property, entity } => {
            let value = eval_expr(entity, globals, agent)?;
            let entity = expect_entity(&value, "property query")?
                .ok_or(TypeError::NullEntity { property: *property })?;
            Ok(Value::Double(entity.query(*property)?))
        }

        Expr::IsWorm(inner) => {
            let value = eval_expr(inner, globals, agent)?;
            let is_worm = matches!(expect_entity(&value, "isworm")?, Some(Entity::Worm(_)));
            Ok(Value::Bool(is_worm))
        }

        Expr::IsFood(inner) => {
            let value = eval_expr(inner, globals, agent)?;
            let is_food = matches!(expect_entity(&value, "isfood")?, Some(Entity::Food(_)));
            Ok(Value::Bool(is_food))
        }

        Expr::SameTeam(inner) => {
            let value = eval_expr(inner, globals, agent)?;
            let same = match expect_entity(&value, "sameteam")? {
                Some(Entity::Worm(other)) => match (agent.team(), other.team()) {
                    (Some(mine), Some(theirs)) => mine == theirs,
                    _ => false,
                },
                _ => false,
            };
            Ok(Value::Bool(same))
        }
    }
}

/// Evaluate an expression that must produce a Bool.
pub fn eval_bool(
    expr: &Expr,
    globals: &Globals,
    agent: &WormRef,
    context: &str,
) -> Result<bool, TypeError> {
    match eval_expr(expr, globals, agent)? {
        Value::Bool(b) => Ok(b),
        other => Err(TypeError::mismatch(context, Kind::Bool, other.kind())),
    }
}

/// Evaluate an expression that must produce a Double.
pub fn eval_double(
    expr: &Expr,
    globals: &Globals,
    agent: &WormRef,
    context: &str,
) -> Result<f64, TypeError> {
    match eval_expr(expr, globals, agent)? {
        Value::Double(n) => Ok(n),
        other => Err(TypeError::mismatch(context, Kind::Double, other.kind())),
    }
}

/// Evaluate a binary operation on already evaluated operands.
fn eval_binary(op: BinOp, left: &Value, right: &Value) -> Result<Value, TypeError> {
    let result = match op {
        // IEEE-754 arithmetic: overflow saturates to an infinity and a zero
        // divisor gives an infinity or NaN instead of an error
        BinOp::Add => num_op(op, left, right, |a, b| a + b)?,
        BinOp::Sub => num_op(op, left, right, |a, b| a - b)?,
        BinOp::Mul => num_op(op, left, right, |a, b| a * b)?,
        BinOp::Div => num_op(op, left, right, |a, b| a / b)?,
        BinOp::Less => compare(op, left, right, |a, b| a < b)?,
        BinOp::LessEq => compare(op, left, right, |a, b| a <= b)?,
        BinOp::Greater => compare(op, left, right, |a, b| a > b)?,
        BinOp::GreaterEq => compare(op, left, right, |a, b| a >= b)?,
        BinOp::Equal => Value::Bool(left == right),
        BinOp::NotEqual => Value::Bool(left != right),
        BinOp::And => Value::Bool(bool_operand(op, left)? && bool_operand(op, right)?),
        BinOp::Or => Value::Bool(bool_operand(op, left)? || bool_operand(op, right)?),
    };
    Ok(result)
}

/// Numeric binary operation helper.
fn num_op(
    op: BinOp,
    left: &Value,
    right: &Value,
    f: fn(f64, f64) -> f64,
) -> Result<Value, TypeError> {
    Ok(Value::Double(f(double_operand(op, left)?, double_operand(op, right)?)))
}

fn compare(
    op: BinOp,
    left: &Value,
    right: &Value,
    pred: fn(f64, f64) -> bool,
) -> Result<Value, TypeError> {
    Ok(Value::Bool(pred(double_operand(op, left)?, double_operand(op, right)?)))
}

fn double_operand(op: BinOp, value: &Value) -> Result<f64, TypeError> {
    match value {
        Value::Double(n) => Ok(*n),
        other => Err(TypeError::mismatch(
            format!("operand of '{}'", op.symbol()),
            Kind::Double,
            other.kind(),
        )),
    }
}

fn bool_operand(op: BinOp, value: &Value) -> Result<bool, TypeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(TypeError::mismatch(
            format!("operand of '{}'", op.symbol()),
            Kind::Bool,
            other.kind(),
        )),
    }
}

/// Evaluate a unary operation.
fn eval_unary(op: UnOp, value: &Value) -> Result<Value, TypeError> {
    let context = || format!("operand of '{}'", op.name());
    match (op, value) {
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnOp::Neg, Value::Double(n)) => Ok(Value::Double(-n)),
        (UnOp::Sqrt, Value::Double(n)) => Ok(Value::Double(n.sqrt())),
        (UnOp::Sin, Value::Double(n)) => Ok(Value::Double(n.sin())),
        (UnOp::Cos, Value::Double(n)) => Ok(Value::Double(n.cos())),
        (UnOp::Not, other) => Err(TypeError::mismatch(context(), Kind::Bool, other.kind())),
        (_, other) => Err(TypeError::mismatch(context(), Kind::Double, other.kind())),
    }
}

fn expect_entity<'v>(value: &'v Value, context: &str) -> Result<Option<&'v Entity>, TypeError> {
    match value {
        Value::Entity(entity) => Ok(entity.as_ref()),
        other => Err(TypeError::mismatch(context, Kind::Entity, other.kind())),
    }
}
