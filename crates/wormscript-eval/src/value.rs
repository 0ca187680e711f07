//! Runtime values for the script interpreter.

use std::fmt;

use serde_json::Value as JsonValue;
use wormscript_ast::Kind;

use crate::entity::Entity;
use crate::error::TypeError;

/// A runtime value.
///
/// Every value carries exactly one of the three script variants. `Entity(None)`
/// is the absent entity.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Double(f64),
    Entity(Option<Entity>),
}

impl Value {
    /// The value a freshly declared global of `kind` starts with.
    pub fn default_for(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Value::Bool(false),
            Kind::Double => Value::Double(0.0),
            Kind::Entity => Value::Entity(None),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Double(_) => Kind::Double,
            Value::Entity(_) => Kind::Entity,
        }
    }

    pub fn as_bool(&self) -> Result<bool, TypeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(TypeError::mismatch("bool value", Kind::Bool, other.kind())),
        }
    }

    pub fn as_double(&self) -> Result<f64, TypeError> {
        match self {
            Value::Double(n) => Ok(*n),
            other => Err(TypeError::mismatch("double value", Kind::Double, other.kind())),
        }
    }

    pub fn as_entity(&self) -> Result<Option<&Entity>, TypeError> {
        match self {
            Value::Entity(e) => Ok(e.as_ref()),
            other => Err(TypeError::mismatch("entity value", Kind::Entity, other.kind())),
        }
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), TypeError> {
        match self {
            Value::Bool(b) => {
                *b = value;
                Ok(())
            }
            other => Err(TypeError::mismatch("bool value", other.kind(), Kind::Bool)),
        }
    }

    pub fn set_double(&mut self, value: f64) -> Result<(), TypeError> {
        match self {
            Value::Double(n) => {
                *n = value;
                Ok(())
            }
            other => Err(TypeError::mismatch("double value", other.kind(), Kind::Double)),
        }
    }

    pub fn set_entity(&mut self, value: Option<Entity>) -> Result<(), TypeError> {
        match self {
            Value::Entity(e) => {
                *e = value;
                Ok(())
            }
            other => Err(TypeError::mismatch("entity value", other.kind(), Kind::Entity)),
        }
    }

    /// Overwrite this value's payload with `new`, keeping the variant fixed.
    pub fn assign(&mut self, new: Value) -> Result<(), TypeError> {
        match new {
            Value::Bool(b) => self.set_bool(b),
            Value::Double(n) => self.set_double(n),
            Value::Entity(e) => self.set_entity(e),
        }
    }

    /// Convert this value to a serde_json Value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Double(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Entity(Some(entity)) => JsonValue::String(entity.to_string()),
            Value::Entity(None) => JsonValue::Null,
        }
    }
}

/// Equality is per variant; values of different variants are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Entity(None), Value::Entity(None)) => true,
            (Value::Entity(Some(a)), Value::Entity(Some(b))) => a.same_object(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Double(n) => {
                if n.is_nan() {
                    f.write_str("NaN")
                } else if n.is_infinite() {
                    f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else if *n == n.trunc() && n.abs() < 1e15 {
                    // Integer-like numbers without decimal point
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Entity(Some(entity)) => write!(f, "{}", entity),
            Value::Entity(None) => f.write_str("null"),
        }
    }
}

/// Round to the nearest integer, halves away from zero, clamped to `i32`.
///
/// NaN rounds to zero.
pub fn round_to_i32(n: f64) -> i32 {
    // `as` saturates at the i32 bounds and maps NaN to 0
    n.round() as i32
}
