//! Error types for the script interpreter.

use thiserror::Error;
use wormscript_ast::{Kind, Property, SourceLocation};

use crate::entity::EntityKind;

/// A variant mismatch discovered while running a script.
///
/// Type errors are script defects: they end the current activation and are
/// never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("{context}: expected {expected}, found {found}")]
    Mismatch {
        context: String,
        expected: Kind,
        found: Kind,
    },

    #[error("Global '{0}' is not declared")]
    UndeclaredGlobal(String),

    #[error("Global '{0}' is already declared")]
    DuplicateGlobal(String),

    #[error("Cannot assign {found} to global '{name}' declared as {declared}")]
    AssignmentMismatch {
        name: String,
        declared: Kind,
        found: Kind,
    },

    #[error("A {entity} has no {property}")]
    UnsupportedProperty {
        property: Property,
        entity: EntityKind,
    },

    #[error("Cannot read {property} of a null entity")]
    NullEntity { property: Property },
}

impl TypeError {
    pub fn mismatch(context: impl Into<String>, expected: Kind, found: Kind) -> Self {
        TypeError::Mismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

/// Why a statement walk stopped early.
///
/// `Suspend` is the yield signal raised when the Handler refuses an action or
/// an activation must give control back. It never leaves `Program::run`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Unwind {
    Suspend(SourceLocation),
    Fault(TypeError),
}

impl From<TypeError> for Unwind {
    fn from(err: TypeError) -> Self {
        Unwind::Fault(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message() {
        let err = TypeError::mismatch("if condition", Kind::Bool, Kind::Double);
        assert_eq!(err.to_string(), "if condition: expected bool, found double");
    }

    #[test]
    fn test_unsupported_property_message() {
        let err = TypeError::UnsupportedProperty {
            property: Property::Direction,
            entity: EntityKind::Food,
        };
        assert_eq!(err.to_string(), "A food has no direction");
    }

    #[test]
    fn test_type_error_converts_to_fault() {
        let unwind: Unwind = TypeError::UndeclaredGlobal("x".to_string()).into();
        assert!(matches!(unwind, Unwind::Fault(TypeError::UndeclaredGlobal(name)) if name == "x"));
    }
}
