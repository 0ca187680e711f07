//! Global bindings of a script.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};
use wormscript_ast::Kind;

use crate::error::TypeError;
use crate::value::Value;

/// The global symbol table of a program.
///
/// Scripts have no local scopes. Every name is declared once, with a kind,
/// before the program first runs; assignments may only overwrite it with a
/// value of the same kind.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    bindings: HashMap<String, Value>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, kind)` declarations, each starting at its
    /// kind's default value.
    pub fn from_declarations<I, S>(declarations: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = (S, Kind)>,
        S: Into<String>,
    {
        let mut globals = Self::new();
        for (name, kind) in declarations {
            globals.declare(name, kind)?;
        }
        Ok(globals)
    }

    /// Declare a global with the default value of `kind`.
    ///
    /// Returns an error if the name is already declared.
    pub fn declare(&mut self, name: impl Into<String>, kind: Kind) -> Result<(), TypeError> {
        let name = name.into();
        if self.bindings.contains_key(&name) {
            return Err(TypeError::DuplicateGlobal(name));
        }
        self.bindings.insert(name, Value::default_for(kind));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Overwrite an existing global.
    ///
    /// The name must be declared and the new value must have its kind.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), TypeError> {
        let slot = self
            .bindings
            .get_mut(name)
            .ok_or_else(|| TypeError::UndeclaredGlobal(name.to_string()))?;

        if slot.kind() != value.kind() {
            return Err(TypeError::AssignmentMismatch {
                name: name.to_string(),
                declared: slot.kind(),
                found: value.kind(),
            });
        }
        slot.assign(value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Render all bindings as a JSON object keyed by name.
    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}
