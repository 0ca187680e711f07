//! Resumable interpreter for worm control scripts.
//!
//! A script drives one worm's turn. World actions go through a [`Handler`]
//! which refuses them once the turn's budget is spent; the running
//! [`Program`] then suspends at that action and picks up from the same
//! statement on its next activation. Type errors are modeled as
//! [`TypeError`] and propagate using Rust's `?` operator.

mod entity;
mod error;
mod eval;
mod exec;
mod globals;
mod handler;
mod program;
mod value;

#[cfg(test)]
mod testing;

pub use entity::{Entity, EntityKind, FoodObject, FoodRef, WormObject, WormRef};
pub use error::TypeError;
pub use eval::{eval_bool, eval_double, eval_expr};
pub use globals::Globals;
pub use handler::{Action, Handler};
pub use program::{Activation, Program, ProgramState};
pub use value::{round_to_i32, Value};

pub use wormscript_ast as ast;

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, TypeError>;
