//! Syntax tree for worm control scripts.
//!
//! The tree is produced by the script parser and consumed read-only by
//! `wormscript-eval`.

pub mod ast;
pub mod ast_dump;

pub use ast::*;
pub use ast_dump::{dump_expr, dump_statement};
