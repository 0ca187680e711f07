//! AST dumping utilities for testing and debugging
//!
//! Provides human-readable tree representations of statements, each line
//! prefixed with the statement's source location.

use crate::ast::*;
use std::fmt::Write as FmtWrite;

/// Dump a statement tree as a pretty-printed outline
pub fn dump_statement(stmt: &Statement) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_statement(&mut out, stmt, 0);
    out
}

/// Render an expression on a single line
pub fn dump_expr(expr: &Expr) -> String {
    let mut out = String::new();
    let _ = write_expr(&mut out, expr);
    out
}

fn write_statement(out: &mut String, stmt: &Statement, indent: usize) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    let at = stmt.location;
    match &stmt.node {
        Stmt::Sequence(stmts) => {
            writeln!(out, "{}[{}] Sequence:", prefix, at)?;
            for child in stmts {
                write_statement(out, child, indent + 1)?;
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            writeln!(out, "{}[{}] If {}", prefix, at, dump_expr(condition))?;
            writeln!(out, "{}  Then:", prefix)?;
            write_statement(out, then_branch, indent + 2)?;
            if let Some(else_branch) = else_branch {
                writeln!(out, "{}  Else:", prefix)?;
                write_statement(out, else_branch, indent + 2)?;
            }
        }
        Stmt::While { condition, body } => {
            writeln!(out, "{}[{}] While {}", prefix, at, dump_expr(condition))?;
            write_statement(out, body, indent + 1)?;
        }
        Stmt::Repeat { count, body } => {
            writeln!(out, "{}[{}] Repeat {}", prefix, at, dump_expr(count))?;
            write_statement(out, body, indent + 1)?;
        }
        Stmt::Assign { name, value } => {
            writeln!(out, "{}[{}] Assign {} = {}", prefix, at, name, dump_expr(value))?;
        }
        Stmt::Print(expr) => writeln!(out, "{}[{}] Print {}", prefix, at, dump_expr(expr))?,
        Stmt::Skip => writeln!(out, "{}[{}] Skip", prefix, at)?,
        Stmt::Move => writeln!(out, "{}[{}] Move", prefix, at)?,
        Stmt::Turn(angle) => writeln!(out, "{}[{}] Turn {}", prefix, at, dump_expr(angle))?,
        Stmt::Jump => writeln!(out, "{}[{}] Jump", prefix, at)?,
        Stmt::Fire(yield_expr) => {
            writeln!(out, "{}[{}] Fire {}", prefix, at, dump_expr(yield_expr))?
        }
        Stmt::ToggleWeapon => writeln!(out, "{}[{}] ToggleWeapon", prefix, at)?,
    }
    Ok(())
}

fn write_expr(out: &mut String, expr: &Expr) -> std::fmt::Result {
    match expr {
        Expr::Bool(b) => write!(out, "{}", b),
        Expr::Double(n) => write!(out, "{:?}", n),
        Expr::Null => write!(out, "null"),
        Expr::SelfWorm => write!(out, "self"),
        Expr::Variable { name, kind } => write!(out, "{}: {}", name, kind),
        Expr::Binary { op, left, right } => {
            write!(out, "(")?;
            write_expr(out, left)?;
            write!(out, " {} ", op.symbol())?;
            write_expr(out, right)?;
            write!(out, ")")
        }
        Expr::Unary { op, operand } => {
            write!(out, "{}(", op.name())?;
            write_expr(out, operand)?;
            write!(out, ")")
        }
        Expr::Query { property, entity } => {
            write!(out, "{} of ", property)?;
            write_expr(out, entity)
        }
        Expr::IsWorm(inner) => {
            write!(out, "isworm(")?;
            write_expr(out, inner)?;
            write!(out, ")")
        }
        Expr::IsFood(inner) => {
            write!(out, "isfood(")?;
            write_expr(out, inner)?;
            write!(out, ")")
        }
        Expr::SameTeam(inner) => {
            write!(out, "sameteam(")?;
            write_expr(out, inner)?;
            write!(out, ")")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_nested_statement() {
        let stmt = Statement::at(
            1,
            1,
            Stmt::Sequence(vec![
                Statement::at(1, 1, Stmt::Turn(Expr::Double(0.5))),
                Statement::at(
                    2,
                    1,
                    Stmt::If {
                        condition: Expr::binary(BinOp::Less, Expr::Double(1.0), Expr::Double(2.0)),
                        then_branch: Box::new(Statement::at(2, 10, Stmt::Move)),
                        else_branch: Some(Box::new(Statement::at(3, 5, Stmt::Skip))),
                    },
                ),
            ]),
        );

        let dump = dump_statement(&stmt);
        let expected = "\
[1:1] Sequence:
  [1:1] Turn 0.5
  [2:1] If (1.0 < 2.0)
    Then:
      [2:10] Move
    Else:
      [3:5] Skip
";
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_dump_query_expr() {
        let expr = Expr::query(Property::HitPoints, Expr::variable("target", Kind::Entity));
        assert_eq!(dump_expr(&expr), "hit points of target: entity");
    }
}
