//! Statement execution with location-based resumption.
//!
//! A walk that must stop (the Handler refused an action, a Skip yields, or
//! the step limit is reached) unwinds with `Unwind::Suspend` carrying the
//! location of the leaf it stopped at. The next activation walks the tree
//! again with that location as its resume marker:
//!
//! - a subtree that does not contain the marker finished before the stop and
//!   is skipped without effects;
//! - a compound containing the marker descends straight into the child
//!   holding it, without re-testing its condition;
//! - the leaf at the marker clears it and runs, after which the walk
//!   continues normally.
//!
//! Loop state lives on the Rust call stack only. A resumed While finishes the
//! interrupted body and then re-tests its guard; a resumed Repeat evaluates its
//! count again and counts the interrupted body as the first iteration.

use wormscript_ast::{SourceLocation, Statement, Stmt};

use crate::entity::WormRef;
use crate::error::Unwind;
use crate::eval::{eval_bool, eval_double, eval_expr};
use crate::globals::Globals;
use crate::handler::{Action, Handler};
use crate::value::round_to_i32;

type Flow = Result<(), Unwind>;

/// State of one activation's walk over the statement tree.
pub(crate) struct Executor<'p, H: Handler> {
    globals: &'p mut Globals,
    agent: &'p WormRef,
    handler: &'p mut H,
    resume: &'p mut Option<SourceLocation>,
    /// Set once a Skip has yielded during this activation.
    skip_yielded: bool,
    steps: u32,
    step_limit: Option<u32>,
}

impl<'p, H: Handler> Executor<'p, H> {
    pub(crate) fn new(
        globals: &'p mut Globals,
        agent: &'p WormRef,
        handler: &'p mut H,
        resume: &'p mut Option<SourceLocation>,
        step_limit: Option<u32>,
    ) -> Self {
        Self {
            globals,
            agent,
            handler,
            resume,
            skip_yielded: false,
            steps: 0,
            step_limit,
        }
    }

    /// Leaf statements executed so far in this activation.
    pub(crate) fn steps(&self) -> u32 {
        self.steps
    }

    /// Execute a statement, honoring the resume marker.
    pub(crate) fn exec(&mut self, stmt: &Statement) -> Flow {
        let resume_at = *self.resume;
        if let Some(at) = resume_at {
            if !stmt.contains_checkpoint(at) {
                return Ok(());
            }
        }

        match &stmt.node {
            Stmt::Sequence(stmts) => {
                for stmt in stmts {
                    self.exec(stmt)?;
                }
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let take_then = match resume_at {
                    Some(at) => then_branch.contains_checkpoint(at),
                    None => eval_bool(condition, self.globals, self.agent, "if condition")?,
                };
                if take_then {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                if resume_at.is_some() {
                    self.exec(body)?;
                }
                while eval_bool(condition, self.globals, self.agent, "while condition")? {
                    self.exec(body)?;
                }
                Ok(())
            }

            Stmt::Repeat { count, body } => {
                let count = eval_double(count, self.globals, self.agent, "repeat count")?;
                let mut remaining = round_to_i32(count);
                if resume_at.is_some() {
                    self.exec(body)?;
                    remaining = remaining.saturating_sub(1);
                }
                while remaining > 0 {
                    self.exec(body)?;
                    remaining -= 1;
                }
                Ok(())
            }

            Stmt::Assign { name, value } => {
                self.enter_leaf(stmt)?;
                let value = eval_expr(value, self.globals, self.agent)?;
                self.globals.assign(name, value)?;
                Ok(())
            }

            Stmt::Print(expr) => {
                self.enter_leaf(stmt)?;
                let text = eval_expr(expr, self.globals, self.agent)?.to_string();
                tracing::trace!(text = %text, "script print");
                self.handler.print(&text);
                Ok(())
            }

            Stmt::Skip => {
                // A resumed Skip already yielded in the previous activation
                let resumed = self.enter_leaf(stmt)?;
                if !resumed && !self.skip_yielded {
                    self.skip_yielded = true;
                    return Err(Unwind::Suspend(stmt.location));
                }
                Ok(())
            }

            Stmt::Move => {
                self.enter_leaf(stmt)?;
                self.act(stmt, Action::Move)
            }

            Stmt::Turn(angle) => {
                self.enter_leaf(stmt)?;
                let angle = eval_double(angle, self.globals, self.agent, "turn angle")?;
                self.act(stmt, Action::Turn { angle })
            }

            Stmt::Jump => {
                self.enter_leaf(stmt)?;
                self.act(stmt, Action::Jump)
            }

            Stmt::Fire(yield_expr) => {
                self.enter_leaf(stmt)?;
                let percent = eval_double(yield_expr, self.globals, self.agent, "fire yield")?;
                self.act(
                    stmt,
                    Action::Fire {
                        yield_percent: round_to_i32(percent),
                    },
                )
            }

            Stmt::ToggleWeapon => {
                self.enter_leaf(stmt)?;
                self.act(stmt, Action::ToggleWeapon)
            }
        }
    }

    /// Start executing a leaf. Returns whether the activation resumes here,
    /// clearing the marker if so.
    ///
    /// Counts the leaf against the step limit and suspends before it runs
    /// once the limit is spent. The leaf an activation resumes at always runs.
    fn enter_leaf(&mut self, stmt: &Statement) -> Result<bool, Unwind> {
        let resumed = self.resume.take().is_some();
        if let Some(limit) = self.step_limit {
            if !resumed && self.steps >= limit {
                return Err(Unwind::Suspend(stmt.location));
            }
        }
        self.steps = self.steps.saturating_add(1);
        Ok(resumed)
    }

    /// Ask the Handler to perform an action, suspending if it refuses.
    fn act(&mut self, stmt: &Statement, action: Action) -> Flow {
        let performed = self.handler.perform(self.agent, action);
        tracing::trace!(action = %action, performed, at = %stmt.location, "handler action");
        if performed {
            Ok(())
        } else {
            Err(Unwind::Suspend(stmt.location))
        }
    }
}
