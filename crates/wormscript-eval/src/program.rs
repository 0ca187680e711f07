//! The program orchestrator.
//!
//! A [`Program`] owns one script's statement tree, its globals, the worm it
//! controls and the Handler it acts through. The game calls [`Program::run`]
//! once per scheduling slice. Each activation either finishes the whole tree
//! or stops at one leaf and remembers that leaf's location as the resume
//! marker for the next activation.

use serde_json::Value as JsonValue;
use wormscript_ast::{SourceLocation, Statement};

use crate::entity::WormRef;
use crate::error::Unwind;
use crate::exec::Executor;
use crate::globals::Globals;
use crate::handler::Handler;

/// How an activation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The walk reached the end of the tree.
    Completed,
    /// The walk stopped early and must be called again next slice.
    Suspended,
}

/// Lifecycle of a program between activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    /// Never run.
    Fresh,
    /// Stopped at the resume marker.
    Suspended,
    /// The last activation finished the tree.
    Completed,
    /// The last activation ended with a type error.
    Faulted,
}

/// A control script bound to one worm.
pub struct Program<H: Handler> {
    root: Statement,
    globals: Globals,
    agent: WormRef,
    handler: H,
    resume: Option<SourceLocation>,
    state: ProgramState,
    step_limit: Option<u32>,
    activations: u64,
}

impl<H: Handler> Program<H> {
    /// Create a program around a built statement tree and declared globals.
    pub fn new(root: Statement, globals: Globals, agent: WormRef, handler: H) -> Self {
        Self {
            root,
            globals,
            agent,
            handler,
            resume: None,
            state: ProgramState::Fresh,
            step_limit: None,
            activations: 0,
        }
    }

    /// Bound the number of leaf statements one activation may execute.
    ///
    /// Once the limit is spent the next leaf suspends before it runs, so a
    /// script made only of assignments and prints still yields.
    pub fn with_step_limit(mut self, limit: u32) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Run one activation.
    ///
    /// Suspension is not an error: it is reported as
    /// [`Activation::Suspended`] and the next call resumes where this one
    /// stopped. A type error ends the activation, clears the resume marker and
    /// is returned; the caller is expected to stop scheduling the program.
    pub fn run(&mut self) -> crate::Result<Activation> {
        self.activations += 1;
        tracing::debug!(
            activation = self.activations,
            resume = ?self.resume,
            "program activation started"
        );

        let mut exec = Executor::new(
            &mut self.globals,
            &self.agent,
            &mut self.handler,
            &mut self.resume,
            self.step_limit,
        );
        let outcome = exec.exec(&self.root);
        let steps = exec.steps();

        match outcome {
            Ok(()) => {
                self.resume = None;
                self.state = ProgramState::Completed;
                tracing::debug!(steps, "program completed");
                Ok(Activation::Completed)
            }
            Err(Unwind::Suspend(at)) => {
                self.resume = Some(at);
                self.state = ProgramState::Suspended;
                tracing::debug!(line = at.line, column = at.column, steps, "program suspended");
                Ok(Activation::Suspended)
            }
            Err(Unwind::Fault(err)) => {
                self.resume = None;
                self.state = ProgramState::Faulted;
                tracing::warn!("program faulted: {}", err);
                Err(err)
            }
        }
    }

    /// Forget any suspension so the next activation starts from the root.
    pub fn reset(&mut self) {
        self.resume = None;
        self.state = ProgramState::Fresh;
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Location the next activation resumes at, if suspended.
    pub fn resume_marker(&self) -> Option<SourceLocation> {
        self.resume
    }

    /// Number of times `run` has been called.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// The globals as a JSON object keyed by name.
    pub fn globals_snapshot(&self) -> JsonValue {
        self.globals.to_json()
    }

    pub fn agent(&self) -> &WormRef {
        &self.agent
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

impl<H: Handler> std::fmt::Debug for Program<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("agent", &self.agent)
            .field("state", &self.state)
            .field("resume", &self.resume)
            .field("activations", &self.activations)
            .finish_non_exhaustive()
    }
}
