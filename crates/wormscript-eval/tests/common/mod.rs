//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use wormscript_eval::ast::{Expr, Statement, Stmt};
use wormscript_eval::{Action, Handler, WormObject, WormRef};

#[derive(Debug)]
pub struct TestWorm {
    pub name: String,
    pub x: Cell<f64>,
    pub action_points: Cell<i64>,
}

impl TestWorm {
    pub fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            x: Cell::new(0.0),
            action_points: Cell::new(10),
        })
    }
}

impl WormObject for TestWorm {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn x(&self) -> f64 {
        self.x.get()
    }

    fn y(&self) -> f64 {
        0.0
    }

    fn radius(&self) -> f64 {
        0.25
    }

    fn direction(&self) -> f64 {
        0.0
    }

    fn hit_points(&self) -> i64 {
        50
    }

    fn max_hit_points(&self) -> i64 {
        50
    }

    fn action_points(&self) -> i64 {
        self.action_points.get()
    }

    fn max_action_points(&self) -> i64 {
        10
    }

    fn team(&self) -> Option<String> {
        None
    }
}

/// Answers actions from a queue of scripted results, accepting once the
/// queue runs dry.
#[derive(Debug, Default)]
pub struct ScriptedHandler {
    pub responses: VecDeque<bool>,
    pub calls: Vec<Action>,
    pub printed: Vec<String>,
}

impl ScriptedHandler {
    pub fn with_responses(responses: &[bool]) -> Self {
        Self {
            responses: responses.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn count(&self, action: Action) -> usize {
        self.calls.iter().filter(|call| **call == action).count()
    }

    fn answer(&mut self, action: Action) -> bool {
        self.calls.push(action);
        self.responses.pop_front().unwrap_or(true)
    }
}

impl Handler for ScriptedHandler {
    fn move_worm(&mut self, _agent: &WormRef) -> bool {
        self.answer(Action::Move)
    }

    fn turn(&mut self, _agent: &WormRef, angle: f64) -> bool {
        self.answer(Action::Turn { angle })
    }

    fn jump(&mut self, _agent: &WormRef) -> bool {
        self.answer(Action::Jump)
    }

    fn fire(&mut self, _agent: &WormRef, yield_percent: i32) -> bool {
        self.answer(Action::Fire { yield_percent })
    }

    fn toggle_weapon(&mut self, _agent: &WormRef) -> bool {
        self.answer(Action::ToggleWeapon)
    }

    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }
}

pub fn at(line: u32, node: Stmt) -> Statement {
    Statement::at(line, 1, node)
}

pub fn seq(line: u32, stmts: Vec<Statement>) -> Statement {
    Statement::at(line, 1, Stmt::Sequence(stmts))
}

pub fn print_num(line: u32, n: f64) -> Statement {
    at(line, Stmt::Print(Expr::Double(n)))
}
