//! Test doubles for world objects and the handler.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::entity::{FoodObject, WormObject, WormRef};
use crate::handler::{Action, Handler};

#[derive(Debug)]
pub(crate) struct StubWorm {
    name: String,
    x: Cell<f64>,
    y: Cell<f64>,
    direction: Cell<f64>,
    hit_points: Cell<i64>,
    max_hit_points: Cell<i64>,
    team: RefCell<Option<String>>,
}

impl StubWorm {
    pub(crate) fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            direction: Cell::new(0.0),
            hit_points: Cell::new(100),
            max_hit_points: Cell::new(100),
            team: RefCell::new(None),
        })
    }

    pub(crate) fn at(self: Rc<Self>, x: f64, y: f64) -> Rc<Self> {
        self.set_position(x, y);
        self
    }

    pub(crate) fn with_hit_points(self: Rc<Self>, current: i64, max: i64) -> Rc<Self> {
        self.hit_points.set(current);
        self.max_hit_points.set(max);
        self
    }

    pub(crate) fn with_team(self: Rc<Self>, team: &str) -> Rc<Self> {
        *self.team.borrow_mut() = Some(team.to_string());
        self
    }

    pub(crate) fn set_position(&self, x: f64, y: f64) {
        self.x.set(x);
        self.y.set(y);
    }

    pub(crate) fn set_direction(&self, direction: f64) {
        self.direction.set(direction);
    }
}

impl WormObject for StubWorm {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn x(&self) -> f64 {
        self.x.get()
    }

    fn y(&self) -> f64 {
        self.y.get()
    }

    fn radius(&self) -> f64 {
        0.5
    }

    fn direction(&self) -> f64 {
        self.direction.get()
    }

    fn hit_points(&self) -> i64 {
        self.hit_points.get()
    }

    fn max_hit_points(&self) -> i64 {
        self.max_hit_points.get()
    }

    fn action_points(&self) -> i64 {
        10
    }

    fn max_action_points(&self) -> i64 {
        10
    }

    fn team(&self) -> Option<String> {
        self.team.borrow().clone()
    }
}

#[derive(Debug)]
pub(crate) struct StubFood {
    x: f64,
    y: f64,
    radius: f64,
}

impl StubFood {
    pub(crate) fn new(x: f64, y: f64, radius: f64) -> Rc<Self> {
        Rc::new(Self { x, y, radius })
    }
}

impl FoodObject for StubFood {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Records every call and accepts actions while its budget lasts.
#[derive(Debug, Default)]
pub(crate) struct RecordingHandler {
    /// Every attempted action, accepted or not.
    pub(crate) actions: Vec<Action>,
    pub(crate) printed: Vec<String>,
    /// Remaining actions to accept, `None` for no limit.
    pub(crate) budget: Option<usize>,
}

impl RecordingHandler {
    pub(crate) fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            ..Self::default()
        }
    }

    pub(crate) fn refusing() -> Self {
        Self::with_budget(0)
    }

    fn attempt(&mut self, action: Action) -> bool {
        self.actions.push(action);
        match self.budget {
            Some(0) => false,
            Some(left) => {
                self.budget = Some(left - 1);
                true
            }
            None => true,
        }
    }
}

impl Handler for RecordingHandler {
    fn move_worm(&mut self, _agent: &WormRef) -> bool {
        self.attempt(Action::Move)
    }

    fn turn(&mut self, _agent: &WormRef, angle: f64) -> bool {
        self.attempt(Action::Turn { angle })
    }

    fn jump(&mut self, _agent: &WormRef) -> bool {
        self.attempt(Action::Jump)
    }

    fn fire(&mut self, _agent: &WormRef, yield_percent: i32) -> bool {
        self.attempt(Action::Fire { yield_percent })
    }

    fn toggle_weapon(&mut self, _agent: &WormRef) -> bool {
        self.attempt(Action::ToggleWeapon)
    }

    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }
}
