//! The boundary between a running script and the game world.
//!
//! The interpreter performs every world effect through a [`Handler`]. Each
//! action method reports whether the action was performed under the agent's
//! remaining budget for this turn. A refusal is not an error: the program
//! suspends at the action and retries it on its next activation.
//!
//! The game loop runs one agent at a time, so a handler needs no locking.

use std::fmt;

use crate::entity::WormRef;

/// One world action a script can request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Move,
    /// Turn by an angle in radians.
    Turn { angle: f64 },
    Jump,
    /// Fire the active weapon with the given yield, in percent.
    Fire { yield_percent: i32 },
    ToggleWeapon,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move => f.write_str("move"),
            Action::Turn { angle } => write!(f, "turn {}", angle),
            Action::Jump => f.write_str("jump"),
            Action::Fire { yield_percent } => write!(f, "fire {}%", yield_percent),
            Action::ToggleWeapon => f.write_str("toggle weapon"),
        }
    }
}

/// Capabilities the game grants to a script.
pub trait Handler {
    fn move_worm(&mut self, agent: &WormRef) -> bool;

    fn turn(&mut self, agent: &WormRef, angle: f64) -> bool;

    fn jump(&mut self, agent: &WormRef) -> bool;

    fn fire(&mut self, agent: &WormRef, yield_percent: i32) -> bool;

    fn toggle_weapon(&mut self, agent: &WormRef) -> bool;

    /// Receive the text of a print statement.
    fn print(&mut self, text: &str);

    /// Dispatch an [`Action`] to the matching method.
    fn perform(&mut self, agent: &WormRef, action: Action) -> bool {
        match action {
            Action::Move => self.move_worm(agent),
            Action::Turn { angle } => self.turn(agent, angle),
            Action::Jump => self.jump(agent),
            Action::Fire { yield_percent } => self.fire(agent, yield_percent),
            Action::ToggleWeapon => self.toggle_weapon(agent),
        }
    }
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn move_worm(&mut self, agent: &WormRef) -> bool {
        (**self).move_worm(agent)
    }

    fn turn(&mut self, agent: &WormRef, angle: f64) -> bool {
        (**self).turn(agent, angle)
    }

    fn jump(&mut self, agent: &WormRef) -> bool {
        (**self).jump(agent)
    }

    fn fire(&mut self, agent: &WormRef, yield_percent: i32) -> bool {
        (**self).fire(agent, yield_percent)
    }

    fn toggle_weapon(&mut self, agent: &WormRef) -> bool {
        (**self).toggle_weapon(agent)
    }

    fn print(&mut self, text: &str) {
        (**self).print(text)
    }

    fn perform(&mut self, agent: &WormRef, action: Action) -> bool {
        (**self).perform(agent, action)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn move_worm(&mut self, agent: &WormRef) -> bool {
        (**self).move_worm(agent)
    }

    fn turn(&mut self, agent: &WormRef, angle: f64) -> bool {
        (**self).turn(agent, angle)
    }

    fn jump(&mut self, agent: &WormRef) -> bool {
        (**self).jump(agent)
    }

    fn fire(&mut self, agent: &WormRef, yield_percent: i32) -> bool {
        (**self).fire(agent, yield_percent)
    }

    fn toggle_weapon(&mut self, agent: &WormRef) -> bool {
        (**self).toggle_weapon(agent)
    }

    fn print(&mut self, text: &str) {
        (**self).print(text)
    }

    fn perform(&mut self, agent: &WormRef, action: Action) -> bool {
        (**self).perform(agent, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHandler, StubWorm};

    #[test]
    fn test_perform_dispatches_to_method() {
        let agent: WormRef = StubWorm::new("Rex");
        let mut handler = RecordingHandler::default();

        assert!(handler.perform(&agent, Action::Turn { angle: 0.5 }));
        assert!(handler.perform(&agent, Action::Fire { yield_percent: 40 }));
        assert_eq!(
            handler.actions,
            vec![Action::Turn { angle: 0.5 }, Action::Fire { yield_percent: 40 }]
        );
    }

    #[test]
    fn test_boxed_handler_forwards() {
        let agent: WormRef = StubWorm::new("Rex");
        let mut recorder = RecordingHandler::refusing();
        {
            let mut handler: Box<dyn Handler + '_> = Box::new(&mut recorder);
            assert!(!handler.perform(&agent, Action::Jump));
            assert!(!handler.move_worm(&agent));
            handler.print("hello");
        }
        assert_eq!(recorder.actions, vec![Action::Jump, Action::Move]);
        assert_eq!(recorder.printed, vec!["hello"]);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Fire { yield_percent: 75 }.to_string(), "fire 75%");
        assert_eq!(Action::ToggleWeapon.to_string(), "toggle weapon");
    }
}
