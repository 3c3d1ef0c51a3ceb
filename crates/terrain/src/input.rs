//! Platform-independent input state consumed by the camera controller.
//!
//! The input collaborator translates device events into [`Action`]s and look
//! deltas; the controller reads and drains this state once per frame.

use bevy::prelude::*;

/// Button-style actions the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Sprint,
    Jump,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Sprint,
        Action::Jump,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    held: u8,
    jump_triggered: bool,
    look_delta: Vec2,
    /// Set until the first look sample after start or capture regain.
    first_sample: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: 0,
            jump_triggered: false,
            look_delta: Vec2::ZERO,
            first_sample: true,
        }
    }
}

impl InputState {
    pub fn press(&mut self, action: Action) {
        if action == Action::Jump && !self.is_held(Action::Jump) {
            self.jump_triggered = true;
        }
        self.held |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
    }

    pub fn set_held(&mut self, action: Action, held: bool) {
        if held {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Drop every held action, e.g. when the window loses capture.
    pub fn release_all(&mut self) {
        self.held = 0;
    }

    /// Consume the jump edge.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_triggered)
    }

    /// Feed one mouse-motion sample in screen pixels (+y is down).
    ///
    /// The first sample after start or [`Self::rearm_first_sample`] only
    /// establishes the reference point and contributes no rotation.
    pub fn push_look(&mut self, dx: f32, dy: f32) {
        if self.first_sample {
            self.first_sample = false;
            return;
        }
        self.look_delta += Vec2::new(dx, dy);
    }

    pub fn take_look(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Discard the next look sample again. Called whenever the cursor
    /// capture is regained so the warp of the hidden cursor is not applied
    /// as rotation.
    pub fn rearm_first_sample(&mut self) {
        self.first_sample = true;
        self.look_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::default();
        for &action in Action::ALL {
            assert!(!input.is_held(action));
        }
        input.press(Action::MoveForward);
        input.press(Action::Sprint);
        assert!(input.is_held(Action::MoveForward));
        assert!(input.is_held(Action::Sprint));
        assert!(!input.is_held(Action::MoveBack));
        input.release(Action::MoveForward);
        assert!(!input.is_held(Action::MoveForward));
        assert!(input.is_held(Action::Sprint));
    }

    #[test]
    fn test_jump_is_an_edge() {
        let mut input = InputState::default();
        input.press(Action::Jump);
        assert!(input.take_jump());
        assert!(!input.take_jump());

        // Key repeat while held does not re-trigger.
        input.press(Action::Jump);
        assert!(!input.take_jump());

        input.release(Action::Jump);
        input.press(Action::Jump);
        assert!(input.take_jump());
    }

    #[test]
    fn test_first_look_sample_is_discarded() {
        let mut input = InputState::default();
        input.push_look(300.0, -40.0);
        assert_eq!(input.take_look(), Vec2::ZERO);

        input.push_look(2.0, 3.0);
        input.push_look(1.0, 1.0);
        assert_eq!(input.take_look(), Vec2::new(3.0, 4.0));
        assert_eq!(input.take_look(), Vec2::ZERO);
    }

    #[test]
    fn test_rearm_discards_next_sample() {
        let mut input = InputState::default();
        input.push_look(0.0, 0.0);
        input.push_look(5.0, 5.0);
        input.rearm_first_sample();
        assert_eq!(input.take_look(), Vec2::ZERO);
        input.push_look(800.0, 600.0);
        assert_eq!(input.take_look(), Vec2::ZERO);
        input.push_look(1.0, 0.0);
        assert_eq!(input.take_look(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::default();
        input.set_held(Action::MoveLeft, true);
        input.set_held(Action::MoveRight, true);
        input.release_all();
        assert!(Action::ALL.iter().all(|&a| !input.is_held(a)));
    }
}
