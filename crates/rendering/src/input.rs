//! Device input → [`InputState`].
//!
//! Keys are mapped to [`Action`]s through the [`KeyBindings`] resource; mouse
//! motion is forwarded as look deltas while the cursor is captured.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_egui::EguiContexts;

use terrain::{Action, InputState};

use crate::egui_input_guard::{egui_wants_keyboard, egui_wants_pointer};

/// A key plus an optional alternate key for the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub alt: Option<KeyCode>,
}

impl KeyBinding {
    pub const fn simple(key: KeyCode) -> Self {
        Self { key, alt: None }
    }

    pub const fn with_alt(key: KeyCode, alt: KeyCode) -> Self {
        Self {
            key,
            alt: Some(alt),
        }
    }

    /// Held state. Modifiers are not checked: sprint is itself a modifier key
    /// and must combine with movement.
    pub fn pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.pressed(self.key) || self.alt.is_some_and(|k| keys.pressed(k))
    }

    pub fn just_pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.just_pressed(self.key) || self.alt.is_some_and(|k| keys.just_pressed(k))
    }
}

/// Keyboard layout for the walker.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_forward: KeyBinding,
    pub move_back: KeyBinding,
    pub move_left: KeyBinding,
    pub move_right: KeyBinding,
    pub sprint: KeyBinding,
    pub jump: KeyBinding,
    pub toggle_capture: KeyBinding,
    pub exit: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_forward: KeyBinding::with_alt(KeyCode::KeyW, KeyCode::ArrowUp),
            move_back: KeyBinding::with_alt(KeyCode::KeyS, KeyCode::ArrowDown),
            move_left: KeyBinding::with_alt(KeyCode::KeyA, KeyCode::ArrowLeft),
            move_right: KeyBinding::with_alt(KeyCode::KeyD, KeyCode::ArrowRight),
            sprint: KeyBinding::simple(KeyCode::ShiftLeft),
            jump: KeyBinding::simple(KeyCode::Space),
            toggle_capture: KeyBinding::simple(KeyCode::Tab),
            exit: KeyBinding::simple(KeyCode::Escape),
        }
    }
}

impl KeyBindings {
    pub fn binding(&self, action: Action) -> KeyBinding {
        match action {
            Action::MoveForward => self.move_forward,
            Action::MoveBack => self.move_back,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Sprint => self.sprint,
            Action::Jump => self.jump,
        }
    }

    /// Copy the held state of every bound key into `input`.
    pub fn apply(&self, keys: &ButtonInput<KeyCode>, input: &mut InputState) {
        for &action in Action::ALL {
            input.set_held(action, self.binding(action).pressed(keys));
        }
    }

    /// [`Self::apply`] while the walker owns the keyboard; otherwise every
    /// action stays released so a free cursor cannot walk the camera.
    pub fn apply_if_focused(
        &self,
        keys: &ButtonInput<KeyCode>,
        focused: bool,
        input: &mut InputState,
    ) {
        if focused {
            self.apply(keys, input);
        } else {
            input.release_all();
        }
    }
}

/// Whether the window currently owns the mouse.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCapture {
    pub captured: bool,
}

impl Default for CursorCapture {
    fn default() -> Self {
        Self { captured: true }
    }
}

impl CursorCapture {
    /// Flip the capture state and keep `input` consistent with it: regaining
    /// capture discards the next look sample, losing it drops held actions.
    pub fn set(&mut self, captured: bool, input: &mut InputState) {
        if self.captured == captured {
            return;
        }
        self.captured = captured;
        if captured {
            input.rearm_first_sample();
        } else {
            input.release_all();
        }
    }
}

fn apply_cursor_options(window: &mut Window, captured: bool) {
    if captured {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Startup: grab the cursor to match the initial [`CursorCapture`].
pub fn init_cursor_capture(
    capture: Res<CursorCapture>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if let Ok(mut window) = windows.get_single_mut() {
        apply_cursor_options(&mut window, capture.captured);
    }
}

/// Tab toggles capture; a left click on the world recaptures.
pub fn toggle_cursor_capture(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    mut contexts: EguiContexts,
    mut capture: ResMut<CursorCapture>,
    mut input: ResMut<InputState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let wanted = if bindings.toggle_capture.just_pressed(&keys) {
        !capture.captured
    } else if !capture.captured
        && buttons.just_pressed(MouseButton::Left)
        && !egui_wants_pointer(&mut contexts)
    {
        true
    } else {
        return;
    };

    capture.set(wanted, &mut input);
    if let Ok(mut window) = windows.get_single_mut() {
        apply_cursor_options(&mut window, wanted);
    }
    info!("Cursor {}", if wanted { "captured" } else { "released" });
}

/// Held keys → actions. Everything is released while the cursor is free or
/// egui has keyboard focus.
pub fn collect_key_actions(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    capture: Res<CursorCapture>,
    mut contexts: EguiContexts,
    mut input: ResMut<InputState>,
) {
    let focused = capture.captured && !egui_wants_keyboard(&mut contexts);
    bindings.apply_if_focused(&keys, focused, &mut input);
}

/// Raw mouse motion → look deltas. Ignored while the cursor is free.
pub fn collect_mouse_look(
    mut motion: EventReader<MouseMotion>,
    capture: Res<CursorCapture>,
    mut input: ResMut<InputState>,
) {
    if !capture.captured {
        motion.clear();
        return;
    }
    for ev in motion.read() {
        input.push_look(ev.delta.x, ev.delta.y);
    }
}

pub fn exit_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut exit: EventWriter<AppExit>,
) {
    if bindings.exit.just_pressed(&keys) {
        info!("Escape pressed, exiting");
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut input = InputState::default();

        for (key, action) in [
            (KeyCode::KeyW, Action::MoveForward),
            (KeyCode::ArrowUp, Action::MoveForward),
            (KeyCode::KeyS, Action::MoveBack),
            (KeyCode::ArrowDown, Action::MoveBack),
            (KeyCode::KeyA, Action::MoveLeft),
            (KeyCode::ArrowLeft, Action::MoveLeft),
            (KeyCode::KeyD, Action::MoveRight),
            (KeyCode::ArrowRight, Action::MoveRight),
            (KeyCode::ShiftLeft, Action::Sprint),
            (KeyCode::Space, Action::Jump),
        ] {
            keys.press(key);
            bindings.apply(&keys, &mut input);
            assert!(input.is_held(action), "{key:?} should hold {action:?}");
            keys.release(key);
            bindings.apply(&keys, &mut input);
            assert!(!input.is_held(action), "{key:?} released");
        }
    }

    #[test]
    fn test_sprint_combines_with_movement() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut input = InputState::default();
        keys.press(KeyCode::ShiftLeft);
        keys.press(KeyCode::KeyW);
        bindings.apply(&keys, &mut input);
        assert!(input.is_held(Action::Sprint));
        assert!(input.is_held(Action::MoveForward));
    }

    #[test]
    fn test_holding_space_jumps_once() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut input = InputState::default();
        keys.press(KeyCode::Space);
        bindings.apply(&keys, &mut input);
        assert!(input.take_jump());
        // Next frame, still held.
        bindings.apply(&keys, &mut input);
        assert!(!input.take_jump());
    }

    #[test]
    fn test_unbound_keys_hold_nothing() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut input = InputState::default();
        keys.press(KeyCode::KeyQ);
        keys.press(KeyCode::Tab);
        bindings.apply(&keys, &mut input);
        assert!(Action::ALL.iter().all(|&a| !input.is_held(a)));
    }

    #[test]
    fn test_capture_loss_releases_and_regain_rearms() {
        let mut capture = CursorCapture::default();
        let mut input = InputState::default();
        input.push_look(0.0, 0.0);
        input.press(Action::MoveForward);

        capture.set(false, &mut input);
        assert!(!capture.captured);
        assert!(!input.is_held(Action::MoveForward));
        input.push_look(5.0, 5.0);
        assert_eq!(input.take_look(), Vec2::new(5.0, 5.0));

        capture.set(true, &mut input);
        input.push_look(400.0, 300.0);
        assert_eq!(input.take_look(), Vec2::ZERO);
        input.push_look(1.0, 2.0);
        assert_eq!(input.take_look(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_capture_set_same_state_is_noop() {
        let mut capture = CursorCapture::default();
        let mut input = InputState::default();
        input.push_look(0.0, 0.0);
        capture.set(true, &mut input);
        input.push_look(3.0, 4.0);
        assert_eq!(input.take_look(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_held_key_stays_released_while_cursor_free() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut capture = CursorCapture::default();
        let mut input = InputState::default();

        keys.press(KeyCode::KeyW);
        bindings.apply_if_focused(&keys, capture.captured, &mut input);
        assert!(input.is_held(Action::MoveForward));

        capture.set(false, &mut input);
        // W is still physically down on the following frames.
        for _ in 0..3 {
            bindings.apply_if_focused(&keys, capture.captured, &mut input);
            assert!(!input.is_held(Action::MoveForward));
        }

        capture.set(true, &mut input);
        bindings.apply_if_focused(&keys, capture.captured, &mut input);
        assert!(input.is_held(Action::MoveForward));
    }

    #[test]
    fn test_ui_keyboard_focus_releases_actions() {
        let bindings = KeyBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mut input = InputState::default();
        keys.press(KeyCode::KeyD);
        keys.press(KeyCode::Space);
        bindings.apply_if_focused(&keys, false, &mut input);
        assert!(Action::ALL.iter().all(|&a| !input.is_held(a)));
        assert!(!input.take_jump());
    }
}
