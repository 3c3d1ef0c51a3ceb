//! Egui input guard: keeps typing in the overlay from walking the camera.
//!
//! When an egui text field or slider has keyboard focus, world-level input
//! systems release every held action and skip key processing.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants keyboard input. Also `false` when no egui
/// context exists yet (first frame, headless runs).
#[inline]
pub fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_keyboard_input())
}

/// Returns `true` when the pointer is over an egui panel or egui is handling
/// a drag or click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}
