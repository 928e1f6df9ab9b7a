//! Keeps pointer input on egui windows from also dragging the garden.

use bevy_egui::EguiContexts;

/// `true` when the cursor is over an egui area or egui is handling a
/// drag/click. Camera and hover systems skip the frame when this is set.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
