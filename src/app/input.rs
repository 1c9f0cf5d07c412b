//! Page input, reduced to what the scene reacts to.

/// A host event the stage handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The container now measures `container_width` CSS pixels.
    Resize { container_width: u32 },
    /// The cursor moved to `client_x` CSS pixels from the left edge.
    MouseMove { client_x: f32 },
}

/// Rotation target for a cursor at `client_x` in a viewport `width` wide.
///
/// Linear in `client_x`: `-coeff` at the left edge, `0` at the center,
/// `coeff` at the right edge. Returns `None` for a zero-width viewport.
#[must_use]
pub fn rotation_target(client_x: f32, width: u32, coeff: f32) -> Option<f32> {
    if width == 0 {
        return None;
    }
    Some((2.0 * client_x / width as f32 - 1.0) * coeff)
}
