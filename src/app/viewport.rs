/// Canvas size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Full container width, height capped at `max_height` and never taller
    /// than wide.
    #[must_use]
    pub fn fit(container_width: u32, max_height: u32) -> Self {
        Self {
            width: container_width,
            height: container_width.min(max_height),
        }
    }

    /// `width / height`, or 1 for a zero-height viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_caps_height() {
        assert_eq!(Viewport::fit(800, 500), Viewport { width: 800, height: 500 });
        assert_eq!(Viewport::fit(400, 500), Viewport { width: 400, height: 400 });
        assert!((Viewport::fit(800, 500).aspect() - 1.6).abs() < 1e-6);
    }

    #[test]
    fn empty_viewport_has_unit_aspect() {
        assert_eq!(Viewport::fit(0, 500).aspect(), 1.0);
    }
}
