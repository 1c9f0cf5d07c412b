use crate::config::SmoothingMode;

/// Exponential approach of `current` toward `target`.
///
/// Each step closes the fraction `ease` of the remaining gap, so for
/// `0 < ease < 1` the value moves monotonically toward the target and never
/// overshoots it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LerpState {
    pub current: f32,
    pub target: f32,
    pub ease: f32,
}

impl Default for LerpState {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl LerpState {
    #[must_use]
    pub fn new(ease: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            ease,
        }
    }

    /// One fixed step: `current += (target - current) * ease`.
    pub fn step(&mut self) -> f32 {
        self.step_by(self.ease)
    }

    /// Framerate-independent step.
    ///
    /// `ease` is read as the per-frame factor at `reference_fps`; a frame of
    /// `delta` seconds applies `1 - (1 - ease)^(delta * reference_fps)`.
    pub fn step_timed(&mut self, delta: f32, reference_fps: f32) -> f32 {
        let frames = (delta * reference_fps).max(0.0);
        let factor = 1.0 - (1.0 - self.ease).powf(frames);
        self.step_by(factor)
    }

    /// Steps according to the configured smoothing mode.
    pub fn advance(&mut self, mode: SmoothingMode, delta: f32) -> f32 {
        match mode {
            SmoothingMode::PerFrame => self.step(),
            SmoothingMode::TimeBased { reference_fps } => self.step_timed(delta, reference_fps),
        }
    }

    fn step_by(&mut self, factor: f32) -> f32 {
        self.current += (self.target - self.current) * factor;
        self.current
    }
}
