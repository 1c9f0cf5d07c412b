/// Sine-driven weight for the sea's morph target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphOscillator {
    /// Accumulated phase, radians.
    pub time_passed: f32,
    /// Phase advance per second.
    pub speed: f32,
}

impl Default for MorphOscillator {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl MorphOscillator {
    #[must_use]
    pub fn new(speed: f32) -> Self {
        Self {
            time_passed: 0.0,
            speed,
        }
    }

    /// Weight for the current phase, in `[0, 1]`.
    #[must_use]
    pub fn weight(&self) -> f32 {
        (self.time_passed.sin() * 0.5 + 0.5).abs()
    }

    /// Returns the weight of the current phase, then advances the phase by
    /// `delta * speed`.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let weight = self.weight();
        self.time_passed += delta * self.speed;
        weight
    }
}
