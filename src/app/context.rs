use crate::app::lerp::LerpState;
use crate::app::oscillator::MorphOscillator;
use crate::app::viewport::Viewport;
use crate::config::SceneConfig;
use crate::utils::time::Clock;

/// State shared by the input handlers and the frame loop.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub lerp: LerpState,
    pub oscillator: MorphOscillator,
    pub viewport: Viewport,
    pub clock: Clock,
}

impl SceneContext {
    #[must_use]
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        Self {
            lerp: LerpState::new(config.smoothing.ease),
            oscillator: MorphOscillator::new(config.oscillation_speed),
            viewport,
            clock: Clock::new(),
        }
    }
}
