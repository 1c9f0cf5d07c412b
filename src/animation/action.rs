use std::sync::Arc;

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;
use crate::animation::values::MorphWeightData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Playback state of one clip inside a mixer.
///
/// A fresh action is stopped; [`play`](Self::play) starts it.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    /// Unfolded ping-pong playhead; `time` is derived from it.
    phase: f32,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: false,
            phase: 0.0,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Starts (or resumes) playback.
    pub fn play(&mut self) -> &mut Self {
        self.enabled = true;
        self.paused = false;
        self
    }

    /// Stops playback and rewinds to the start.
    pub fn stop(&mut self) -> &mut Self {
        self.enabled = false;
        self.time = 0.0;
        self.phase = 0.0;
        for cursor in &mut self.track_cursors {
            cursor.last_index = 0;
        }
        self
    }

    pub fn set_loop(&mut self, mode: LoopMode) -> &mut Self {
        self.loop_mode = mode;
        self
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.enabled && !self.paused && self.weight > 0.0
    }

    /// Advances local time by `dt * time_scale`, honouring the loop mode.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        let step = dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                self.time += step;
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time = (self.time + step).rem_euclid(duration);
            }
            LoopMode::PingPong => {
                self.phase += step;
                let period = duration * 2.0;
                let t = self.phase.rem_euclid(period);
                self.time = if t > duration { period - t } else { t };
            }
        }
    }

    /// Samples track `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t
                .sample_with_cursor(self.time, cursor)
                .map(TrackValue::Vector3),
            TrackData::Quaternion(t) => t
                .sample_with_cursor(self.time, cursor)
                .map(TrackValue::Quaternion),
            TrackData::MorphWeights(t) => t
                .sample_with_cursor(self.time, cursor)
                .map(TrackValue::MorphWeights),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(glam::Vec3),
    Quaternion(glam::Quat),
    MorphWeights(MorphWeightData),
}
