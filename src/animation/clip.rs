use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;
use crate::animation::values::MorphWeightData;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    MorphWeights(KeyframeTrack<MorphWeightData>),
}

impl TrackData {
    #[must_use]
    pub fn duration(&self) -> f32 {
        match self {
            TrackData::Vector3(track) => track.duration(),
            TrackData::Quaternion(track) => track.duration(),
            TrackData::MorphWeights(track) => track.duration(),
        }
    }
}

/// One animated property of one named node.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

/// A named, time-bounded set of tracks. Duration is the latest keyframe
/// time across all tracks.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.duration())
            .fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            tracks,
        }
    }
}
