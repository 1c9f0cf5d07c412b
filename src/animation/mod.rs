//! Keyframe Animation
//!
//! Clip playback in the spirit of a scene-graph animation mixer:
//! [`AnimationClip`]s hold keyframe tracks addressed by node name, an
//! [`AnimationMixer`] bound to a subtree creates one [`AnimationAction`] per
//! clip, and each update samples the running actions into node transforms
//! and morph weights.

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::{Interpolatable, MorphWeightData, MAX_MORPH_TARGETS};
