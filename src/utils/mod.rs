//! Utility Module
//!
//! - [`time`]: the frame [`Clock`] feeding the mixer and the morph oscillator

pub mod time;

pub use time::Clock;
