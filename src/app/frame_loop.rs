use std::cell::Cell;
use std::rc::Rc;

use crate::app::running::{FrameReport, RunningGiant};
use crate::renderer::Renderer;

/// Cloneable stop flag for a frame loop.
///
/// Stopping is final: a stopped loop renders no further frames.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Drives a [`RunningGiant`] frame by frame until stopped.
pub struct FrameLoop<R: Renderer> {
    running: RunningGiant<R>,
    stop: StopHandle,
    frames: u64,
}

impl<R: Renderer> FrameLoop<R> {
    #[must_use]
    pub fn new(running: RunningGiant<R>) -> Self {
        Self::with_stop_handle(running, StopHandle::new())
    }

    /// Uses an existing handle, e.g. one handed out before the asset loaded.
    #[must_use]
    pub fn with_stop_handle(running: RunningGiant<R>, stop: StopHandle) -> Self {
        Self {
            running,
            stop,
            frames: 0,
        }
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn running(&self) -> &RunningGiant<R> {
        &self.running
    }

    pub fn running_mut(&mut self) -> &mut RunningGiant<R> {
        &mut self.running
    }

    #[must_use]
    pub fn into_running(self) -> RunningGiant<R> {
        self.running
    }

    /// Runs one clock-timed frame. `None` once stopped; a render error stops
    /// the loop.
    pub fn step(&mut self) -> Option<FrameReport> {
        self.step_with(RunningGiant::tick)
    }

    /// One frame of exactly `delta` seconds.
    pub fn step_fixed(&mut self, delta: f32) -> Option<FrameReport> {
        self.step_with(|running| running.frame(delta))
    }

    /// Runs up to `frames` clock-timed frames and returns how many ran.
    pub fn run_for(&mut self, frames: u64) -> u64 {
        self.run_with(frames, RunningGiant::tick)
    }

    /// Like [`run_for`](Self::run_for) with a fixed `delta` per frame.
    pub fn run_fixed(&mut self, frames: u64, delta: f32) -> u64 {
        self.run_with(frames, |running| running.frame(delta))
    }

    fn run_with<F>(&mut self, frames: u64, mut advance: F) -> u64
    where
        F: FnMut(&mut RunningGiant<R>) -> crate::errors::Result<FrameReport>,
    {
        let mut ran = 0;
        while ran < frames && self.step_with(&mut advance).is_some() {
            ran += 1;
        }
        ran
    }

    fn step_with<F>(&mut self, advance: F) -> Option<FrameReport>
    where
        F: FnOnce(&mut RunningGiant<R>) -> crate::errors::Result<FrameReport>,
    {
        if self.stop.is_stopped() {
            return None;
        }
        match advance(&mut self.running) {
            Ok(report) => {
                self.frames += 1;
                Some(report)
            }
            Err(err) => {
                log::error!("Frame {} failed, stopping loop: {err}", self.frames);
                self.stop.stop();
                None
            }
        }
    }
}
