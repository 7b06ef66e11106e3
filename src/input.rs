// Input tracker: the live pointer plus a short, fading history of where it has been.
//
// The trail is newest-first. Every point decays by the same factor each frame, so ages never
// increase from front to back and expired points are always at the back.

use crate::types::{PointerState, TrailPoint};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::trace;

/// Minimum time between two trail samples.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(16);
/// A new sample must move strictly more than this (logical px) in x or y.
pub const MIN_SAMPLE_DISTANCE: f32 = 3.0;
/// Points whose age is not above this are dropped.
pub const AGE_EVICTION_THRESHOLD: f32 = 0.01;
/// Up-front trail allocation; longer trails grow on demand.
const INITIAL_TRAIL_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct InputTracker {
    pointer: PointerState,
    trail: VecDeque<TrailPoint>,
    last_sample: Option<Instant>,
    trail_length: usize,
    trail_decay: f32,
}

impl InputTracker {
    pub fn new(trail_length: usize, trail_decay: f32) -> Self {
        Self {
            pointer: PointerState::ABSENT,
            trail: VecDeque::with_capacity(trail_length.min(INITIAL_TRAIL_CAPACITY)),
            last_sample: None,
            trail_length,
            trail_decay,
        }
    }

    /// Surface-local coordinates of the latest pointer move.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = PointerState { x, y };
    }

    /// The glow vanishes instead of freezing where the pointer left.
    pub fn pointer_leave(&mut self) {
        self.pointer = PointerState::ABSENT;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Newest first.
    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    /// Maybe record the current pointer as a new trail point. Returns true if one was added.
    pub fn sample(&mut self, now: Instant) -> bool {
        if self.trail_length == 0 {
            return false;
        }
        if let Some(last) = self.last_sample {
            if now.saturating_duration_since(last) < SAMPLE_INTERVAL {
                return false;
            }
        }
        if !self.pointer.is_present() {
            return false;
        }
        // The interval restarts even when the pointer barely moved.
        self.last_sample = Some(now);

        let PointerState { x, y } = self.pointer;
        if let Some(newest) = self.trail.front() {
            let moved = (x - newest.x).abs() > MIN_SAMPLE_DISTANCE
                || (y - newest.y).abs() > MIN_SAMPLE_DISTANCE;
            if !moved {
                return false;
            }
        }

        self.trail.push_front(TrailPoint { x, y, age: 1.0 });
        self.trail.truncate(self.trail_length);
        trace!(x, y, len = self.trail.len(), "trail sample");
        true
    }

    /// Age every point by one frame, then drop the expired tail.
    pub fn decay(&mut self) {
        for point in &mut self.trail {
            point.age *= self.trail_decay;
        }
        while let Some(oldest) = self.trail.back() {
            if oldest.age > AGE_EVICTION_THRESHOLD {
                break;
            }
            self.trail.pop_back();
        }
    }

    /// Per-frame update: sample, then decay.
    pub fn advance(&mut self, now: Instant) {
        self.sample(now);
        self.decay();
    }
}
