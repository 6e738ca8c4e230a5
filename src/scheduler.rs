// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

pub const TARGET_FPS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Rendering,
    Idle,
}

/// Fixed-step pacing: one simulation step per presented frame, no catch-up.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    frame_time: Duration,
    frame_start: Instant,
    phase: Phase,
    ticks: u64,
}

impl FrameScheduler {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            frame_time: frame_time_for(fps),
            frame_start: now,
            phase: Phase::Idle,
            ticks: 0,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn enter_idle(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Time still to wait before the next tick may start, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.frame_start);
        if elapsed < self.frame_time {
            Some(self.frame_time - elapsed)
        } else {
            None
        }
    }

    /// Marks the start of a new tick; the caller then steps the scene and redraws.
    pub fn begin_tick(&mut self, now: Instant) {
        debug_assert_eq!(self.phase, Phase::Idle);
        let late = now.saturating_duration_since(self.frame_start + self.frame_time);
        if self.ticks > 0 && late > self.frame_time {
            log::trace!("tick {} started {:?} late", self.ticks, late);
        }
        self.frame_start = now;
        self.phase = Phase::Rendering;
        self.ticks += 1;
    }
}

// Integer milliseconds, so 60 fps paces at 16 ms rather than 16.67.
fn frame_time_for(fps: u32) -> Duration {
    Duration::from_millis(u64::from(1000 / fps.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_truncates_to_sixteen_ms() {
        let s = FrameScheduler::new(TARGET_FPS, Instant::now());
        assert_eq!(s.frame_time(), Duration::from_millis(16));
        assert_eq!(FrameScheduler::new(1, Instant::now()).frame_time(), Duration::from_secs(1));
    }

    #[test]
    fn remaining_counts_down_then_clears() {
        let t0 = Instant::now();
        let s = FrameScheduler::new(TARGET_FPS, t0);

        assert_eq!(s.remaining(t0), Some(Duration::from_millis(16)));
        assert_eq!(
            s.remaining(t0 + Duration::from_millis(10)),
            Some(Duration::from_millis(6))
        );
        assert_eq!(s.remaining(t0 + Duration::from_millis(16)), None);
        assert_eq!(s.remaining(t0 + Duration::from_millis(40)), None);
    }

    #[test]
    fn overrun_tick_starts_late_without_catch_up() {
        let t0 = Instant::now();
        let mut s = FrameScheduler::new(TARGET_FPS, t0);

        let late = t0 + Duration::from_millis(50);
        assert_eq!(s.remaining(late), None);
        s.begin_tick(late);
        assert_eq!(s.ticks(), 1);
        assert_eq!(s.phase(), Phase::Rendering);

        s.enter_idle();
        assert_eq!(s.remaining(late), Some(Duration::from_millis(16)));
    }

    #[test]
    fn phases_alternate() {
        let t0 = Instant::now();
        let mut s = FrameScheduler::new(TARGET_FPS, t0);
        assert_eq!(s.phase(), Phase::Idle);
        for i in 1..=3u64 {
            s.begin_tick(t0 + Duration::from_millis(16 * i));
            assert_eq!(s.phase(), Phase::Rendering);
            s.enter_idle();
            assert_eq!(s.phase(), Phase::Idle);
        }
        assert_eq!(s.ticks(), 3);
    }
}
