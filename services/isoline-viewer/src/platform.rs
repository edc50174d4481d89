//! Headless stand-in for a windowing system.

use std::time::Instant;

use isoline::{FramePlatform, PlatformTick};

/// Supplies frame deltas and requests quit after a fixed number of frames.
#[derive(Debug)]
pub struct HeadlessPlatform {
    frame_limit: u64,
    polled: u64,
    fixed_dt: Option<f32>,
    last_poll: Option<Instant>,
}

impl HeadlessPlatform {
    /// With `fixed_dt = None` each delta is the wall-clock time since the
    /// previous poll. The first frame always has a zero delta.
    pub fn new(frame_limit: u64, fixed_dt: Option<f32>) -> Self {
        Self {
            frame_limit,
            polled: 0,
            fixed_dt,
            last_poll: None,
        }
    }

    /// Frames handed out so far.
    pub fn frames(&self) -> u64 {
        self.polled
    }
}

impl FramePlatform for HeadlessPlatform {
    fn poll(&mut self) -> PlatformTick {
        if self.polled >= self.frame_limit {
            return PlatformTick {
                frame_delta: 0.0,
                quit_requested: true,
            };
        }

        let now = Instant::now();
        let frame_delta = match (self.fixed_dt, self.last_poll) {
            (_, None) => 0.0,
            (Some(dt), Some(_)) => dt,
            (None, Some(last)) => now.duration_since(last).as_secs_f32(),
        };

        self.last_poll = Some(now);
        self.polled += 1;

        PlatformTick {
            frame_delta,
            quit_requested: false,
        }
    }
}
