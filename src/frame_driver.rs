use std::thread;
use std::time::{Duration, Instant};

/// Everything the physics needs to know about one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds elapsed since the previous frame.
    pub dt: f32,
    pub width: f32,
    pub height: f32,
}

/// Source of frames. Returning `None` is the close request that ends the loop.
pub trait FrameClock {
    fn next_frame(&mut self) -> Option<FrameInput>;
}

/// Deterministic clock: every frame lasts exactly `1 / target_fps` seconds.
#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: f32,
    width: f32,
    height: f32,
    remaining: u64,
}

impl FixedClock {
    pub fn new(target_fps: u32, width: f32, height: f32, total_frames: u64) -> Self {
        Self {
            dt: 1.0 / target_fps.max(1) as f32,
            width,
            height,
            remaining: total_frames,
        }
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(FrameInput { dt: self.dt, width: self.width, height: self.height })
    }
}

/// Wall-clock paced frames: sleeps to hold the target rate and reports the measured
/// time between consecutive frames as `dt`.
#[derive(Debug)]
pub struct RealtimeClock {
    frame_duration: Duration,
    width: f32,
    height: f32,
    remaining: u64,
    last_frame: Option<Instant>,
}

impl RealtimeClock {
    pub fn new(target_fps: u32, width: f32, height: f32, total_frames: u64) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            width,
            height,
            remaining: total_frames,
            last_frame: None,
        }
    }
}

impl FrameClock for RealtimeClock {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let dt = match self.last_frame {
            // No previous frame to measure against on the first call.
            None => self.frame_duration,
            Some(last) => {
                let elapsed = last.elapsed();
                if elapsed < self.frame_duration {
                    thread::sleep(self.frame_duration - elapsed);
                }
                last.elapsed()
            }
        };
        self.last_frame = Some(Instant::now());

        Some(FrameInput {
            dt: dt.as_secs_f32(),
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_stops_after_budget() {
        let mut clock = FixedClock::new(50, 800.0, 450.0, 3);
        let frames: Vec<FrameInput> = std::iter::from_fn(|| clock.next_frame()).collect();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert!((frame.dt - 0.02).abs() < 1e-7);
            assert_eq!((frame.width, frame.height), (800.0, 450.0));
        }
        assert!(clock.next_frame().is_none());
    }

    #[test]
    fn zero_budget_closes_immediately() {
        assert!(FixedClock::new(60, 1.0, 1.0, 0).next_frame().is_none());
        assert!(RealtimeClock::new(60, 1.0, 1.0, 0).next_frame().is_none());
    }

    #[test]
    fn realtime_clock_holds_the_target_rate() {
        let mut clock = RealtimeClock::new(200, 320.0, 240.0, 3);
        let first = clock.next_frame().unwrap();
        assert!((first.dt - 0.005).abs() < 1e-6);
        let second = clock.next_frame().unwrap();
        assert!(second.dt >= 0.005 - 1e-4, "dt {} shorter than a frame", second.dt);
        assert!(clock.next_frame().is_some());
        assert!(clock.next_frame().is_none());
    }
}
