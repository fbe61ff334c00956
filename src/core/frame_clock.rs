//=========================================================================
// Frame Clock
//
// Measures the time between presented frames and paces `display()` when
// a framerate limit or vertical sync is requested.
//
// Vertical sync is approximated by pacing to the display refresh rate
// reported by the backend; the real buffer swap belongs to the rendering
// collaborator.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== FrameClock ==========================================================

/// Per-window frame timer and limiter.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    frame_time: Duration,
    limit: Option<Duration>,
    vsync: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: Duration::ZERO,
            limit: None,
            vsync: None,
        }
    }

    /// Caps presentation to `fps` frames per second (`None` or 0 = uncapped).
    pub fn set_framerate_limit(&mut self, fps: Option<u32>) {
        self.limit = fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));
    }

    /// Paces presentation to a display refresh rate in Hz (`None` = off).
    pub fn set_vsync_rate(&mut self, hz: Option<f64>) {
        self.vsync = hz
            .filter(|hz| *hz > 0.0)
            .map(|hz| Duration::from_secs_f64(1.0 / hz));
    }

    /// The interval the clock currently enforces (the stricter of both).
    pub fn target_interval(&self) -> Option<Duration> {
        match (self.limit, self.vsync) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Ends a frame: sleeps out the remaining interval and records the
    /// frame time.
    pub fn tick(&mut self) {
        if let Some(interval) = self.target_interval() {
            let elapsed = self.last_frame.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }

        let now = Instant::now();
        self.frame_time = now - self.last_frame;
        self.last_frame = now;
    }

    /// Duration of the last completed frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_by_default() {
        let clock = FrameClock::new();
        assert_eq!(clock.target_interval(), None);
        assert_eq!(clock.frame_time(), Duration::ZERO);
    }

    #[test]
    fn zero_limit_means_uncapped() {
        let mut clock = FrameClock::new();
        clock.set_framerate_limit(Some(0));
        assert_eq!(clock.target_interval(), None);
    }

    #[test]
    fn stricter_interval_wins() {
        let mut clock = FrameClock::new();
        clock.set_framerate_limit(Some(30));
        clock.set_vsync_rate(Some(60.0));

        let interval = clock.target_interval().unwrap();
        assert!(interval > Duration::from_millis(33));
        assert!(interval < Duration::from_millis(34));
    }

    #[test]
    fn tick_honours_limit() {
        let mut clock = FrameClock::new();
        clock.set_framerate_limit(Some(100));

        clock.tick();
        let start = Instant::now();
        clock.tick();

        assert!(start.elapsed() >= Duration::from_millis(9));
        assert!(clock.frame_time() >= Duration::from_millis(9));
    }
}
