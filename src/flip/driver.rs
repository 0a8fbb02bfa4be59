use instant::Instant;

use crate::sprite::{FramePosition, FrameTable, TARGET_FPS, TARGET_FRAME};

/// Run length in milliseconds: time to reach the target frame at the
/// logical playback rate (252 / 45 fps ≈ 5600 ms).
pub fn total_duration_ms() -> f64 {
    (TARGET_FRAME as f64 / TARGET_FPS) * 1000.0
}

/// What a driver tick asks the caller to do with the visible offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStep {
    /// A new frame came due; show this offset.
    Frame(FramePosition),
    /// Same frame as last tick (or out of table bounds); keep showing the
    /// previous offset.
    Hold,
    /// Run complete. Offset is the exact target frame, snapped so
    /// floating-point drift can't leave the display one frame short.
    Settled(FramePosition),
}

/// One in-flight flip run. Maps wall-clock elapsed time to a monotonically
/// non-decreasing frame index; drops out of scope when the run settles.
pub struct AnimationDriver {
    start: Instant,
    duration_ms: f64,
    last_frame: Option<usize>,
}

impl AnimationDriver {
    pub fn start_at(start: Instant) -> Self {
        Self {
            start,
            duration_ms: total_duration_ms(),
            last_frame: None,
        }
    }

    /// Advance to `now`. Called once per displayed frame; the display
    /// refresh cadence is independent of the logical rate baked into the
    /// duration.
    pub fn tick(&mut self, now: Instant, table: &FrameTable) -> DriverStep {
        let elapsed_ms = now.duration_since(self.start).as_secs_f64() * 1000.0;
        let progress = (elapsed_ms / self.duration_ms).min(1.0);

        if progress >= 1.0 {
            // floor() under-counts the last fractional frame, so settle on
            // the exact target rather than the last computed index.
            return DriverStep::Settled(table.target());
        }

        let frame = (progress * TARGET_FRAME as f64) as usize;
        if Some(frame) != self.last_frame {
            if let Some(pos) = table.get(frame) {
                self.last_frame = Some(frame);
                return DriverStep::Frame(pos);
            }
        }
        DriverStep::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn duration_is_target_over_fps() {
        assert!((total_duration_ms() - 5600.0).abs() < 1e-9);
    }

    #[test]
    fn midpoint_hits_frame_126() {
        let table = FrameTable::build();
        let t0 = Instant::now();
        let mut driver = AnimationDriver::start_at(t0);

        let step = driver.tick(t0 + Duration::from_millis(2800), &table);
        assert_eq!(
            step,
            DriverStep::Frame(FramePosition { x: -3072, y: -7500 })
        );
    }

    #[test]
    fn repeated_tick_on_same_frame_holds() {
        let table = FrameTable::build();
        let t0 = Instant::now();
        let mut driver = AnimationDriver::start_at(t0);

        let at = t0 + Duration::from_millis(2800);
        assert!(matches!(driver.tick(at, &table), DriverStep::Frame(_)));
        assert_eq!(driver.tick(at, &table), DriverStep::Hold);
    }

    #[test]
    fn frames_never_regress() {
        let table = FrameTable::build();
        let t0 = Instant::now();
        let mut driver = AnimationDriver::start_at(t0);

        let mut last = FramePosition { x: 0, y: 0 };
        let mut last_index = 0usize;
        // Uneven tick cadence, like a real display loop.
        for ms in (0..5600).step_by(13) {
            match driver.tick(t0 + Duration::from_millis(ms), &table) {
                DriverStep::Frame(pos) => {
                    let index = (0..256).find(|&i| table.get(i) == Some(pos)).unwrap();
                    assert!(index >= last_index, "frame index regressed");
                    assert!(index <= TARGET_FRAME);
                    last_index = index;
                    last = pos;
                }
                DriverStep::Hold => {}
                DriverStep::Settled(_) => panic!("settled before the duration elapsed"),
            }
        }
        assert_ne!(last, FramePosition { x: 0, y: 0 });
    }

    #[test]
    fn settles_on_exact_target_frame() {
        let table = FrameTable::build();
        let t0 = Instant::now();
        let mut driver = AnimationDriver::start_at(t0);

        let step = driver.tick(t0 + Duration::from_millis(5600), &table);
        assert_eq!(step, DriverStep::Settled(table.target()));

        // Overshooting the duration still snaps to the same frame.
        let step = driver.tick(t0 + Duration::from_millis(9999), &table);
        assert_eq!(step, DriverStep::Settled(table.target()));
    }

    #[test]
    fn zero_elapsed_shows_first_frame() {
        let table = FrameTable::build();
        let t0 = Instant::now();
        let mut driver = AnimationDriver::start_at(t0);

        assert_eq!(
            driver.tick(t0, &table),
            DriverStep::Frame(FramePosition { x: 0, y: 0 })
        );
    }
}
