use std::time::{Duration, Instant};

/// Eased scroll from one offset to another.
///
/// The clock starts on the first `position` call, so an animation can be
/// queued by code that has no timestamp at hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimator {
    from: u32,
    to: u32,
    duration: Duration,
    started_at: Option<Instant>,
}

impl ScrollAnimator {
    pub fn new(from: u32, to: u32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            started_at: None,
        }
    }

    pub fn target(&self) -> u32 {
        self.to
    }

    /// Moves the destination without restarting the clock.
    pub fn retarget(&mut self, to: u32) {
        self.to = to;
    }

    /// Offset at `now`, plus whether the animation has finished.
    pub fn position(&mut self, now: Instant) -> (u32, bool) {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if self.duration.is_zero() || elapsed >= self.duration || self.from == self.to {
            return (self.to, true);
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = ease_out_cubic(t);
        let from = self.from as f32;
        let to = self.to as f32;
        let value = from + (to - from) * eased;
        (value.round().max(0.0) as u32, false)
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::ScrollAnimator;

    #[test]
    fn animation_moves_monotonically_and_lands_on_target() {
        let t0 = Instant::now();
        let mut anim = ScrollAnimator::new(0, 100, Duration::from_millis(400));
        assert_eq!(anim.position(t0), (0, false));

        let mut last = 0;
        for ms in (40..400).step_by(40) {
            let (pos, done) = anim.position(t0 + Duration::from_millis(ms));
            assert!(!done);
            assert!(pos >= last);
            last = pos;
        }
        assert_eq!(anim.position(t0 + Duration::from_millis(400)), (100, true));
    }

    #[test]
    fn upward_animation_and_noop_animation() {
        let t0 = Instant::now();
        let mut up = ScrollAnimator::new(80, 20, Duration::from_millis(100));
        up.position(t0);
        let (mid, _) = up.position(t0 + Duration::from_millis(50));
        assert!(mid < 80 && mid > 20);

        let mut still = ScrollAnimator::new(5, 5, Duration::from_millis(100));
        assert_eq!(still.position(t0), (5, true));
    }

    #[test]
    fn retarget_keeps_clock_and_lands_on_new_target() {
        let t0 = Instant::now();
        let mut anim = ScrollAnimator::new(0, 50, Duration::from_millis(100));
        anim.position(t0);
        anim.retarget(70);
        assert_eq!(anim.target(), 70);
        assert_eq!(anim.position(t0 + Duration::from_millis(100)), (70, true));
    }
}
