/// Linear opacity animation advanced by an external clock.
///
/// The driver never suspends or loops on its own: every frame the owner calls [`Fade::tick`]
/// with the frame delta. It completes once the accumulated time reaches the duration, and the
/// last value written is exactly the target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fade {
    start: f32,
    end: f32,
    duration: f32,
    elapsed: f32,
    alpha: f32,
    complete: bool,
}

impl Fade {
    pub fn new(start: f32, end: f32, duration: f32) -> Self {
        // NaN falls into the instant branch too
        if !(duration > 0.0) {
            return Self {
                start,
                end,
                duration: 0.0,
                elapsed: 0.0,
                alpha: end,
                complete: true,
            };
        }

        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            alpha: start,
            complete: false,
        }
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.complete {
            return self.alpha;
        }

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.elapsed >= self.duration {
            self.alpha = self.end;
            self.complete = true;
        } else {
            let t = self.elapsed / self.duration;
            self.alpha = self.start + (self.end - self.start) * t;
        }

        self.alpha
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn target(&self) -> f32 {
        self.end
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_duration_completes_immediately() {
        for duration in [0.0, -0.5, f32::NAN] {
            let fade = Fade::new(0.0, 1.0, duration);
            assert!(fade.is_complete());
            assert_eq!(fade.alpha(), 1.0);
        }
    }

    #[test]
    fn samples_are_monotonic_and_end_exactly_on_target() {
        let mut fade = Fade::new(1.0, 0.0, 0.3);
        let mut samples = vec![fade.alpha()];
        while !fade.is_complete() {
            samples.push(fade.tick(1.0 / 60.0));
        }

        assert_eq!(samples.first(), Some(&1.0));
        assert_eq!(samples.last(), Some(&0.0));
        assert!(samples.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn overshooting_frame_clamps_to_target() {
        let mut fade = Fade::new(0.0, 1.0, 0.3);
        assert_eq!(fade.tick(0.2), 0.2 / 0.3);
        assert_eq!(fade.tick(0.5), 1.0);
        assert!(fade.is_complete());
        assert_eq!(fade.tick(0.1), 1.0);
    }

    #[test]
    fn zero_and_invalid_deltas_do_not_advance() {
        let mut fade = Fade::new(0.0, 1.0, 0.3);
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert_eq!(fade.tick(dt), 0.0);
        }
        assert!(!fade.is_complete());
        assert_eq!(fade.target(), 1.0);
    }
}
