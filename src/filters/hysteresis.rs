use super::CursorFilter;

/// Exponential smoothing whose response depends on how far the input jumped.
///
/// Samples within `threshold` (Chebyshev distance) of the current position
/// are treated as jitter and divided by `noise_factor`; larger jumps use the
/// faster `motion_factor`. Both divisors are at least 1, so the output moves
/// towards the input without passing it.
pub struct HysteresisFilter {
    origin: (f64, f64),
    current_x: f64,
    current_y: f64,
    noise_factor: f64,
    motion_factor: f64,
    threshold: f64,
}

impl HysteresisFilter {
    /// Create a filter resting at `origin`
    ///
    /// # Panics
    ///
    /// Panics if a factor is below 1.0 or the threshold is negative
    #[must_use]
    pub fn new(origin: (f64, f64), noise_factor: f64, motion_factor: f64, threshold: f64) -> Self {
        assert!(noise_factor >= 1.0, "Noise factor must be at least 1.0");
        assert!(motion_factor >= 1.0, "Motion factor must be at least 1.0");
        assert!(threshold >= 0.0, "Threshold must be non-negative");
        Self {
            origin,
            current_x: origin.0,
            current_y: origin.1,
            noise_factor,
            motion_factor,
            threshold,
        }
    }

    /// Current smoothed position
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.current_x, self.current_y)
    }

    /// Divisor for a sample at the given distance from the current position
    #[must_use]
    pub fn factor_for(&self, distance: f64) -> f64 {
        if distance < self.threshold {
            self.noise_factor
        } else {
            self.motion_factor
        }
    }
}

/// Chebyshev distance between two points
#[must_use]
pub fn chebyshev_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

impl CursorFilter for HysteresisFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        let distance = chebyshev_distance((x, y), (self.current_x, self.current_y));
        let factor = self.factor_for(distance);

        self.current_x += (x - self.current_x) / factor;
        self.current_y += (y - self.current_y) / factor;

        (self.current_x, self.current_y)
    }

    fn reset(&mut self) {
        self.current_x = self.origin.0;
        self.current_y = self.origin.1;
    }

    fn name(&self) -> &str {
        "HysteresisFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin() {
        let filter = HysteresisFilter::new((960.0, 540.0), 6.0, 4.0, 10.0);
        assert_eq!(filter.position(), (960.0, 540.0));
    }

    #[test]
    fn test_large_jump_uses_motion_factor() {
        let mut filter = HysteresisFilter::new((0.0, 0.0), 6.0, 4.0, 10.0);
        let (x, y) = filter.apply(100.0, 40.0);
        assert_eq!(x, 25.0);
        assert_eq!(y, 10.0);
    }

    #[test]
    fn test_small_jump_uses_noise_factor() {
        let mut filter = HysteresisFilter::new((0.0, 0.0), 6.0, 4.0, 10.0);
        let (x, y) = filter.apply(6.0, -3.0);
        assert_eq!(x, 1.0);
        assert_eq!(y, -0.5);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let filter = HysteresisFilter::new((0.0, 0.0), 6.0, 4.0, 10.0);
        assert_eq!(filter.factor_for(9.999), 6.0);
        assert_eq!(filter.factor_for(10.0), 4.0);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut filter = HysteresisFilter::new((5.0, 5.0), 6.0, 4.0, 10.0);
        filter.apply(500.0, 500.0);
        filter.reset();
        assert_eq!(filter.position(), (5.0, 5.0));
    }

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance((0.0, 0.0), (3.0, -7.0)), 7.0);
        assert_eq!(chebyshev_distance((1.0, 1.0), (1.0, 1.0)), 0.0);
    }

    #[test]
    #[should_panic(expected = "Motion factor must be at least 1.0")]
    fn test_overshooting_factor_panics() {
        let _ = HysteresisFilter::new((0.0, 0.0), 6.0, 0.5, 10.0);
    }
}
