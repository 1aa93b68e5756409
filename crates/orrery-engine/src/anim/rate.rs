/// Slowest allowed global rate multiplier.
pub const RATE_MIN: f32 = 0.1;
/// Fastest allowed global rate multiplier.
pub const RATE_MAX: f32 = 3.0;
/// Multiplier in effect before any user input.
pub const RATE_DEFAULT: f32 = 1.0;

/// Global speed multiplier applied uniformly to every body.
///
/// Changes are a step, not a ramp: the next frame uses the new value as-is.
/// Because angles are derived from total elapsed time, a change rescales the whole
/// history, so bodies jump to the position they would have had at the new rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateController {
    multiplier: f32,
}

impl RateController {
    pub fn new() -> Self {
        Self { multiplier: RATE_DEFAULT }
    }

    /// Creates a controller starting at `initial` (clamped).
    pub fn with_multiplier(initial: f32) -> Self {
        let mut rate = Self::new();
        rate.set_multiplier(initial);
        rate
    }

    /// Stores `v` clamped to [`RATE_MIN`, `RATE_MAX`] and returns the stored value.
    ///
    /// Non-finite input is rejected and the previous multiplier is kept.
    pub fn set_multiplier(&mut self, v: f32) -> f32 {
        if v.is_nan() {
            log::warn!("ignoring non-numeric rate multiplier");
            return self.multiplier;
        }

        let clamped = v.clamp(RATE_MIN, RATE_MAX);
        if clamped != self.multiplier {
            log::debug!("rate multiplier {} -> {}", self.multiplier, clamped);
        }
        self.multiplier = clamped;
        self.multiplier
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }
}

impl Default for RateController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one() {
        assert_eq!(RateController::new().multiplier(), 1.0);
    }

    #[test]
    fn clamps_below_min() {
        let mut rate = RateController::new();
        assert_eq!(rate.set_multiplier(-5.0), 0.1);
        assert_eq!(rate.multiplier(), 0.1);
    }

    #[test]
    fn clamps_above_max() {
        let mut rate = RateController::new();
        rate.set_multiplier(10.0);
        assert_eq!(rate.multiplier(), 3.0);
    }

    #[test]
    fn in_range_unchanged() {
        let mut rate = RateController::new();
        rate.set_multiplier(1.5);
        assert_eq!(rate.multiplier(), 1.5);
    }

    #[test]
    fn nan_keeps_previous() {
        let mut rate = RateController::with_multiplier(2.0);
        assert_eq!(rate.set_multiplier(f32::NAN), 2.0);
        assert_eq!(rate.multiplier(), 2.0);
    }

    #[test]
    fn infinities_clamp_to_bounds() {
        let mut rate = RateController::new();
        assert_eq!(rate.set_multiplier(f32::INFINITY), RATE_MAX);
        assert_eq!(rate.set_multiplier(f32::NEG_INFINITY), RATE_MIN);
    }

    #[test]
    fn initial_value_is_clamped() {
        assert_eq!(RateController::with_multiplier(0.0).multiplier(), RATE_MIN);
    }
}
