use pm_domain::constants::ROUND_TICKS;
use pm_domain::game::{Difficulty, round1};

/// Points for a perfect tick before the difficulty multiplier.
pub const MAX_TICK_POINTS: f64 = 100.0;

/// Tolerance band for every tick of a round.
#[must_use]
pub fn tolerance_curve(difficulty: Difficulty) -> Vec<f64> {
    vec![difficulty.tolerance(); ROUND_TICKS]
}

/// Scores one tick.
///
/// Points fall linearly from `100 × multiplier` at an exact hit to zero at the
/// edge of the tolerance band; anything outside the band scores nothing.
#[must_use]
pub fn tick_score(actual: f64, target: f64, tolerance: f64, difficulty: Difficulty) -> f64 {
    if !actual.is_finite() || !target.is_finite() {
        return 0.0;
    }

    let distance = (actual - target).abs();
    let multiplier = difficulty.multiplier();

    if tolerance <= 0.0 {
        return if distance <= f64::EPSILON { round1(MAX_TICK_POINTS * multiplier) } else { 0.0 };
    }
    if distance > tolerance {
        return 0.0;
    }

    round1(MAX_TICK_POINTS * (1.0 - distance / tolerance) * multiplier)
}
