//! Seed-deterministic target curves.

use pm_domain::constants::ROUND_TICKS;
use pm_domain::game::round1;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Seeds are drawn from this range so players can share and replay them.
pub const SEED_RANGE: RangeInclusive<u32> = 1000..=9999;

const SEGMENT_TICKS: RangeInclusive<usize> = 2..=4;
const FORCED_LOW_TICKS: RangeInclusive<usize> = 0..=5;
const FORCED_HIGH_TICKS: RangeInclusive<usize> = 24..=29;

/// Wattage band a curve segment is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Low,
    Mid,
    High,
}

impl Zone {
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    #[must_use]
    pub const fn range(self) -> RangeInclusive<f64> {
        match self {
            Self::Low => 10.0..=30.0,
            Self::Mid => 45.0..=90.0,
            Self::High => 100.0..=135.0,
        }
    }

    #[must_use]
    pub fn contains(self, watts: f64) -> bool {
        self.range().contains(&watts)
    }

    /// Zones a segment may follow `previous` with.
    #[must_use]
    pub const fn successors(previous: Option<Self>) -> &'static [Self] {
        match previous {
            None => &[Self::Low, Self::Mid, Self::High],
            Some(Self::Low) => &[Self::Mid, Self::High],
            Some(Self::Mid) => &[Self::Low, Self::High],
            Some(Self::High) => &[Self::Low, Self::Mid],
        }
    }

    fn sample(self, rng: &mut impl Rng) -> f64 {
        round1(rng.random_range(self.range()))
    }
}

/// Draws a fresh seed from [`SEED_RANGE`].
#[must_use]
pub fn random_seed() -> u32 {
    rand::rng().random_range(SEED_RANGE)
}

/// Generates the 30-tick target curve for `seed`.
///
/// The curve is a run of 2-4 tick segments, each from a different zone than
/// the one before. One of the first six ticks is forced low and one of the
/// last six is forced high.
#[must_use]
pub fn generate(seed: u32) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    let mut curve = Vec::with_capacity(ROUND_TICKS);
    let mut previous: Option<Zone> = None;

    while curve.len() < ROUND_TICKS {
        let ticks = rng.random_range(SEGMENT_TICKS).min(ROUND_TICKS - curve.len());
        let Some(&zone) = Zone::successors(previous).choose(&mut rng) else {
            break;
        };
        previous = Some(zone);

        let watts = zone.sample(&mut rng);
        curve.extend(std::iter::repeat_n(watts, ticks));
    }

    if let Some(&last) = curve.last() {
        curve.resize(ROUND_TICKS, last);
    }

    curve[rng.random_range(FORCED_LOW_TICKS)] = Zone::Low.sample(&mut rng);
    curve[rng.random_range(FORCED_HIGH_TICKS)] = Zone::High.sample(&mut rng);
    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_curve() {
        assert_eq!(generate(4242), generate(4242));
        assert_ne!(generate(4242), generate(4243));
    }

    #[test]
    fn curve_has_full_length_and_extremes() {
        for seed in SEED_RANGE.step_by(97) {
            let curve = generate(seed);
            assert_eq!(curve.len(), ROUND_TICKS);
            assert!(curve[..=5].iter().any(|&w| Zone::Low.contains(w)), "seed {seed}: {curve:?}");
            assert!(curve[24..].iter().any(|&w| Zone::High.contains(w)), "seed {seed}: {curve:?}");
            assert!(curve.iter().all(|&w| Zone::ALL.into_iter().any(|z| z.contains(w))));
        }
    }

    #[test]
    fn successors_never_repeat_the_previous_zone() {
        assert_eq!(Zone::successors(None), Zone::ALL);
        for zone in Zone::ALL {
            let next = Zone::successors(Some(zone));
            assert_eq!(next.len(), 2);
            assert!(!next.contains(&zone));
        }
    }

    #[test]
    fn values_have_one_decimal() {
        for watts in generate(1234) {
            assert!((watts * 10.0 - (watts * 10.0).round()).abs() < 1e-9, "{watts}");
        }
    }

    #[test]
    fn random_seed_is_in_range() {
        for _ in 0..100 {
            assert!(SEED_RANGE.contains(&random_seed()));
        }
    }
}
