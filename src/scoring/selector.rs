//! Weighted hexagram selection by cumulative draw.

use serde::Serialize;

use crate::hexagram::{HexagramDistribution, HexagramId};
use crate::rng::Lcg64;

/// The result of one weighted draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawOutcome {
    /// The selected hexagram.
    pub hexagram: HexagramId,
    /// The uniform value consumed from the generator, kept so a reported
    /// result can be replayed.
    pub draw: f64,
    /// True when the cumulative walk exhausted all 64 entries without
    /// covering `draw` and the defined fallback (identifier 1) was used.
    pub fallback: bool,
}

/// Draw one hexagram: a single uniform value, then a cumulative walk over
/// the entries in identifier order. The first entry whose running sum
/// exceeds the draw wins.
pub fn draw_hexagram(distribution: &HexagramDistribution, rng: &mut Lcg64) -> DrawOutcome {
    walk(distribution, rng.next_f64())
}

/// The walk itself, split out so the underflow path is testable without
/// steering the generator.
fn walk(distribution: &HexagramDistribution, draw: f64) -> DrawOutcome {
    let mut cumulative = 0.0;
    for (id, probability) in distribution.iter() {
        cumulative += probability;
        if cumulative > draw {
            return DrawOutcome {
                hexagram: id,
                draw,
                fallback: false,
            };
        }
    }
    // Floating-point underflow: the running sum landed just below the draw.
    tracing::warn!(draw, cumulative, "cumulative walk exhausted, using fallback");
    DrawOutcome {
        hexagram: HexagramId::FALLBACK,
        draw,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform() -> HexagramDistribution {
        HexagramDistribution::from_probabilities([1.0 / 64.0; 64]).unwrap()
    }

    #[test]
    fn test_same_seed_same_selection() {
        let dist = uniform();
        let first = draw_hexagram(&dist, &mut Lcg64::new(42));
        for _ in 0..5 {
            let again = draw_hexagram(&dist, &mut Lcg64::new(42));
            assert_eq!(again.hexagram, first.hexagram);
            assert_eq!(again.draw, first.draw);
        }
    }

    #[test]
    fn test_selection_always_in_range() {
        let mut point = [0.0; 64];
        point[40] = 1.0;
        let dists = [
            uniform(),
            HexagramDistribution::from_probabilities(point).unwrap(),
        ];
        for dist in &dists {
            for seed in 0..500 {
                let outcome = draw_hexagram(dist, &mut Lcg64::new(seed));
                assert!((1..=64).contains(&outcome.hexagram.get()));
            }
        }
    }

    #[test]
    fn test_point_mass_always_selected() {
        let mut point = [0.0; 64];
        point[27] = 1.0;
        let dist = HexagramDistribution::from_probabilities(point).unwrap();
        for seed in [0, 1, 7, 42, u64::MAX] {
            let outcome = draw_hexagram(&dist, &mut Lcg64::new(seed));
            assert_eq!(outcome.hexagram.get(), 28);
            assert!(!outcome.fallback);
        }
    }

    #[test]
    fn test_walk_respects_identifier_order() {
        // 40% on id 1, 60% on id 2: draws under 0.4 hit 1, above hit 2.
        let mut probs = [0.0; 64];
        probs[0] = 0.4;
        probs[1] = 0.6;
        let dist = HexagramDistribution::from_probabilities(probs).unwrap();
        assert_eq!(walk(&dist, 0.0).hexagram.get(), 1);
        assert_eq!(walk(&dist, 0.39).hexagram.get(), 1);
        assert_eq!(walk(&dist, 0.41).hexagram.get(), 2);
        assert_eq!(walk(&dist, 0.99).hexagram.get(), 2);
    }

    #[test]
    fn test_exhausted_walk_falls_back_to_hexagram_one() {
        // Nine equal ninths renormalize to a running sum that tops out at
        // 0.9999999999999996, strictly below this draw.
        let mut probs = [0.0; 64];
        for slot in probs.iter_mut().take(9) {
            *slot = 1.0 / 9.0;
        }
        let dist = HexagramDistribution::from_probabilities(probs).unwrap();
        let outcome = walk(&dist, 0.9999999999999999);
        assert!(outcome.fallback);
        assert_eq!(outcome.hexagram, HexagramId::FALLBACK);
    }
}
