//! Hexagram identifiers, the King Wen table, and probability distributions
//! over the 64 hexagrams.
//!
//! A hexagram is an ordered (upper, lower) trigram pair; the King Wen
//! sequence fixes which of the 64 pairs carries which identifier. Identifier
//! order (1..=64) is also the stable walk order of the weighted selector, so
//! the table below is load-bearing for reproducibility, not just display.

use std::ops::Index;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::trigram::{Trigram, TRIGRAMS};

// =============================================================================
// King Wen table
// =============================================================================

/// Hexagram number by `[upper.index()][lower.index()]`, canonical trigram
/// order on both axes.
const KING_WEN: [[u8; 8]; 8] = [
    [1, 10, 13, 25, 44, 6, 33, 12],
    [43, 58, 49, 17, 28, 47, 31, 45],
    [14, 38, 30, 21, 50, 64, 56, 35],
    [34, 54, 55, 51, 32, 40, 62, 16],
    [9, 61, 37, 42, 57, 59, 53, 20],
    [5, 60, 63, 3, 48, 29, 39, 8],
    [26, 41, 22, 27, 18, 4, 52, 23],
    [11, 19, 36, 24, 46, 7, 15, 2],
];

/// Identifier → (upper, lower), derived from [`KING_WEN`] once.
static TRIGRAM_PAIRS: Lazy<[(Trigram, Trigram); 64]> = Lazy::new(|| {
    let mut pairs = [(Trigram::Qian, Trigram::Qian); 64];
    for upper in TRIGRAMS {
        for lower in TRIGRAMS {
            let id = KING_WEN[upper.index()][lower.index()];
            pairs[(id - 1) as usize] = (upper, lower);
        }
    }
    pairs
});

/// The eight pure hexagrams (upper == lower), identifier ascending.
pub const PURE_HEXAGRAMS: [u8; 8] = [1, 2, 29, 30, 51, 52, 57, 58];

// =============================================================================
// HexagramId
// =============================================================================

/// A hexagram identifier in 1..=64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexagramId(u8);

impl HexagramId {
    pub fn new(id: u8) -> Result<Self, EngineError> {
        if (1..=64).contains(&id) {
            Ok(Self(id))
        } else {
            Err(EngineError::InvalidHexagramId { id })
        }
    }

    /// Identifier 1 (乾為天), the defined underflow fallback of the selector.
    pub const FALLBACK: HexagramId = HexagramId(1);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Look up the identifier for an (upper, lower) trigram pair.
    pub fn from_trigrams(upper: Trigram, lower: Trigram) -> Self {
        Self(KING_WEN[upper.index()][lower.index()])
    }

    /// The (upper, lower) trigram pair of this hexagram.
    pub fn trigrams(self) -> (Trigram, Trigram) {
        TRIGRAM_PAIRS[(self.0 - 1) as usize]
    }

    /// Whether upper and lower trigram coincide.
    pub fn is_pure(self) -> bool {
        let (upper, lower) = self.trigrams();
        upper == lower
    }

    /// All 64 identifiers, ascending.
    pub fn all() -> impl Iterator<Item = HexagramId> {
        (1..=64).map(HexagramId)
    }
}

impl std::fmt::Display for HexagramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// HexagramDistribution
// =============================================================================

/// Deviation from unit sum tolerated on caller-supplied distributions.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A probability distribution over the 64 hexagrams, indexed by identifier.
///
/// Entries are non-negative and sum to 1 within [`SUM_TOLERANCE`]. Built by a
/// [`SelectionStrategy`](crate::scoring::SelectionStrategy), or from raw
/// probabilities via [`HexagramDistribution::from_probabilities`] (which
/// validates and renormalizes).
#[derive(Debug, Clone, PartialEq)]
pub struct HexagramDistribution([f64; 64]);

// serde derives `Serialize` only for arrays up to length 32, so the
// `#[serde(transparent)]` derive cannot cover `[f64; 64]`. This manual impl
// reproduces the transparent representation: the inner array as a sequence.
impl Serialize for HexagramDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for p in self.0.iter() {
            seq.serialize_element(p)?;
        }
        seq.end()
    }
}

impl HexagramDistribution {
    /// Internal constructor for strategy output. Renormalizes to absorb
    /// floating-point drift; entries must already be non-negative.
    pub(crate) fn from_assembled(mut probabilities: [f64; 64]) -> Self {
        debug_assert!(probabilities.iter().all(|p| *p >= 0.0));
        let total: f64 = probabilities.iter().sum();
        debug_assert!((total - 1.0).abs() < SUM_TOLERANCE);
        if total > 0.0 {
            for p in probabilities.iter_mut() {
                *p /= total;
            }
        }
        Self(probabilities)
    }

    /// Validate and adopt a caller-supplied probability vector
    /// (index 0 is identifier 1).
    pub fn from_probabilities(probabilities: [f64; 64]) -> Result<Self, EngineError> {
        for (i, p) in probabilities.iter().enumerate() {
            if !p.is_finite() || *p < 0.0 {
                return Err(EngineError::invalid_distribution(format!(
                    "entry for hexagram {} is {}",
                    i + 1,
                    p
                )));
            }
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(EngineError::invalid_distribution(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }
        Ok(Self::from_assembled(probabilities))
    }

    pub fn probability(&self, id: HexagramId) -> f64 {
        self.0[(id.get() - 1) as usize]
    }

    /// Entries in identifier order, the selector's walk order.
    pub fn iter(&self) -> impl Iterator<Item = (HexagramId, f64)> + '_ {
        HexagramId::all().map(move |id| (id, self.probability(id)))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Aggregate probability of the eight pure hexagrams.
    pub fn pure_mass(&self) -> f64 {
        PURE_HEXAGRAMS
            .iter()
            .map(|id| self.0[(id - 1) as usize])
            .sum()
    }
}

impl Index<HexagramId> for HexagramDistribution {
    type Output = f64;

    fn index(&self, id: HexagramId) -> &f64 {
        &self.0[(id.get() - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_wen_is_a_bijection() {
        let mut seen = [false; 64];
        for upper in TRIGRAMS {
            for lower in TRIGRAMS {
                let id = HexagramId::from_trigrams(upper, lower);
                assert!(!seen[(id.get() - 1) as usize], "duplicate id {id}");
                seen[(id.get() - 1) as usize] = true;
                assert_eq!(id.trigrams(), (upper, lower));
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_pure_hexagrams_match_table_diagonal() {
        let mut diagonal: Vec<u8> = TRIGRAMS
            .iter()
            .map(|t| HexagramId::from_trigrams(*t, *t).get())
            .collect();
        diagonal.sort_unstable();
        assert_eq!(diagonal, PURE_HEXAGRAMS.to_vec());
        for id in HexagramId::all() {
            assert_eq!(id.is_pure(), PURE_HEXAGRAMS.contains(&id.get()));
        }
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(
            HexagramId::from_trigrams(Trigram::Qian, Trigram::Qian).get(),
            1
        );
        assert_eq!(
            HexagramId::from_trigrams(Trigram::Kun, Trigram::Qian).get(),
            11
        );
        assert_eq!(
            HexagramId::from_trigrams(Trigram::Kan, Trigram::Li).get(),
            63
        );
        assert_eq!(
            HexagramId::from_trigrams(Trigram::Li, Trigram::Kan).get(),
            64
        );
    }

    #[test]
    fn test_id_range_enforced() {
        assert!(HexagramId::new(0).is_err());
        assert!(HexagramId::new(65).is_err());
        assert_eq!(HexagramId::new(64).unwrap().get(), 64);
    }

    #[test]
    fn test_from_probabilities_validates() {
        let mut probs = [0.0; 64];
        probs[0] = 1.0;
        let dist = HexagramDistribution::from_probabilities(probs).unwrap();
        assert_eq!(dist.probability(HexagramId::FALLBACK), 1.0);
        assert!((dist.sum() - 1.0).abs() < 1e-12);

        let mut short = [1.0 / 64.0; 64];
        short[10] = 0.0;
        assert_eq!(
            HexagramDistribution::from_probabilities(short)
                .unwrap_err()
                .code(),
            "invalid_distribution"
        );

        let mut negative = [1.0 / 64.0; 64];
        negative[3] = -negative[3];
        assert!(HexagramDistribution::from_probabilities(negative).is_err());
    }
}
