//! Purity-controlled assembly of the 64-hexagram distribution.
//!
//! A naive outer product of trigram weights misallocates the eight pure
//! hexagrams (upper == lower): sharply skewed profiles starve them, flat
//! profiles inflate them. Each strategy here decides what aggregate share
//! `alpha` the pure hexagrams receive, then the shared assembly routine
//! splits `alpha` equally across the eight pure slots and rescales the
//! outer-product mass of the 56 mixed pairs to `1 - alpha`.
//!
//! Two strategies ship behind one seam:
//! - [`ConcentrationAdaptive`] ties `alpha` to the Herfindahl concentration
//!   of the trigram weights. This is the authoritative formula.
//! - [`FixedPurity`] is the legacy formula: a constant share, no
//!   concentration feedback. Retained so existing tuned deployments keep
//!   their published behavior.

use crate::hexagram::{HexagramDistribution, HexagramId};
use crate::orchestrator::RoleParameters;
use crate::trigram::{TrigramWeights, TRIGRAMS};

// =============================================================================
// Strategy seam
// =============================================================================

/// How a role's trigram weights become a hexagram distribution.
///
/// Injected into the orchestrator as a constructor argument; callers extend
/// selection behavior by implementing this trait, never by patching the
/// orchestrator.
pub trait SelectionStrategy: Send + Sync + std::fmt::Debug {
    /// Stable identifier for logs and result metadata.
    fn name(&self) -> &'static str;

    /// Assemble the full 64-entry distribution. Inputs are already
    /// validated: weights sum to 1, parameters passed
    /// [`RoleParameters::validate`].
    fn distribution(
        &self,
        weights: &TrigramWeights,
        params: &RoleParameters,
    ) -> HexagramDistribution;
}

// =============================================================================
// Concentration-adaptive strategy (Herfindahl)
// =============================================================================

/// Purity share scales with how concentrated the trigram profile already is.
///
/// `h_norm` maps the Herfindahl index from its natural range [1/8, 1] onto
/// [0, 1]; the target share is `alpha_min + (alpha_max - alpha_min) * k *
/// h_norm`, clamped back into the bounds. A profile dominated by one trigram
/// therefore lands on a pure hexagram more often than the outer product
/// alone would allow, and a flat profile less often.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcentrationAdaptive;

impl SelectionStrategy for ConcentrationAdaptive {
    fn name(&self) -> &'static str {
        "concentration_adaptive"
    }

    fn distribution(
        &self,
        weights: &TrigramWeights,
        params: &RoleParameters,
    ) -> HexagramDistribution {
        let h = weights.herfindahl();
        let h_norm = (h - 0.125) / (1.0 - 0.125);
        let raw_alpha = params.alpha_min + (params.alpha_max - params.alpha_min) * params.k * h_norm;
        let alpha = raw_alpha.clamp(params.alpha_min, params.alpha_max);
        tracing::debug!(
            strategy = self.name(),
            herfindahl = h,
            h_norm,
            alpha,
            "assembling hexagram distribution"
        );
        assemble(weights, alpha)
    }
}

// =============================================================================
// Fixed-purity strategy (legacy)
// =============================================================================

/// Constant purity share at the midpoint of the role's bounds, ignoring
/// concentration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPurity;

impl SelectionStrategy for FixedPurity {
    fn name(&self) -> &'static str {
        "fixed_purity"
    }

    fn distribution(
        &self,
        weights: &TrigramWeights,
        params: &RoleParameters,
    ) -> HexagramDistribution {
        let alpha = 0.5 * (params.alpha_min + params.alpha_max);
        assemble(weights, alpha)
    }
}

// =============================================================================
// Shared assembly
// =============================================================================

/// Below this distance from 1, the Herfindahl index is treated as fully
/// concentrated and the mixed-pair rescale (which divides by `1 - H`) is
/// skipped.
const DEGENERATE_EPS: f64 = 1e-12;

/// Build the 64-entry distribution for a given pure-mass share `alpha`.
///
/// Pure pairs each receive `alpha / 8`; mixed pairs receive their
/// outer-product mass rescaled so the 56 of them sum to `1 - alpha`. When
/// all trigram mass sits on one trigram the rescale denominator vanishes;
/// the defined behavior is to put all mass on that trigram's pure hexagram.
fn assemble(weights: &TrigramWeights, alpha: f64) -> HexagramDistribution {
    let h = weights.herfindahl();
    let mut probs = [0.0_f64; 64];

    if 1.0 - h < DEGENERATE_EPS {
        let dominant = weights.dominant();
        let id = HexagramId::from_trigrams(dominant, dominant);
        probs[(id.get() - 1) as usize] = 1.0;
        tracing::warn!(
            hexagram = id.get(),
            "degenerate trigram profile, all mass on one pure hexagram"
        );
        return HexagramDistribution::from_assembled(probs);
    }

    let scale = (1.0 - alpha) / (1.0 - h);
    for upper in TRIGRAMS {
        for lower in TRIGRAMS {
            let id = HexagramId::from_trigrams(upper, lower);
            let slot = &mut probs[(id.get() - 1) as usize];
            if upper == lower {
                *slot = alpha / 8.0;
            } else {
                *slot = weights.get(upper) * weights.get(lower) * scale;
            }
        }
    }

    // Entries must be non-negative at this point; a violation is an
    // arithmetic bug. Fatal in debug builds, clamped and logged in release.
    for (i, p) in probs.iter_mut().enumerate() {
        if *p < 0.0 {
            debug_assert!(false, "negative probability at hexagram {}", i + 1);
            tracing::warn!(
                code = "internal_drift",
                hexagram = i + 1,
                value = *p,
                "clamping negative probability"
            );
            *p = 0.0;
        }
    }

    HexagramDistribution::from_assembled(probs)
}
