//! Per-role orchestration: run the scoring pipeline once for each of the
//! three roles and return the combined selection.
//!
//! Each role's computation is independent: its own energies, its own
//! parameters, its own generator seeded from the base seed and the role tag.
//! Evaluation order therefore never influences any role's draw.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::hexagram::HexagramId;
use crate::rng::{derive_seed, Lcg64};
use crate::scoring::{draw_hexagram, normalize, ConcentrationAdaptive, SelectionStrategy};
use crate::trigram::TrigramEnergies;

// =============================================================================
// Roles
// =============================================================================

/// The three independent roles a hexagram is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Engine,
    Interface,
    SafeMode,
}

/// All roles, in the order results are reported.
pub const ROLES: [Role; 3] = [Role::Engine, Role::Interface, Role::SafeMode];

impl Role {
    /// Stream tag for per-role seed derivation. Stable across releases;
    /// changing a tag changes every user's reported result.
    pub fn tag(self) -> u64 {
        match self {
            Self::Engine => 0,
            Self::Interface => 1,
            Self::SafeMode => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Interface => "interface",
            Self::SafeMode => "safemode",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Parameters
// =============================================================================

/// Design-time constants for one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleParameters {
    /// Softmax sharpness; must be positive and finite.
    pub temperature: f64,
    /// Gain on the concentration → purity-share mapping.
    pub k: f64,
    /// Lower bound on the aggregate pure-hexagram share, in [0, 1].
    pub alpha_min: f64,
    /// Upper bound on the aggregate pure-hexagram share, in [0, 1];
    /// must be >= `alpha_min`.
    pub alpha_max: f64,
}

impl RoleParameters {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(EngineError::invalid_temperature(self.temperature));
        }
        if !self.k.is_finite() {
            return Err(EngineError::invalid_purity_gain(self.k));
        }
        let bounds_ok = self.alpha_min.is_finite()
            && self.alpha_max.is_finite()
            && (0.0..=1.0).contains(&self.alpha_min)
            && (0.0..=1.0).contains(&self.alpha_max)
            && self.alpha_min <= self.alpha_max;
        if !bounds_ok {
            return Err(EngineError::invalid_purity_bounds(
                self.alpha_min,
                self.alpha_max,
            ));
        }
        Ok(())
    }
}

/// One [`RoleParameters`] per role.
///
/// `Default` carries the shipped constants; deployments override them via
/// the serde representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleParameterSet {
    pub engine: RoleParameters,
    pub interface: RoleParameters,
    pub safemode: RoleParameters,
}

impl Default for RoleParameterSet {
    fn default() -> Self {
        Self {
            // The engine role runs the sharpest: a person's core drive
            // should track their dominant trigram closely.
            engine: RoleParameters {
                temperature: 1.2,
                k: 1.2,
                alpha_min: 0.12,
                alpha_max: 0.20,
            },
            // Social presentation is noisier; flatter softmax, narrower
            // purity band.
            interface: RoleParameters {
                temperature: 1.5,
                k: 1.0,
                alpha_min: 0.10,
                alpha_max: 0.18,
            },
            // Stress responses concentrate hard, so the purity band sits
            // higher.
            safemode: RoleParameters {
                temperature: 1.0,
                k: 1.4,
                alpha_min: 0.15,
                alpha_max: 0.25,
            },
        }
    }
}

impl RoleParameterSet {
    pub fn get(&self, role: Role) -> &RoleParameters {
        match role {
            Role::Engine => &self.engine,
            Role::Interface => &self.interface,
            Role::SafeMode => &self.safemode,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for role in ROLES {
            self.get(role).validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// Input profile
// =============================================================================

/// The quiz output: one energy vector per role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripleOsProfile {
    pub engine: TrigramEnergies,
    pub interface: TrigramEnergies,
    pub safemode: TrigramEnergies,
}

impl TripleOsProfile {
    pub fn new(
        engine: TrigramEnergies,
        interface: TrigramEnergies,
        safemode: TrigramEnergies,
    ) -> Self {
        Self {
            engine,
            interface,
            safemode,
        }
    }

    pub fn get(&self, role: Role) -> &TrigramEnergies {
        match role {
            Role::Engine => &self.engine,
            Role::Interface => &self.interface,
            Role::SafeMode => &self.safemode,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// One role's selected hexagram plus the draw that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionResult {
    pub role: Role,
    pub hexagram_id: HexagramId,
    /// The uniform value consumed from the role's generator.
    pub draw: f64,
    /// Whether the cumulative-walk underflow fallback fired.
    pub fallback: bool,
}

/// The full analysis output: one selection per role, plus the base seed that
/// reproduces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripleOsSelection {
    pub engine: SelectionResult,
    pub interface: SelectionResult,
    pub safemode: SelectionResult,
    /// Re-running `analyze` with `Some(base_seed)` and the same profile and
    /// parameters reproduces this selection exactly.
    pub base_seed: u64,
}

impl TripleOsSelection {
    pub fn get(&self, role: Role) -> &SelectionResult {
        match role {
            Role::Engine => &self.engine,
            Role::Interface => &self.interface,
            Role::SafeMode => &self.safemode,
        }
    }
}

// =============================================================================
// Analyzer
// =============================================================================

/// The engine's entry point: parameters plus an injected selection strategy.
///
/// The strategy is a constructor argument, not ambient state, so callers can
/// swap selection behavior per analyzer instance without touching anything
/// shared.
#[derive(Debug, Clone)]
pub struct TripleOsAnalyzer {
    params: RoleParameterSet,
    strategy: Arc<dyn SelectionStrategy>,
}

impl TripleOsAnalyzer {
    /// Build an analyzer with the concentration-adaptive strategy.
    pub fn new(params: RoleParameterSet) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            strategy: Arc::new(ConcentrationAdaptive),
        })
    }

    /// Replace the selection strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn params(&self) -> &RoleParameterSet {
        &self.params
    }

    /// Run the full pipeline once per role.
    ///
    /// With `seed: None` a base seed is taken from OS entropy and reported
    /// in the result, so any produced selection remains replayable.
    pub fn analyze(
        &self,
        profile: &TripleOsProfile,
        seed: Option<u64>,
    ) -> Result<TripleOsSelection, EngineError> {
        // Fail before any draw: parameters again (they are plain data the
        // caller may have mutated) and every role's energies.
        self.params.validate()?;
        for role in ROLES {
            profile.get(role).validate()?;
        }

        let base_seed = seed.unwrap_or_else(rand::random);

        Ok(TripleOsSelection {
            engine: self.analyze_role(profile, Role::Engine, base_seed)?,
            interface: self.analyze_role(profile, Role::Interface, base_seed)?,
            safemode: self.analyze_role(profile, Role::SafeMode, base_seed)?,
            base_seed,
        })
    }

    fn analyze_role(
        &self,
        profile: &TripleOsProfile,
        role: Role,
        base_seed: u64,
    ) -> Result<SelectionResult, EngineError> {
        let params = self.params.get(role);
        let weights = normalize(profile.get(role), params.temperature)?;
        let distribution = self.strategy.distribution(&weights, params);

        let mut rng = Lcg64::new(derive_seed(base_seed, role.tag()));
        let outcome = draw_hexagram(&distribution, &mut rng);

        tracing::debug!(
            role = role.label(),
            strategy = self.strategy.name(),
            hexagram = outcome.hexagram.get(),
            draw = outcome.draw,
            fallback = outcome.fallback,
            "role scored"
        );

        Ok(SelectionResult {
            role,
            hexagram_id: outcome.hexagram,
            draw: outcome.draw,
            fallback: outcome.fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigram::Trigram;

    #[test]
    fn test_default_parameters_validate() {
        assert!(RoleParameterSet::default().validate().is_ok());
    }

    #[test]
    fn test_bad_parameters_rejected_at_construction() {
        let mut params = RoleParameterSet::default();
        params.interface.temperature = 0.0;
        assert!(matches!(
            TripleOsAnalyzer::new(params),
            Err(EngineError::InvalidTemperature { .. })
        ));

        let mut params = RoleParameterSet::default();
        params.safemode.alpha_min = 0.3;
        params.safemode.alpha_max = 0.2;
        assert_eq!(
            TripleOsAnalyzer::new(params).unwrap_err().code(),
            "invalid_purity_bounds"
        );

        let mut params = RoleParameterSet::default();
        params.engine.alpha_max = 1.5;
        assert!(TripleOsAnalyzer::new(params).is_err());
    }

    #[test]
    fn test_bad_energies_rejected_before_any_draw() {
        let analyzer = TripleOsAnalyzer::new(RoleParameterSet::default()).unwrap();
        let mut profile = TripleOsProfile::new(
            TrigramEnergies::new([1.0; 8]),
            TrigramEnergies::new([1.0; 8]),
            TrigramEnergies::new([1.0; 8]),
        );
        profile.safemode[Trigram::Kun] = f64::NAN;
        assert_eq!(
            analyzer.analyze(&profile, Some(1)).unwrap_err().code(),
            "invalid_energy"
        );
    }

    #[test]
    fn test_role_tags_are_distinct_and_stable() {
        assert_eq!(Role::Engine.tag(), 0);
        assert_eq!(Role::Interface.tag(), 1);
        assert_eq!(Role::SafeMode.tag(), 2);
    }

    #[test]
    fn test_unseeded_analysis_reports_replayable_seed() {
        let analyzer = TripleOsAnalyzer::new(RoleParameterSet::default()).unwrap();
        let profile = TripleOsProfile::new(
            TrigramEnergies::new([2.0, 1.0, 0.5, 3.0, 1.5, 0.0, 2.5, 1.0]),
            TrigramEnergies::new([1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 0.5, 0.5]),
            TrigramEnergies::new([0.5, 0.5, 1.0, 1.0, 4.0, 2.0, 1.0, 0.0]),
        );
        let first = analyzer.analyze(&profile, None).unwrap();
        let replay = analyzer.analyze(&profile, Some(first.base_seed)).unwrap();
        assert_eq!(replay.engine.hexagram_id, first.engine.hexagram_id);
        assert_eq!(replay.interface.hexagram_id, first.interface.hexagram_id);
        assert_eq!(replay.safemode.hexagram_id, first.safemode.hexagram_id);
    }
}
