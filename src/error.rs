//! Error types for the scoring engine.

use thiserror::Error;

use crate::trigram::Trigram;

/// Errors raised by parameter and input validation.
///
/// Numerical edge cases inside the pipeline (fully concentrated trigram
/// profiles, cumulative-walk underflow) are defined fallback behaviors, not
/// errors; see `scoring::strategy` and `scoring::selector`. Everything here
/// is a caller mistake and is raised before any computation proceeds.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Softmax temperature must be strictly positive and finite.
    #[error("temperature must be positive and finite, got {temperature}")]
    InvalidTemperature { temperature: f64 },

    /// Purity bounds must satisfy 0 <= alpha_min <= alpha_max <= 1.
    #[error("purity bounds invalid: alpha_min={alpha_min}, alpha_max={alpha_max}")]
    InvalidPurityBounds { alpha_min: f64, alpha_max: f64 },

    /// Purity gain must be finite.
    #[error("purity gain must be finite, got {k}")]
    InvalidPurityGain { k: f64 },

    /// Every trigram energy must be a finite non-negative number.
    #[error("energy for {trigram} must be finite and non-negative, got {value}")]
    InvalidEnergy { trigram: Trigram, value: f64 },

    /// Hexagram identifiers live in 1..=64.
    #[error("hexagram id out of range: {id}")]
    InvalidHexagramId { id: u8 },

    /// A caller-supplied distribution failed its invariants.
    #[error("distribution invariant violated: {reason}")]
    InvalidDistribution { reason: String },
}

impl EngineError {
    pub fn invalid_temperature(temperature: f64) -> Self {
        Self::InvalidTemperature { temperature }
    }

    pub fn invalid_purity_bounds(alpha_min: f64, alpha_max: f64) -> Self {
        Self::InvalidPurityBounds {
            alpha_min,
            alpha_max,
        }
    }

    pub fn invalid_purity_gain(k: f64) -> Self {
        Self::InvalidPurityGain { k }
    }

    pub fn invalid_energy(trigram: Trigram, value: f64) -> Self {
        Self::InvalidEnergy { trigram, value }
    }

    pub fn invalid_distribution(reason: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            reason: reason.into(),
        }
    }

    /// Short stable code for structured logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTemperature { .. } => "invalid_temperature",
            Self::InvalidPurityBounds { .. } => "invalid_purity_bounds",
            Self::InvalidPurityGain { .. } => "invalid_purity_gain",
            Self::InvalidEnergy { .. } => "invalid_energy",
            Self::InvalidHexagramId { .. } => "invalid_hexagram_id",
            Self::InvalidDistribution { .. } => "invalid_distribution",
        }
    }
}
