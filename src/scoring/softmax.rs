//! Tempered softmax over the eight trigram energies.

use crate::error::EngineError;
use crate::trigram::{TrigramEnergies, TrigramWeights};

/// Normalize raw energies into a probability vector over the trigrams.
///
/// Smaller temperature sharpens the output toward the dominant trigram;
/// larger flattens it toward uniform. The maximum energy is subtracted before
/// exponentiating; without that shift large quiz scores overflow to infinity
/// and the whole vector collapses to NaN.
pub fn normalize(
    energies: &TrigramEnergies,
    temperature: f64,
) -> Result<TrigramWeights, EngineError> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(EngineError::invalid_temperature(temperature));
    }
    energies.validate()?;

    let raw = energies.as_array();
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut shifted = [0.0_f64; 8];
    for (out, value) in shifted.iter_mut().zip(raw.iter()) {
        *out = ((value - max) / temperature).exp();
    }

    let total: f64 = shifted.iter().sum();
    // total >= 1 always: the maximum entry exponentiates to exp(0) = 1.
    for value in shifted.iter_mut() {
        *value /= total;
    }

    Ok(TrigramWeights::from_normalized(shifted))
}
