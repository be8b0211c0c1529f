//! The scoring pipeline: energies → trigram weights → hexagram distribution
//! → one reproducible draw.
//!
//! Three stages, each pure:
//! - `softmax`: tempered normalization of raw trigram energies
//! - `strategy`: purity-controlled assembly of the 64-entry distribution
//! - `selector`: cumulative weighted draw with a defined underflow fallback

pub mod selector;
pub mod softmax;
pub mod strategy;

pub use selector::{draw_hexagram, DrawOutcome};
pub use softmax::normalize;
pub use strategy::{ConcentrationAdaptive, FixedPurity, SelectionStrategy};
