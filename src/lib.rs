#![forbid(unsafe_code)]

//! # tripleos-engine
//!
//! The deterministic scoring core of the Triple OS personality analyzer.
//!
//! Given per-trigram energies accumulated from a completed quiz, the engine
//! selects one of the 64 hexagrams for each of three independent roles
//! (Engine OS, Interface OS, Safe-Mode OS):
//!
//! 1. **Normalize**: tempered softmax turns raw energies into a probability
//!    vector over the eight trigrams.
//! 2. **Assemble**: a purity-controlled strategy expands that vector into a
//!    distribution over all 64 (upper, lower) trigram pairs, keeping the
//!    eight pure hexagrams inside a configured share of the mass.
//! 3. **Draw**: a fully specified LCG makes one reproducible weighted
//!    selection per role.
//!
//! Every selection is replayable: the result carries the base seed, and the
//! generator is pinned down to its exact constants, so a reported outcome
//! can be reproduced on any platform.
//!
//! The quiz itself and the presentation of selected hexagrams live outside
//! this crate. Display content is reachable only through the
//! [`HexagramCatalog`] trait.

pub mod catalog;
pub mod error;
pub mod hexagram;
pub mod orchestrator;
pub mod rng;
pub mod scoring;
pub mod trigram;

pub use catalog::{DisplayRecord, HexagramCatalog, InMemoryCatalog};
pub use error::EngineError;
pub use hexagram::{HexagramDistribution, HexagramId, PURE_HEXAGRAMS};
pub use orchestrator::{
    Role, RoleParameterSet, RoleParameters, SelectionResult, TripleOsAnalyzer, TripleOsProfile,
    TripleOsSelection, ROLES,
};
pub use rng::Lcg64;
pub use scoring::{ConcentrationAdaptive, FixedPurity, SelectionStrategy};
pub use trigram::{Trigram, TrigramEnergies, TrigramWeights, TRIGRAMS};
