//! Minimal end-to-end example for `tripleos-engine`.
//!
//! This scores a hand-written quiz profile, selects one hexagram per role,
//! and resolves the engine role's hexagram against a tiny display catalog.
//!
//! To run: `cargo run --example quickstart`

use std::sync::Arc;

use tripleos_engine::{
    DisplayRecord, FixedPurity, HexagramCatalog, HexagramId, InMemoryCatalog, Role,
    RoleParameterSet, TripleOsAnalyzer, TripleOsProfile, Trigram, TrigramEnergies, ROLES,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -- Engine setup --------------------------------------------------------

    // Shipped constants; deployments usually deserialize a tuned set instead.
    let analyzer = TripleOsAnalyzer::new(RoleParameterSet::default())?;

    // A completed quiz, as the question engine would hand it over: raw
    // per-trigram energies for each of the three roles.
    let profile = TripleOsProfile::new(
        TrigramEnergies::from_pairs([
            (Trigram::Qian, 8.0),
            (Trigram::Li, 3.0),
            (Trigram::Zhen, 2.0),
        ]),
        TrigramEnergies::from_pairs([
            (Trigram::Dui, 5.0),
            (Trigram::Xun, 4.0),
            (Trigram::Kun, 3.0),
        ]),
        TrigramEnergies::from_pairs([(Trigram::Gen, 6.0), (Trigram::Kan, 5.0)]),
    );

    // -- Analysis ------------------------------------------------------------

    // Some(seed) makes the run reproducible; None draws a seed from OS
    // entropy and reports it back in the result.
    let selection = analyzer.analyze(&profile, Some(42))?;

    for role in ROLES {
        let result = selection.get(role);
        println!(
            "{:<10} -> hexagram {:>2}  (draw {:.6})",
            role,
            result.hexagram_id.get(),
            result.draw
        );
    }
    println!("base seed: {}", selection.base_seed);

    // -- Display lookup ------------------------------------------------------

    // The content database lives outside the engine; any catalog
    // implementation works. Two records are enough for a demo.
    let mut catalog = InMemoryCatalog::new();
    catalog.insert(
        HexagramId::new(1)?,
        DisplayRecord {
            name: "乾為天".into(),
            description: "Pure creative drive".into(),
        },
    );
    catalog.insert(
        HexagramId::new(2)?,
        DisplayRecord {
            name: "坤為地".into(),
            description: "Receptive ground".into(),
        },
    );

    let engine_hexagram = selection.get(Role::Engine).hexagram_id;
    match catalog.display(engine_hexagram) {
        Some(record) => println!("engine OS: {}, {}", record.name, record.description),
        None => println!("engine OS: hexagram {engine_hexagram} (no display record loaded)"),
    }

    // -- Legacy strategy -----------------------------------------------------

    // The purity formula is injected; the fixed-share legacy variant stays
    // available for deployments pinned to published behavior.
    let legacy =
        TripleOsAnalyzer::new(RoleParameterSet::default())?.with_strategy(Arc::new(FixedPurity));
    let legacy_selection = legacy.analyze(&profile, Some(42))?;
    println!(
        "legacy strategy, same seed: engine hexagram {}",
        legacy_selection.engine.hexagram_id.get()
    );

    Ok(())
}
