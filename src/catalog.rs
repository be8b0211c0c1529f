//! The display-content seam.
//!
//! The descriptive text for the 64 hexagrams is a hand-authored, versioned
//! data asset maintained outside this crate. The engine never reads it; the
//! presentation layer resolves a [`SelectionResult`](crate::SelectionResult)
//! through this trait. Keeping the seam a trait means scoring logic has no
//! compile-time dependency on any content database.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hexagram::HexagramId;

/// Static display content for one hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// Canonical name, e.g. "乾為天".
    pub name: String,
    /// Short descriptive prose shown on the result card.
    pub description: String,
}

/// Opaque lookup from hexagram identifier to display content.
pub trait HexagramCatalog {
    fn display(&self, id: HexagramId) -> Option<&DisplayRecord>;
}

/// A catalog held in memory, loaded from whatever asset format the caller
/// uses. Missing entries are the caller's content bug, not an engine error.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: HashMap<HexagramId, DisplayRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: HexagramId, record: DisplayRecord) {
        self.records.insert(id, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HexagramCatalog for InMemoryCatalog {
    fn display(&self, id: HexagramId) -> Option<&DisplayRecord> {
        self.records.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trip() {
        let mut catalog = InMemoryCatalog::new();
        let id = HexagramId::new(1).unwrap();
        catalog.insert(
            id,
            DisplayRecord {
                name: "乾為天".into(),
                description: "Creative drive".into(),
            },
        );
        assert_eq!(catalog.display(id).unwrap().name, "乾為天");
        assert!(catalog.display(HexagramId::new(2).unwrap()).is_none());
    }
}
