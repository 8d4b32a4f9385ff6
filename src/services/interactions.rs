use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::models::{InteractionFinding, MedicineEntry};

/// Medicine Interaction Index
/// Flags pairs on the active medicine list that appear in a fixed adjacency table

/// Adjacency table, lower-case names. Every relation must be listed on both sides.
const INTERACTION_TABLE: &[(&str, &[&str])] = &[
    ("paracetamol", &["ibuprofen", "aspirin"]),
    ("ibuprofen", &["paracetamol", "aspirin", "warfarin"]),
    ("aspirin", &["paracetamol", "ibuprofen", "warfarin"]),
    ("warfarin", &["ibuprofen", "aspirin"]),
    ("metformin", &["insulin"]),
    ("insulin", &["metformin"]),
];

#[derive(Debug)]
pub struct InteractionIndex {
    adjacency: HashMap<&'static str, HashSet<&'static str>>,
}

impl InteractionIndex {
    /// Process-wide index, built on first use and never mutated.
    pub fn global() -> &'static InteractionIndex {
        static INDEX: OnceLock<InteractionIndex> = OnceLock::new();
        INDEX.get_or_init(|| InteractionIndex::from_table(INTERACTION_TABLE))
    }

    fn from_table(table: &[(&'static str, &[&'static str])]) -> Self {
        let adjacency: HashMap<_, HashSet<_>> = table
            .iter()
            .map(|(name, partners)| (*name, partners.iter().copied().collect()))
            .collect();
        let index = Self { adjacency };
        debug_assert!(index.is_symmetric(), "interaction table must be symmetric");
        index
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Case-insensitive lookup. Names missing from the table never interact.
    pub fn interacts(&self, a: &str, b: &str) -> bool {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        self.adjacency
            .get(a.as_str())
            .is_some_and(|partners| partners.contains(b.as_str()))
    }

    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(name, partners)| {
            partners.iter().all(|partner| {
                self.adjacency
                    .get(partner)
                    .is_some_and(|back| back.contains(name))
            })
        })
    }

    /// Check every pair on the list, earlier entry first. Quadratic, the list
    /// is only ever a handful of concurrent medicines.
    pub fn find_interactions(&self, medicines: &[MedicineEntry]) -> Vec<InteractionFinding> {
        let mut findings = Vec::new();
        for (i, first) in medicines.iter().enumerate() {
            for second in &medicines[i + 1..] {
                if self.interacts(&first.name, &second.name) {
                    findings.push(InteractionFinding {
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
            }
        }
        findings
    }
}

/// Scan `medicines` against the global table.
pub fn find_interactions(medicines: &[MedicineEntry]) -> Vec<InteractionFinding> {
    InteractionIndex::global().find_interactions(medicines)
}
