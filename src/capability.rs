//! Capability lookup: the read-only view of known engine traits
//!
//! The synthesizer resolves condition subjects against this table. A subject
//! that names a known trait (e.g. `Cloak`) becomes a query on that trait and
//! pulls its dependency into the generated trait's requirements.
//!
//! Filling the table from bulk reference data happens elsewhere; this module
//! only defines the lookup contract and an immutable in-memory table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A known engine trait and the trait it needs on the actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CapabilityRecord {
    /// Trait name as the engine spells it (e.g. "Cloak")
    pub name: String,

    /// Trait the actor must also carry (often the trait itself)
    pub dependency: String,
}

impl CapabilityRecord {
    pub fn new(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependency: dependency.into(),
        }
    }

    /// Record whose dependency is the trait itself
    pub fn standalone(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            dependency: name.clone(),
            name,
        }
    }
}

/// Read-only capability lookup
///
/// Implementations are shared across concurrent synthesis calls and must
/// answer from `&self` without locking on the caller's side.
pub trait CapabilityLookup: Send + Sync {
    fn lookup_capability(&self, name: &str, case_insensitive: bool) -> Option<CapabilityRecord>;
}

/// Traits every stock OpenRA mod ships with
const BUILTIN_CAPABILITIES: &[(&str, &str)] = &[
    ("Armament", "AttackBase"),
    ("AttackBase", "Armament"),
    ("AttackFrontal", "Armament"),
    ("AttackTurreted", "Turreted"),
    ("AutoTarget", "AttackBase"),
    ("Cargo", "Cargo"),
    ("Carryable", "Carryable"),
    ("Cloak", "Cloak"),
    ("Guard", "Mobile"),
    ("Harvester", "Mobile"),
    ("Mobile", "Mobile"),
    ("Parachutable", "Parachutable"),
    ("Passenger", "Passenger"),
    ("Repairable", "Repairable"),
    ("Selectable", "Selectable"),
    ("Targetable", "Targetable"),
    ("Turreted", "Turreted"),
];

/// Immutable in-memory capability table
///
/// Keys are stored lowercased next to the exact-case records so both lookup
/// modes are a single hash probe.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    exact: HashMap<String, CapabilityRecord>,
    folded: HashMap<String, CapabilityRecord>,
}

impl CapabilityTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the stock OpenRA traits
    pub fn builtin() -> Self {
        Self::from_records(
            BUILTIN_CAPABILITIES
                .iter()
                .map(|(name, dep)| CapabilityRecord::new(*name, *dep)),
        )
    }

    /// Build a table; later records replace earlier ones with the same name
    pub fn from_records(records: impl IntoIterator<Item = CapabilityRecord>) -> Self {
        let mut table = Self::new();
        table.extend(records);
        table
    }

    /// Layer more records over the table
    pub fn extend(&mut self, records: impl IntoIterator<Item = CapabilityRecord>) {
        for record in records {
            if record.name.trim().is_empty() {
                continue;
            }
            self.folded
                .insert(record.name.to_lowercase(), record.clone());
            self.exact.insert(record.name.clone(), record);
        }
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// All known names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exact.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl CapabilityLookup for CapabilityTable {
    fn lookup_capability(&self, name: &str, case_insensitive: bool) -> Option<CapabilityRecord> {
        if case_insensitive {
            self.folded.get(&name.to_lowercase()).cloned()
        } else {
            self.exact.get(name).cloned()
        }
    }
}
