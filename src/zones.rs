//! Named zone allow-sets for region filtering
//!
//! A [`ZoneSet`] is the collection of TLC zone identifiers that defines the
//! region of interest. The built-in `bronx` set covers the Bronx borough;
//! additional sets can be constructed from an explicit id list in
//! configuration.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// TLC zone identifiers for the Bronx borough.
pub const BRONX_ZONE_IDS: [i64; 43] = [
    3, 18, 20, 31, 32, 46, 47, 51, 58, 59, 60, 69, 78, 81, 94, 119, 126, 136, 147, 159, 167, 168,
    169, 174, 182, 183, 184, 185, 199, 200, 208, 212, 213, 220, 235, 240, 241, 242, 247, 248, 250,
    254, 259,
];

static BRONX: Lazy<ZoneSet> = Lazy::new(|| ZoneSet::new("bronx", BRONX_ZONE_IDS));

/// A named set of zone identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSet {
    name: String,
    zones: BTreeSet<i64>,
}

impl ZoneSet {
    /// Create a zone set from an explicit id list.
    pub fn new(name: impl Into<String>, zones: impl IntoIterator<Item = i64>) -> Self {
        Self {
            name: name.into(),
            zones: zones.into_iter().collect(),
        }
    }

    /// The built-in Bronx borough set.
    pub fn bronx() -> Self {
        BRONX.clone()
    }

    /// Look up a built-in set by name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "bronx" => Some(Self::bronx()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, zone: i64) -> bool {
        self.zones.contains(&zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl std::fmt::Display for ZoneSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} zones)", self.name, self.zones.len())
    }
}
