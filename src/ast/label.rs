//! Symbolic names for addresses

use std::collections::{BTreeMap, HashMap};

/// Source of user-defined names for absolute addresses.
///
/// Consulted only when rendering text; classification and address resolution
/// never depend on labels.
pub trait LabelLookup {
    fn resolve(&self, address: u32) -> Option<String>;
}

/// A lookup that knows no labels.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoLabels;

impl LabelLookup for NoLabels {
    fn resolve(&self, _address: u32) -> Option<String> {
        None
    }
}

impl LabelLookup for HashMap<u32, String> {
    fn resolve(&self, address: u32) -> Option<String> {
        self.get(&address).cloned()
    }
}

impl LabelLookup for BTreeMap<u32, String> {
    fn resolve(&self, address: u32) -> Option<String> {
        self.get(&address).cloned()
    }
}
