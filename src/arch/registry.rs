//! Mapping from architecture tags to decode strategies.

use crate::analysis::{Error, Result};
use crate::arch::{gsu, hg51b, huc6280, mos6502, sm83, spc700, upd77c25, w65c816};
use crate::arch::{ArchName, DecodeStrategy};
use std::collections::HashMap;
use std::sync::Arc;

/// A set of decode strategies, keyed by the architecture tag they serve.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    strategies: HashMap<ArchName, Arc<dyn DecodeStrategy>>,
}

impl Registry {
    /// Construct a registry with no strategies at all.
    pub fn new() -> Self {
        Registry {
            strategies: HashMap::new(),
        }
    }

    /// Construct a registry holding every strategy that ships with the crate.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let cpu65816: Arc<dyn DecodeStrategy> = Arc::new(w65c816::W65C816);

        registry.register_shared(ArchName::Snes, cpu65816.clone());
        registry.register_shared(ArchName::Sa1, cpu65816);
        registry.register(ArchName::Spc, spc700::Spc700);
        registry.register(ArchName::NecDsp, upd77c25::Upd77c25);
        registry.register(ArchName::Gsu, gsu::SuperFx);
        registry.register(ArchName::Cx4, hg51b::Hg51b);
        registry.register(ArchName::Gameboy, sm83::Sm83);
        registry.register(ArchName::Nes, mos6502::Mos6502);
        registry.register(ArchName::Pce, huc6280::HuC6280);

        log::debug!(
            "Built standard decode registry with {} architectures",
            registry.strategies.len()
        );

        registry
    }

    /// Register a strategy for an architecture, replacing any existing one.
    pub fn register<S>(&mut self, arch: ArchName, strategy: S)
    where
        S: DecodeStrategy + 'static,
    {
        self.register_shared(arch, Arc::new(strategy));
    }

    /// Register an already-shared strategy for an architecture.
    pub fn register_shared(&mut self, arch: ArchName, strategy: Arc<dyn DecodeStrategy>) {
        self.strategies.insert(arch, strategy);
    }

    pub fn contains(&self, arch: ArchName) -> bool {
        self.strategies.contains_key(&arch)
    }

    /// Find the strategy for an architecture.
    ///
    /// A missing strategy is logged at error level before being returned.
    pub fn get(&self, arch: ArchName) -> Result<Arc<dyn DecodeStrategy>> {
        match self.strategies.get(&arch) {
            Some(strategy) => Ok(strategy.clone()),
            None => {
                log::error!("No decode strategy registered for {:?}", arch);
                Err(Error::UnsupportedArchitecture(arch))
            }
        }
    }
}

lazy_static! {
    static ref STANDARD_REGISTRY: Registry = Registry::standard();
}

/// The process-wide registry of built-in strategies, built on first use.
pub fn standard_registry() -> &'static Registry {
    &STANDARD_REGISTRY
}
