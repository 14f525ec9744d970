use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::adapters::adapter::RemoteAdapter;
use crate::error::RegistryError;
use crate::normalize::NormalizeFn;

/// One named collector: where data comes from and how it becomes
/// samples.
///
/// Identity is the name. Specs are built once at startup and
/// shared read-only by every collection pass.
#[derive(Clone)]
pub struct CollectorSpec {
    pub name: String,
    pub adapter: Arc<dyn RemoteAdapter>,
    pub normalize: NormalizeFn,
}

impl fmt::Debug for CollectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorSpec")
            .field("name", &self.name)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Explicit name → binding table.
///
/// Bindings are only ever added by `register` calls at startup.
/// Nothing is looked up by introspection, so a configured name
/// can only ever reach a collector that was registered under it.
#[derive(Debug, Default)]
pub struct CollectorRegistry {
    bindings: Vec<CollectorSpec>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &str,
        adapter: Arc<dyn RemoteAdapter>,
        normalize: NormalizeFn,
    ) -> Result<(), RegistryError> {
        if self.get(name).is_some() {
            return Err(RegistryError::DuplicateCollector(name.to_string()));
        }

        self.bindings.push(CollectorSpec {
            name: name.to_string(),
            adapter,
            normalize,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CollectorSpec> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.name.as_str()).collect()
    }

    /// Resolves the configured collector list.
    ///
    /// BEHAVIOR:
    /// - Keeps the configured order
    /// - Unknown names are logged and dropped, never fatal
    /// - A name listed twice is enabled once, at its first
    ///   position, since running it twice would duplicate series
    ///
    pub fn enabled_collectors<S: AsRef<str>>(&self, configured: &[S]) -> Vec<CollectorSpec> {
        let mut seen = HashSet::new();
        let mut enabled = Vec::with_capacity(configured.len());

        for name in configured.iter().map(AsRef::as_ref) {
            let Some(spec) = self.get(name) else {
                warn!("Collector '{name}' is not supported, ignoring");
                continue;
            };

            if !seen.insert(name) {
                warn!("Collector '{name}' configured more than once, ignoring repeat");
                continue;
            }

            enabled.push(spec.clone());
        }

        enabled
    }
}
