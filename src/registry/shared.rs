use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::errors::RegistryError;
use crate::graph::GraphModel;
use crate::registry::{GraphRegistry, GraphRegistryOptions, RegisteredGraph};

/// A [`GraphRegistry`] that can be shared between threads.
///
/// Registration takes the write lock, lookups share the read lock. Lookups
/// return `Arc` handles, so a host can keep executing a graph after the lock
/// is released or the registry is cleared.
#[derive(Debug, Clone, Default)]
pub struct SharedGraphRegistry {
    inner: Arc<RwLock<GraphRegistry>>,
}

impl SharedGraphRegistry {
    pub fn new(options: GraphRegistryOptions) -> Self {
        Self::from(GraphRegistry::new(options))
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        model: GraphModel,
    ) -> Result<Arc<RegisteredGraph>, RegistryError> {
        self.inner.write().register(name, model)
    }

    pub fn get(&self, name: &str) -> Result<Arc<RegisteredGraph>, RegistryError> {
        self.inner.read().get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.read().names().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Hold the read lock for several lookups in a row
    pub fn read(&self) -> RwLockReadGuard<'_, GraphRegistry> {
        self.inner.read()
    }
}

impl From<GraphRegistry> for SharedGraphRegistry {
    fn from(registry: GraphRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_fixtures::chain;
    use std::thread;

    #[test]
    fn test_concurrent_readers_see_registered_graphs() {
        let registry = SharedGraphRegistry::default();
        for name in ["Preview", "Reference"] {
            let mut graph = chain(name, &["A", "B", "C"]);
            graph.mark_output("C", "out").unwrap();
            registry.register(name, graph).unwrap();
        }

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let graph = registry.get("Reference").unwrap();
                    graph.plan().order()
                })
            })
            .collect();

        for reader in readers {
            assert_eq!(reader.join().unwrap(), vec!["A", "B", "C"]);
        }
        assert_eq!(registry.names(), vec!["Preview", "Reference"]);
    }

    #[test]
    fn test_writes_through_clones_are_visible() {
        let registry = SharedGraphRegistry::new(GraphRegistryOptions::default());
        let writer = registry.clone();

        let graph = chain("Solo", &["A"]);
        writer.register("Solo", graph).unwrap();
        assert!(registry.contains("Solo"));
        assert_eq!(registry.read().len(), 1);

        registry.clear();
        assert!(writer.is_empty());
    }
}
