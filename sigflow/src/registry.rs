//! Stage factory registry.
//!
//! Toolkits register their stage constructors by name so assembly code can
//! create stages without depending on concrete types.

use crate::stages::Stage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Factory function type for creating stages.
pub type StageFactory = Box<dyn Fn() -> Arc<dyn Stage> + Send + Sync>;

/// Registry mapping stage names to factories.
#[derive(Default)]
pub struct StageRegistry {
    factories: RwLock<HashMap<String, StageFactory>>,
}

impl StageRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<StageRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Registers a factory under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, factory: StageFactory) {
        self.factories.write().insert(name.into(), factory);
    }

    /// Creates a new stage instance by name.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Arc<dyn Stage>> {
        self.factories.read().get(name).map(|factory| factory())
    }

    /// Checks if a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Registered stage names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// Returns true if no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRegistry")
            .field("names", &self.names())
            .finish()
    }
}
