//! In-process caching of loaded role definitions
//!
//! A role's content is parsed once per run regardless of how many
//! dependents reference it; every dependent then accumulates on the one
//! shared instance's parent set. The cache is lifetime-scoped: constructed
//! once per run and passed by handle into the resolver, never a global, so
//! tests can use a fresh cache per resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::definition::RoleDefinition;
use crate::error::{Error, Result};
use crate::reference::RoleKey;

/// In-process cache mapping role identities to loaded definitions.
#[derive(Debug, Clone, Default)]
pub struct RoleCache {
    cache: Arc<Mutex<HashMap<RoleKey, Arc<RoleDefinition>>>>,
}

impl RoleCache {
    /// Create a new empty role cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached definition without loading.
    pub fn get(&self, key: &RoleKey) -> Result<Option<Arc<RoleDefinition>>> {
        let cache = self.lock()?;
        Ok(cache.get(key).cloned())
    }

    /// Insert a fully loaded definition, unless another caller got there
    /// first. Returns the instance that ended up in the cache, so two
    /// concurrent loaders converge on one shared definition.
    pub fn insert_or_get(
        &self,
        key: RoleKey,
        definition: Arc<RoleDefinition>,
    ) -> Result<Arc<RoleDefinition>> {
        let mut cache = self.lock()?;
        Ok(Arc::clone(cache.entry(key).or_insert(definition)))
    }

    /// Check if a key exists in cache
    pub fn contains(&self, key: &RoleKey) -> Result<bool> {
        let cache = self.lock()?;
        Ok(cache.contains_key(key))
    }

    /// Clear all cached entries
    pub fn clear(&self) -> Result<()> {
        let mut cache = self.lock()?;
        cache.clear();
        Ok(())
    }

    /// Get the number of cached entries
    pub fn len(&self) -> Result<usize> {
        let cache = self.lock()?;
        Ok(cache.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        let cache = self.lock()?;
        Ok(cache.is_empty())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<RoleKey, Arc<RoleDefinition>>>> {
        self.cache.lock().map_err(|_| Error::LockPoisoned {
            context: "role cache".to_string(),
        })
    }
}
