//! # Role Graph Resolution
//!
//! This module implements `RoleGraphResolver`, the orchestrating component
//! of the subsystem. Given a root role reference it recursively loads
//! definitions for the role and all transitive dependencies, wiring
//! parent/child links, detecting cycles, and sharing instances through the
//! cache.
//!
//! ## Cycle Detection
//!
//! A role graph containing a cycle (A depends on B depends on A) is
//! rejected with a `CycleDetected` error naming the full cycle path,
//! rather than exhausting stack space. The detection strategy is an
//! explicit "currently resolving" identity path threaded through the
//! recursive calls: before resolving a reference, its identity is checked
//! against the active path; the identity is pushed for the duration of the
//! recursive call and popped on return, success or failure. The path is
//! per root resolution, never shared: two unrelated roots may depend on
//! the same role concurrently without that being a cycle, and a cycle is
//! detected even when a participating role is already cached from an
//! unrelated resolution.
//!
//! ## Cache Discipline
//!
//! A definition enters the cache only after its whole dependency subtree
//! resolved successfully, so a failed load never leaves a half-populated
//! entry that a later caller could observe. On a cache hit the parent is
//! still registered on the cached instance: a role reached via two paths
//! must accumulate both parents.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::cache::RoleCache;
use crate::definition::RoleDefinition;
use crate::error::{Error, Result};
use crate::locator::{FsRoleLocator, RoleLocate};
use crate::reference::{RoleKey, RoleReference};

/// Resolves role references into a parent-linked, de-duplicated
/// dependency graph of shared [`RoleDefinition`] instances.
pub struct RoleGraphResolver {
    locator: Box<dyn RoleLocate>,
    cache: RoleCache,
}

impl RoleGraphResolver {
    /// Create a resolver backed by the host filesystem and `cache`.
    pub fn new(cache: RoleCache) -> Self {
        Self {
            locator: Box::new(FsRoleLocator),
            cache,
        }
    }

    /// Create a resolver with a custom `RoleLocate` implementation.
    ///
    /// This is primarily used for testing to inject mock locators.
    pub fn with_locator(locator: Box<dyn RoleLocate>, cache: RoleCache) -> Self {
        Self { locator, cache }
    }

    /// The cache this resolver shares definitions through.
    pub fn cache(&self) -> &RoleCache {
        &self.cache
    }

    /// Resolve a root role reference and its full dependency graph.
    pub fn resolve(&self, reference: &RoleReference) -> Result<Arc<RoleDefinition>> {
        self.resolve_inner(reference, None, &mut Vec::new())
    }

    /// Resolve several independent root references against the shared
    /// cache, in parallel. Each root gets its own cycle-detection path.
    pub fn resolve_all(&self, references: &[RoleReference]) -> Result<Vec<Arc<RoleDefinition>>> {
        references
            .par_iter()
            .map(|reference| self.resolve(reference))
            .collect()
    }

    fn resolve_inner(
        &self,
        reference: &RoleReference,
        parent: Option<&Arc<RoleDefinition>>,
        active: &mut Vec<(RoleKey, String)>,
    ) -> Result<Arc<RoleDefinition>> {
        let location = self.locator.locate(&reference.name, &reference.search)?;
        let key = RoleKey::new(location.clone(), &reference.overrides)?;

        // Cycle check comes before the cache lookup: a cached role can
        // still participate in a cycle reached via a different path.
        if active.iter().any(|(active_key, _)| *active_key == key) {
            return Err(cycle_error(active, &reference.name));
        }

        if let Some(cached) = self.cache.get(&key)? {
            debug!("role '{}' served from cache", reference.name);
            if let Some(parent) = parent {
                cached.register_parent(parent.key().clone())?;
            }
            return Ok(cached);
        }

        let definition = Arc::new(RoleDefinition::load(
            &reference.name,
            location,
            key.clone(),
            reference.overrides.clone(),
            &reference.search,
        )?);
        if let Some(parent) = parent {
            definition.register_parent(parent.key().clone())?;
        }

        active.push((key.clone(), reference.name.clone()));
        let outcome = self.resolve_dependencies(&definition, active);
        active.pop();
        outcome?;

        let shared = self.cache.insert_or_get(key, Arc::clone(&definition))?;
        if !Arc::ptr_eq(&shared, &definition) {
            // Lost the insertion race to a concurrent root resolution;
            // converge on the winner and carry our parent link over.
            if let Some(parent) = parent {
                shared.register_parent(parent.key().clone())?;
            }
        }
        Ok(shared)
    }

    /// Resolve the declared dependencies of `definition`, in declaration
    /// order, passing the definition as the parent of each child.
    fn resolve_dependencies(
        &self,
        definition: &Arc<RoleDefinition>,
        active: &mut Vec<(RoleKey, String)>,
    ) -> Result<()> {
        let Some(metadata) = definition.metadata() else {
            return Ok(());
        };
        for dependency in &metadata.dependencies {
            let child = self.resolve_inner(dependency, Some(definition), active)?;
            definition.push_dependency(child)?;
        }
        Ok(())
    }
}

/// Build the `CycleDetected` error naming the full cycle path, e.g.
/// `a -> b -> a`.
fn cycle_error(active: &[(RoleKey, String)], repeated: &str) -> Error {
    let mut chain: Vec<&str> = active.iter().map(|(_, name)| name.as_str()).collect();
    chain.push(repeated);
    Error::CycleDetected {
        cycle: chain.join(" -> "),
    }
}
