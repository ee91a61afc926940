//! # Role Location
//!
//! This module resolves role names to concrete filesystem directories.
//!
//! ## Design
//!
//! Location is behind the `RoleLocate` trait so the resolver's graph logic
//! can be exercised in tests with fake locators, without laying out real
//! role trees for every case. The default implementation,
//! `FsRoleLocator`, probes each entry of a `RoleSearch` configuration for
//! a directory named after the role and canonicalizes the first hit —
//! canonicalization matters because the resolved path is the role's cache
//! identity, and two spellings of the same directory must collapse to one
//! key.
//!
//! When a dependency is declared in role metadata, the dependency is also
//! searched next to the declaring role itself (sibling roles resolve
//! without extra configuration); see [`RoleSearch::for_dependency`].

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::suggestions;

/// Ordered set of base directories probed when locating a role.
#[derive(Debug, Clone)]
pub struct RoleSearch {
    paths: Vec<PathBuf>,
}

impl RoleSearch {
    /// Create a search configuration from an explicit list of base paths.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// The base directories, in probe order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Search configuration for a dependency declared by the role at
    /// `role_location`: the declaring role's containing directory is probed
    /// first, then the configured paths.
    pub fn for_dependency(&self, role_location: &Path) -> Self {
        let mut paths = Vec::with_capacity(self.paths.len() + 1);
        if let Some(parent) = role_location.parent() {
            paths.push(parent.to_path_buf());
        }
        for path in &self.paths {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        Self { paths }
    }

    /// Human-readable rendering of the probe order, for error messages.
    pub fn display(&self) -> String {
        self.paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for RoleSearch {
    /// `roles/` under the working directory, then the working directory
    /// itself, then the user-level role directory.
    fn default() -> Self {
        let mut paths = vec![PathBuf::from("roles"), PathBuf::from(".")];
        if let Some(data_dir) = dirs::data_dir() {
            paths.push(data_dir.join("rolegraph").join("roles"));
        }
        Self { paths }
    }
}

/// Trait for role location - allows mocking in tests
pub trait RoleLocate: Send + Sync {
    /// Resolve a role name to its on-disk directory.
    ///
    /// Fails with `RoleNotFound` when no search path contains a directory
    /// with the role's name.
    fn locate(&self, name: &str, search: &RoleSearch) -> Result<PathBuf>;
}

/// The default implementation of `RoleLocate`, which probes the host
/// filesystem.
pub struct FsRoleLocator;

impl RoleLocate for FsRoleLocator {
    fn locate(&self, name: &str, search: &RoleSearch) -> Result<PathBuf> {
        for base in search.paths() {
            let candidate = base.join(name);
            if candidate.is_dir() {
                // Canonicalize so the location is a stable cache identity
                let location = candidate.canonicalize()?;
                debug!("located role '{}' at {}", name, location.display());
                return Ok(location);
            }
        }

        Err(Error::RoleNotFound {
            name: name.to_string(),
            searched: search.display(),
            hint: suggestions::similar_role_name(name, search),
        })
    }
}
