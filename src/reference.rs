//! Role references and stable role identity.
//!
//! A `RoleReference` is an unresolved mention of a role: its name, the
//! search configuration needed to locate it, and any caller-supplied
//! parameter overrides. A `RoleKey` is the stable identity derived from the
//! data that defines the *content* of the resolved role — the canonicalized
//! role directory plus a canonical fingerprint of the overrides. Keys drive
//! caching, cycle detection, parent back-references, and de-duplication, so
//! two logically identical references always collapse to one key even if
//! the definitions were instantiated separately.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::locator::RoleSearch;

/// Caller-supplied parameter overrides for a role instantiation.
///
/// A `BTreeMap` keeps key order stable, which makes the serialized
/// fingerprint used in `RoleKey` deterministic.
pub type Overrides = BTreeMap<String, Value>;

/// An unresolved mention of a role, before its files have been located or
/// parsed.
///
/// Created by whatever declares a role usage (a play, or another role's
/// metadata); consumed once by resolution and never mutated afterward.
#[derive(Debug, Clone)]
pub struct RoleReference {
    /// Role name as declared
    pub name: String,
    /// Search configuration used to locate the role on disk
    pub search: RoleSearch,
    /// Parameter overrides that take precedence when this role is composed
    pub overrides: Overrides,
}

impl RoleReference {
    /// Create a reference with no parameter overrides.
    pub fn new(name: impl Into<String>, search: RoleSearch) -> Self {
        Self {
            name: name.into(),
            search,
            overrides: Overrides::new(),
        }
    }

    /// Create a reference carrying caller-supplied parameter overrides.
    pub fn with_overrides(
        name: impl Into<String>,
        search: RoleSearch,
        overrides: Overrides,
    ) -> Self {
        Self {
            name: name.into(),
            search,
            overrides,
        }
    }
}

/// Stable identity of a resolved role usage.
///
/// Combines the resolved filesystem location with a canonical fingerprint
/// of the override parameters. References to the same directory with
/// different overrides are distinct keys: the overrides change the composed
/// content, so they denote logically distinct usages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleKey {
    location: PathBuf,
    params: String,
}

impl RoleKey {
    /// Derive the key for a role resolved to `location` with `overrides`.
    pub fn new(location: PathBuf, overrides: &Overrides) -> Result<Self> {
        let params = if overrides.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(overrides).map_err(|e| Error::Serialization {
                message: format!("override params for {}: {}", location.display(), e),
            })?
        };
        Ok(Self { location, params })
    }

    /// The role's resolved directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The role name implied by the key (the directory's final component).
    pub fn name(&self) -> String {
        self.location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.location.display().to_string())
    }

    /// Whether this key carries override parameters.
    pub fn has_overrides(&self) -> bool {
        !self.params.is_empty()
    }
}
