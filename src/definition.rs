//! # Role Definitions
//!
//! This module defines `RoleDefinition`, the in-memory representation of
//! one loaded role: its identity, its four content scopes (tasks,
//! handlers, default variables, role variables), and its declared
//! dependency metadata.
//!
//! ## Construction
//!
//! A definition is loaded from a conventional role directory containing
//! zero or more of the scope subdirectories `meta/`, `tasks/`,
//! `handlers/`, `vars/`, `defaults/`, each optionally holding one
//! canonical entry file (see [`crate::mainfile`]). Scope shape is
//! validated at load time: `vars` and `defaults` must be mappings, `tasks`
//! and `handlers` must be sequences. An absent scope is valid and loads as
//! empty.
//!
//! ## Sharing
//!
//! Definitions are shared as `Arc<RoleDefinition>`: a role depended on by
//! several others is one instance, reached through the cache, with every
//! dependent recorded in its `parents` set. All fields are immutable after
//! construction except `parents` (monotonically growing) and
//! `dependencies` (filled once while the resolver walks the metadata).

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::document;
use crate::error::{Error, Result};
use crate::locator::RoleSearch;
use crate::mainfile;
use crate::metadata::RoleMetadata;
use crate::reference::{Overrides, RoleKey};

/// The resolved, loaded representation of one role.
#[derive(Debug)]
pub struct RoleDefinition {
    name: String,
    location: PathBuf,
    key: RoleKey,
    overrides: Overrides,
    metadata: Option<RoleMetadata>,
    tasks: Vec<Value>,
    handlers: Vec<Value>,
    role_vars: Mapping,
    default_vars: Mapping,
    /// Back-references to dependents; never an ownership relation.
    parents: Mutex<BTreeSet<RoleKey>>,
    /// Resolved children, in declaration order.
    dependencies: Mutex<Vec<Arc<RoleDefinition>>>,
}

impl RoleDefinition {
    /// Load a role definition from its resolved `location`.
    ///
    /// Reads and validates every scope the role ships; does not resolve
    /// dependencies — that is the resolver's job, which needs the
    /// constructed definition to wire parent links first.
    pub(crate) fn load(
        name: &str,
        location: PathBuf,
        key: RoleKey,
        overrides: Overrides,
        search: &RoleSearch,
    ) -> Result<Self> {
        debug!("loading role '{}' from {}", name, location.display());

        let meta_doc = load_scope(&location, "meta")?;
        let metadata = match meta_doc {
            Some(doc) => Some(RoleMetadata::parse(
                name,
                &doc,
                &search.for_dependency(&location),
            )?),
            None => None,
        };

        let tasks = expect_sequence(name, "tasks", load_scope(&location, "tasks")?)?;
        let handlers = expect_sequence(name, "handlers", load_scope(&location, "handlers")?)?;
        let role_vars = expect_mapping(name, "vars", load_scope(&location, "vars")?)?;
        let default_vars = expect_mapping(name, "defaults", load_scope(&location, "defaults")?)?;

        Ok(Self {
            name: name.to_string(),
            location,
            key,
            overrides,
            metadata,
            tasks,
            handlers,
            role_vars,
            default_vars,
            parents: Mutex::new(BTreeSet::new()),
            dependencies: Mutex::new(Vec::new()),
        })
    }

    /// Role name, used for display and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the role's root directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Stable identity of this role usage.
    pub fn key(&self) -> &RoleKey {
        &self.key
    }

    /// Caller-supplied parameter overrides carried over from the reference
    /// that produced this instance.
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Parsed `meta` scope, absent if the role ships none.
    pub fn metadata(&self) -> Option<&RoleMetadata> {
        self.metadata.as_ref()
    }

    /// Opaque task blocks, in file order.
    pub fn tasks(&self) -> &[Value] {
        &self.tasks
    }

    /// Opaque handler blocks, in file order.
    pub fn handlers(&self) -> &[Value] {
        &self.handlers
    }

    /// Variables from the `vars` scope.
    pub fn role_vars(&self) -> &Mapping {
        &self.role_vars
    }

    /// Variables from the `defaults` scope.
    pub fn default_vars(&self) -> &Mapping {
        &self.default_vars
    }

    /// Identities of the roles that depend on this one.
    pub fn parents(&self) -> Result<BTreeSet<RoleKey>> {
        Ok(self.lock_parents()?.clone())
    }

    /// Record `parent` as a dependent of this role.
    ///
    /// Set semantics: registering the same parent twice is a no-op.
    /// Returns whether the parent was newly added.
    pub fn register_parent(&self, parent: RoleKey) -> Result<bool> {
        Ok(self.lock_parents()?.insert(parent))
    }

    /// Append a resolved child; children arrive in declaration order.
    pub(crate) fn push_dependency(&self, child: Arc<RoleDefinition>) -> Result<()> {
        self.lock_dependencies()?.push(child);
        Ok(())
    }

    /// Directly declared dependencies, in declaration order.
    pub fn direct_dependencies(&self) -> Result<Vec<Arc<RoleDefinition>>> {
        Ok(self.lock_dependencies()?.clone())
    }

    /// The de-duplicated transitive closure of this role's dependencies.
    ///
    /// Dependencies-first (post-order) traversal: every role appears after
    /// the roles it depends on, so the sequence is directly usable as an
    /// execution order. Diamond dependencies appear once, at their first
    /// discovery position. Stable across runs of the same input.
    pub fn all_dependencies(&self) -> Result<Vec<Arc<RoleDefinition>>> {
        let mut seen = HashSet::new();
        let mut closure = Vec::new();
        self.collect_dependencies(&mut seen, &mut closure)?;
        Ok(closure)
    }

    fn collect_dependencies(
        &self,
        seen: &mut HashSet<RoleKey>,
        closure: &mut Vec<Arc<RoleDefinition>>,
    ) -> Result<()> {
        for child in self.lock_dependencies()?.iter() {
            // A seen child's whole subtree is already in the closure;
            // re-walking it would blow up on stacked diamonds.
            if !seen.insert(child.key().clone()) {
                continue;
            }
            child.collect_dependencies(seen, closure)?;
            closure.push(Arc::clone(child));
        }
        Ok(())
    }

    fn lock_parents(&self) -> Result<std::sync::MutexGuard<'_, BTreeSet<RoleKey>>> {
        self.parents.lock().map_err(|_| Error::LockPoisoned {
            context: format!("parents of role '{}'", self.name),
        })
    }

    fn lock_dependencies(&self) -> Result<std::sync::MutexGuard<'_, Vec<Arc<RoleDefinition>>>> {
        self.dependencies.lock().map_err(|_| Error::LockPoisoned {
            context: format!("dependencies of role '{}'", self.name),
        })
    }
}

/// Load one scope's entry document, treating an absent directory, absent
/// entry file, or empty document as an absent scope.
fn load_scope(location: &Path, scope: &str) -> Result<Option<Value>> {
    match mainfile::resolve_main(&location.join(scope))? {
        Some(path) => match document::load(&path)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        },
        None => Ok(None),
    }
}

/// Validate that a variable scope is a mapping (or absent).
fn expect_mapping(role: &str, scope: &str, document: Option<Value>) -> Result<Mapping> {
    match document {
        None => Ok(Mapping::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping),
        Some(other) => Err(Error::RoleLoad {
            role: role.to_string(),
            message: format!(
                "{} must be a mapping, got {}",
                scope,
                value_kind(&other)
            ),
        }),
    }
}

/// Validate that a task-like scope is a sequence (or absent).
fn expect_sequence(role: &str, scope: &str, document: Option<Value>) -> Result<Vec<Value>> {
    match document {
        None => Ok(Vec::new()),
        Some(Value::Sequence(sequence)) => Ok(sequence),
        Some(other) => Err(Error::RoleLoad {
            role: role.to_string(),
            message: format!(
                "{} must be a sequence, got {}",
                scope,
                value_kind(&other)
            ),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_scope(role_dir: &Path, scope: &str, content: &str) {
        let dir = role_dir.join(scope);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("main.yml"), content).unwrap();
    }

    fn load_role(role_dir: &Path) -> Result<RoleDefinition> {
        let name = role_dir.file_name().unwrap().to_string_lossy().into_owned();
        let key = RoleKey::new(role_dir.to_path_buf(), &Overrides::new()).unwrap();
        let search = RoleSearch::new(vec![role_dir.parent().unwrap().to_path_buf()]);
        RoleDefinition::load(&name, role_dir.to_path_buf(), key, Overrides::new(), &search)
    }

    #[test]
    fn test_load_full_role() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        write_scope(&role_dir, "tasks", "- copy:\n    src: app.conf\n");
        write_scope(&role_dir, "handlers", "- service:\n    name: nginx\n");
        write_scope(&role_dir, "vars", "port: 8080\n");
        write_scope(&role_dir, "defaults", "workers: 4\n");
        write_scope(&role_dir, "meta", "dependencies:\n  - common\n");
        fs::create_dir(dir.path().join("common")).unwrap();

        let role = load_role(&role_dir).unwrap();
        assert_eq!(role.name(), "web");
        assert_eq!(role.tasks().len(), 1);
        assert_eq!(role.handlers().len(), 1);
        assert_eq!(role.role_vars().get("port").unwrap().as_u64(), Some(8080));
        assert_eq!(
            role.default_vars().get("workers").unwrap().as_u64(),
            Some(4)
        );
        assert_eq!(role.metadata().unwrap().dependencies.len(), 1);
    }

    #[test]
    fn test_load_bare_role_directory() {
        // A role with no scope subdirectories at all is valid
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("empty");
        fs::create_dir(&role_dir).unwrap();

        let role = load_role(&role_dir).unwrap();
        assert!(role.tasks().is_empty());
        assert!(role.handlers().is_empty());
        assert!(role.role_vars().is_empty());
        assert!(role.default_vars().is_empty());
        assert!(role.metadata().is_none());
    }

    #[test]
    fn test_load_vars_must_be_mapping() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        write_scope(&role_dir, "vars", "- not\n- a\n- mapping\n");

        let error = load_role(&role_dir).unwrap_err();
        assert!(matches!(error, Error::RoleLoad { .. }));
        let display = error.to_string();
        assert!(display.contains("web"));
        assert!(display.contains("vars must be a mapping"));
        assert!(display.contains("a sequence"));
    }

    #[test]
    fn test_load_defaults_must_be_mapping() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        write_scope(&role_dir, "defaults", "just a scalar\n");

        let error = load_role(&role_dir).unwrap_err();
        assert!(error.to_string().contains("defaults must be a mapping"));
    }

    #[test]
    fn test_load_tasks_must_be_sequence() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        write_scope(&role_dir, "tasks", "copy:\n  src: app.conf\n");

        let error = load_role(&role_dir).unwrap_err();
        assert!(error.to_string().contains("tasks must be a sequence"));
    }

    #[test]
    fn test_load_empty_scope_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        write_scope(&role_dir, "vars", "");
        write_scope(&role_dir, "tasks", "");

        let role = load_role(&role_dir).unwrap();
        assert!(role.role_vars().is_empty());
        assert!(role.tasks().is_empty());
    }

    #[test]
    fn test_load_ambiguous_scope_fails() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("web");
        let tasks_dir = role_dir.join("tasks");
        fs::create_dir_all(&tasks_dir).unwrap();
        fs::write(tasks_dir.join("main.yml"), "- ping:\n").unwrap();
        fs::write(tasks_dir.join("main.yaml"), "- ping:\n").unwrap();

        let error = load_role(&role_dir).unwrap_err();
        assert!(matches!(error, Error::ConfigAmbiguity { .. }));
    }

    #[test]
    fn test_register_parent_set_semantics() {
        let dir = TempDir::new().unwrap();
        let role_dir = dir.path().join("common");
        fs::create_dir(&role_dir).unwrap();
        let role = load_role(&role_dir).unwrap();

        let parent = RoleKey::new(dir.path().join("web"), &Overrides::new()).unwrap();
        assert!(role.register_parent(parent.clone()).unwrap());
        assert!(!role.register_parent(parent).unwrap());
        assert_eq!(role.parents().unwrap().len(), 1);
    }
}
