//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and canned
//! role metadata snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = RolesFixture::new().with_role("web");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::meta;
    pub use super::RolesFixture;
}

/// Common role metadata YAML snippets for testing.
#[allow(dead_code)]
pub mod meta {
    /// No dependencies, explicitly.
    pub const EMPTY: &str = "dependencies: []\n";

    /// A single plain-string dependency on `common`.
    pub const DEPENDS_ON_COMMON: &str = "dependencies:\n  - common\n";

    /// A parameterized dependency in mapping form.
    pub const PARAMETERIZED: &str = r#"dependencies:
  - role: listener
    port: 8080
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "dependencies: [unclosed\n";

    /// Dependencies declared as a mapping instead of a sequence.
    pub const WRONG_SHAPE: &str = "dependencies:\n  common: true\n";
}

/// A test fixture holding a temporary roles directory.
///
/// Simplifies the common pattern of laying out role directories with
/// `meta/`, `tasks/`, `handlers/`, `vars/`, and `defaults/` subtrees.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = RolesFixture::new()
///     .with_role("common")
///     .with_meta("web", meta::DEPENDS_ON_COMMON);
///
/// fixture
///     .command()
///     .arg("resolve")
///     .arg("web")
///     .assert()
///     .success();
/// ```
pub struct RolesFixture {
    temp_dir: assert_fs::TempDir,
}

impl RolesFixture {
    /// Create a new fixture with an empty temporary roles directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add an empty role directory (a role with no content files).
    pub fn with_role(self, name: &str) -> Self {
        self.temp_dir
            .child(name)
            .create_dir_all()
            .expect("Failed to create role directory");
        self
    }

    /// Add (or replace) a role's `meta/main.yml` with the given content.
    pub fn with_meta(self, name: &str, content: &str) -> Self {
        self.with_scope_file(name, "meta", "main.yml", content)
    }

    /// Add a role's `tasks/main.yml` with the given content.
    #[allow(dead_code)]
    pub fn with_tasks(self, name: &str, content: &str) -> Self {
        self.with_scope_file(name, "tasks", "main.yml", content)
    }

    /// Add a role's `handlers/main.yml` with the given content.
    #[allow(dead_code)]
    pub fn with_handlers(self, name: &str, content: &str) -> Self {
        self.with_scope_file(name, "handlers", "main.yml", content)
    }

    /// Add a role's `vars/main.yml` with the given content.
    #[allow(dead_code)]
    pub fn with_vars(self, name: &str, content: &str) -> Self {
        self.with_scope_file(name, "vars", "main.yml", content)
    }

    /// Add a role's `defaults/main.yml` with the given content.
    #[allow(dead_code)]
    pub fn with_defaults(self, name: &str, content: &str) -> Self {
        self.with_scope_file(name, "defaults", "main.yml", content)
    }

    /// Add an arbitrary file under a role's scope directory. Useful for
    /// exercising alternative entry-file names (`main.yaml`, `main.json`,
    /// extensionless `main`) and ambiguity errors.
    pub fn with_scope_file(self, name: &str, scope: &str, file: &str, content: &str) -> Self {
        self.temp_dir
            .child(name)
            .child(scope)
            .child(file)
            .write_str(content)
            .expect("Failed to write scope file");
        self
    }

    /// Get the path to the temporary roles directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to a role's directory.
    #[allow(dead_code)]
    pub fn role_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Get access to the underlying TempDir for advanced usage.
    #[allow(dead_code)]
    pub fn temp_dir(&self) -> &assert_fs::TempDir {
        &self.temp_dir
    }
}

impl Default for RolesFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl RolesFixture {
    /// Create a CLI command pointed at this fixture's roles directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rolegraph");
        cmd.current_dir(self.path())
            .arg("--log-level")
            .arg("error")
            .env("ROLEGRAPH_ROLES_PATH", self.path());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = RolesFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_role() {
        let fixture = RolesFixture::new().with_role("web");
        assert!(fixture.role_path("web").is_dir());
    }

    #[test]
    fn test_fixture_with_meta() {
        let fixture = RolesFixture::new().with_meta("web", meta::DEPENDS_ON_COMMON);
        assert!(fixture.role_path("web").join("meta").join("main.yml").exists());
    }

    #[test]
    fn test_meta_snippets_are_valid_yaml() {
        let snippets = [meta::EMPTY, meta::DEPENDS_ON_COMMON, meta::PARAMETERIZED];
        for snippet in snippets {
            serde_yaml::from_str::<serde_yaml::Value>(snippet)
                .expect("Snippet should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(meta::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
