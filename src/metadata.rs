//! Parsing of a role's `meta` scope into structured metadata.
//!
//! The only field this subsystem cares about is the ordered dependency
//! list. A dependency entry is either a bare role name or a mapping whose
//! `role` (or legacy `name`) key names the role and whose remaining keys
//! become caller-supplied override parameters for that instantiation.
//! Unrelated metadata keys (author/platform info blocks and the like) are
//! tolerated and ignored.

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::locator::RoleSearch;
use crate::reference::{Overrides, RoleReference};

/// Parsed content of a role's `meta` scope.
#[derive(Debug, Clone)]
pub struct RoleMetadata {
    /// Declared dependencies, in declaration order.
    pub dependencies: Vec<RoleReference>,
}

impl RoleMetadata {
    /// Parse metadata for `role` from its loaded `meta` document.
    ///
    /// `search` is the search configuration dependency references will
    /// carry (already scoped to the declaring role's location).
    pub fn parse(role: &str, document: &Value, search: &RoleSearch) -> Result<Self> {
        let mapping = match document {
            Value::Null => {
                return Ok(Self {
                    dependencies: Vec::new(),
                })
            }
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(Error::RoleLoad {
                    role: role.to_string(),
                    message: "meta must be a mapping".to_string(),
                })
            }
        };

        let dependencies = match mapping.get("dependencies") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(entries)) => entries
                .iter()
                .map(|entry| parse_dependency(role, entry, search))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::RoleLoad {
                    role: role.to_string(),
                    message: "meta dependencies must be a sequence".to_string(),
                })
            }
        };

        Ok(Self { dependencies })
    }
}

/// Parse a single dependency entry into a `RoleReference`.
fn parse_dependency(role: &str, entry: &Value, search: &RoleSearch) -> Result<RoleReference> {
    match entry {
        Value::String(name) => Ok(RoleReference::new(name.clone(), search.clone())),
        Value::Mapping(mapping) => {
            let name = mapping
                .get("role")
                .or_else(|| mapping.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| Error::RoleLoad {
                    role: role.to_string(),
                    message: "dependency entry is missing a 'role' name".to_string(),
                })?
                .to_string();

            let mut overrides = Overrides::new();
            for (key, value) in mapping {
                let key = key.as_str().ok_or_else(|| Error::RoleLoad {
                    role: role.to_string(),
                    message: format!("dependency '{}' has a non-string parameter key", name),
                })?;
                if key == "role" || key == "name" {
                    continue;
                }
                overrides.insert(key.to_string(), value.clone());
            }

            Ok(RoleReference::with_overrides(name, search.clone(), overrides))
        }
        _ => Err(Error::RoleLoad {
            role: role.to_string(),
            message: "dependency entries must be role names or mappings".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn search() -> RoleSearch {
        RoleSearch::new(vec![PathBuf::from("roles")])
    }

    fn parse_yaml(input: &str) -> Value {
        serde_yaml::from_str(input).unwrap()
    }

    #[test]
    fn test_parse_null_document() {
        let metadata = RoleMetadata::parse("web", &Value::Null, &search()).unwrap();
        assert!(metadata.dependencies.is_empty());
    }

    #[test]
    fn test_parse_no_dependencies_key() {
        let doc = parse_yaml("author: ops-team\n");
        let metadata = RoleMetadata::parse("web", &doc, &search()).unwrap();
        assert!(metadata.dependencies.is_empty());
    }

    #[test]
    fn test_parse_null_dependencies() {
        let doc = parse_yaml("dependencies:\n");
        let metadata = RoleMetadata::parse("web", &doc, &search()).unwrap();
        assert!(metadata.dependencies.is_empty());
    }

    #[test]
    fn test_parse_string_dependencies_keep_order() {
        let doc = parse_yaml("dependencies:\n  - common\n  - firewall\n");
        let metadata = RoleMetadata::parse("web", &doc, &search()).unwrap();

        let names: Vec<&str> = metadata
            .dependencies
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["common", "firewall"]);
    }

    #[test]
    fn test_parse_mapping_dependency_with_overrides() {
        let doc = parse_yaml("dependencies:\n  - role: common\n    port: 8080\n");
        let metadata = RoleMetadata::parse("web", &doc, &search()).unwrap();

        let dep = &metadata.dependencies[0];
        assert_eq!(dep.name, "common");
        assert_eq!(dep.overrides.get("port").unwrap().as_u64(), Some(8080));
        assert!(!dep.overrides.contains_key("role"));
    }

    #[test]
    fn test_parse_mapping_dependency_legacy_name_key() {
        let doc = parse_yaml("dependencies:\n  - name: common\n");
        let metadata = RoleMetadata::parse("web", &doc, &search()).unwrap();
        assert_eq!(metadata.dependencies[0].name, "common");
    }

    #[test]
    fn test_parse_dependency_missing_role_name() {
        let doc = parse_yaml("dependencies:\n  - port: 8080\n");
        let error = RoleMetadata::parse("web", &doc, &search()).unwrap_err();
        assert!(matches!(error, Error::RoleLoad { .. }));
        assert!(error.to_string().contains("missing a 'role' name"));
    }

    #[test]
    fn test_parse_dependency_invalid_entry_type() {
        let doc = parse_yaml("dependencies:\n  - 42\n");
        let error = RoleMetadata::parse("web", &doc, &search()).unwrap_err();
        assert!(matches!(error, Error::RoleLoad { .. }));
    }

    #[test]
    fn test_parse_meta_not_a_mapping() {
        let doc = parse_yaml("- common\n");
        let error = RoleMetadata::parse("web", &doc, &search()).unwrap_err();
        assert!(error.to_string().contains("meta must be a mapping"));
    }

    #[test]
    fn test_parse_dependencies_not_a_sequence() {
        let doc = parse_yaml("dependencies: common\n");
        let error = RoleMetadata::parse("web", &doc, &search()).unwrap_err();
        assert!(error.to_string().contains("must be a sequence"));
    }
}
