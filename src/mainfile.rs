//! Resolution of the canonical entry file inside a role scope directory.
//!
//! Each scope subdirectory of a role (`meta/`, `tasks/`, `handlers/`,
//! `vars/`, `defaults/`) optionally contains exactly one entry file named
//! `main` with one of several accepted extensions. An absent directory or
//! entry file is valid (a role with no handlers is fine); two coexisting
//! candidates are not, since picking one silently would make behavior
//! depend on filesystem enumeration order.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Accepted entry file names, in fixed priority order.
const MAIN_CANDIDATES: [&str; 4] = ["main.yml", "main.yaml", "main.json", "main"];

/// Resolve the canonical entry file within `directory`.
///
/// Returns `Ok(None)` when the directory does not exist or holds no
/// candidate, `Ok(Some(path))` for exactly one candidate, and a
/// `ConfigAmbiguity` error naming the conflicting files when more than one
/// candidate is present.
pub fn resolve_main(directory: &Path) -> Result<Option<PathBuf>> {
    if !directory.is_dir() {
        return Ok(None);
    }

    let present: Vec<&str> = MAIN_CANDIDATES
        .iter()
        .copied()
        .filter(|candidate| directory.join(candidate).is_file())
        .collect();

    match present.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(directory.join(single))),
        several => Err(Error::ConfigAmbiguity {
            directory: directory.to_path_buf(),
            candidates: several.iter().map(|s| s.to_string()).collect(),
        }),
    }
}
