//! # Error Suggestions
//!
//! Helper functions for generating helpful error hints. Following CLI
//! recommendations, errors should tell users what went wrong AND how to
//! fix it: a missing role is usually a typo, so the hint names the closest
//! role that actually exists in the search paths.

use std::fs;

use crate::locator::RoleSearch;

/// Edit distance beyond which a candidate is not worth suggesting.
const MAX_DISTANCE: usize = 2;

/// Find the closest existing role name to `name` across the search paths.
///
/// Scans each search path for directories and ranks them by Levenshtein
/// distance, accepting only near-misses. Returns a ready-to-display hint,
/// or `None` when nothing is close enough.
pub fn similar_role_name(name: &str, search: &RoleSearch) -> Option<String> {
    let mut best: Option<(usize, String)> = None;

    for base in search.paths() {
        let Ok(entries) = fs::read_dir(base) else {
            continue;
        };
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let candidate = entry.file_name().to_string_lossy().into_owned();
            if candidate == name {
                continue;
            }
            let distance = strsim::levenshtein(&name.to_lowercase(), &candidate.to_lowercase());
            if distance <= MAX_DISTANCE
                && best.as_ref().is_none_or(|(d, _)| distance < *d)
            {
                best = Some((distance, candidate));
            }
        }
    }

    best.map(|(_, candidate)| format!("a role named '{}' exists, did you mean that?", candidate))
}
