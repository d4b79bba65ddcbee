//! This module contains the logic for deciding which changed files go into the prompt.
#[cfg(feature = "colors")]
use colored::*;
use globset::GlobSet;
use log::debug;
use std::path::Path;

use crate::common::path::to_fwd_slash;

/// Determines whether a changed file should be reviewed based on include and exclude patterns.
///
/// # Arguments
///
/// * `path` - The repository-relative path of the changed file.
/// * `include_set` - Include patterns. An empty set includes everything.
/// * `exclude_set` - Exclude patterns. These always win over includes.
///
/// # Returns
///
/// * `bool` - `true` if the file should be reviewed, `false` otherwise.
pub fn should_review_file(path: &Path, include_set: &GlobSet, exclude_set: &GlobSet) -> bool {
    if include_set.is_empty() && exclude_set.is_empty() {
        return true;
    }

    let path_str = to_fwd_slash(path);

    let included = include_set.is_empty() || include_set.is_match(&path_str);
    let excluded = exclude_set.is_match(&path_str);
    let result = included && !excluded;

    #[cfg(feature = "colors")]
    debug!(
        "Checking path: {:?}, {}: {}, {}: {}, decision: {}",
        path_str,
        "included".bold().green(),
        included,
        "excluded".bold().red(),
        excluded,
        result
    );
    #[cfg(not(feature = "colors"))]
    debug!(
        "Checking path: {:?}, included: {}, excluded: {}, decision: {}",
        path_str, included, excluded, result
    );
    result
}
