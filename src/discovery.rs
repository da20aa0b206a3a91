//! Resolution of manifest glob patterns

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// File name every resolved path ends with
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("'manifestPaths' must not be empty")]
    NoPatterns,

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Glob patterns in 'manifestPaths' did not resolve to any 'manifest.json' file")]
    NoManifests,
}

/// Pattern for the manifest files: directory patterns get `/manifest.json` appended
fn manifest_pattern(repo_path: &Path, pattern: &str) -> String {
    let trimmed = pattern.trim_end_matches('/');
    let full = if trimmed.ends_with(MANIFEST_FILE_NAME) {
        repo_path.join(trimmed)
    } else {
        repo_path.join(trimmed).join(MANIFEST_FILE_NAME)
    };
    full.display().to_string()
}

fn relative_to(repo_path: &Path, path: &Path) -> String {
    path.strip_prefix(repo_path)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Resolve the patterns below `repo_path` to manifest paths relative to it
///
/// Paths are returned in discovery order without duplicates.
pub fn resolve_manifest_paths(
    repo_path: &Path,
    patterns: &[String],
) -> Result<Vec<String>, DiscoveryError> {
    if patterns.is_empty() {
        return Err(DiscoveryError::NoPatterns);
    }

    let mut found: Vec<String> = Vec::new();
    for pattern in patterns {
        let full_pattern = manifest_pattern(repo_path, pattern);
        debug!("Resolving manifest pattern {}", full_pattern);

        let paths = glob::glob(&full_pattern).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in paths {
            let path: PathBuf = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let rel_path = relative_to(repo_path, &path);
            if !found.contains(&rel_path) {
                found.push(rel_path);
            }
        }
    }

    if found.is_empty() {
        return Err(DiscoveryError::NoManifests);
    }
    Ok(found)
}
