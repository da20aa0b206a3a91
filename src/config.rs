use std::path::PathBuf;

use serde::Deserialize;

// =============================================================================
// Endpoints
// =============================================================================

/// Version overview consumed by the check
pub const VERSION_OVERVIEW_URL: &str = "https://ui5.sap.com/versionoverview.json";

/// Human readable version overview linked from the summary
pub const VERSION_OVERVIEW_PAGE_URL: &str = "https://ui5.sap.com/versionoverview.html";

// =============================================================================
// Defaults
// =============================================================================

/// Days before end of cloud provisioning below which a version is rejected
pub const DEFAULT_ALLOWED_DAYS_BEFORE_EOCP: i64 = 30;

/// Timeout for fetching the version overview in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Policy applied to every manifest of a run
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Policy {
    /// Rewrite invalid versions instead of reporting them as errors
    pub auto_fix: bool,
    /// Only LTS lines qualify as replacement
    pub prefer_lts: bool,
    /// End of maintenance lines produce a warning instead of an error
    pub allow_end_of_maintenance: bool,
    pub allowed_days_before_eocp: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            auto_fix: false,
            prefer_lts: false,
            allow_end_of_maintenance: false,
            allowed_days_before_eocp: DEFAULT_ALLOWED_DAYS_BEFORE_EOCP,
        }
    }
}

/// Everything a check run needs besides the catalog source
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    /// Root against which `manifest_paths` are resolved
    pub repo_path: PathBuf,
    /// Glob patterns naming manifest.json files or the directories holding them
    pub manifest_paths: Vec<String>,
    #[serde(default)]
    pub policy: Policy,
}

/// Split a multi-value input on newlines and commas, dropping empty entries
pub fn split_input(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the allowed days input, falling back to the default for anything non-numeric
pub fn parse_allowed_days(input: &str) -> i64 {
    input
        .trim()
        .parse()
        .unwrap_or(DEFAULT_ALLOWED_DAYS_BEFORE_EOCP)
}
