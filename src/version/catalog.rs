//! UI5 version catalog built from the SAP version overview document

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;
use tracing::{info, warn};

use crate::version::error::CatalogError;
use crate::version::quarter::{EocpFacts, QuarterResolver};
use crate::version::semver::coerce;

/// Support state of a minor line that is still fully maintained
pub const SUPPORT_MAINTENANCE: &str = "Maintenance";

/// Version overview document as served by `versionoverview.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionOverview {
    #[serde(default)]
    pub versions: Vec<OverviewVersion>,
    #[serde(default)]
    pub patches: Vec<OverviewPatch>,
}

/// Minor line entry of the overview (e.g. `1.120.*`)
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewVersion {
    pub version: String,
    /// "Maintenance" or "Out of maintenance"
    #[serde(default)]
    pub support: String,
    #[serde(default)]
    pub lts: bool,
    /// End of maintenance quarter, informational only
    #[serde(default)]
    pub eom: Option<String>,
    #[serde(default)]
    pub eocp: Option<String>,
}

/// Patch release entry of the overview (e.g. `1.120.4`)
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPatch {
    pub version: String,
    #[serde(default)]
    pub eocp: Option<String>,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub hidden: bool,
}

/// A tracked minor line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintainedVersion {
    pub id: String,
    pub triple: Version,
    pub lts: bool,
    /// Line only receives critical fixes
    pub end_of_maintenance: bool,
    /// End of cloud provisioning quarter descriptor
    pub quarter: String,
}

impl MaintainedVersion {
    pub fn new(id: &str, lts: bool, end_of_maintenance: bool, quarter: &str) -> Option<Self> {
        Some(Self {
            id: id.to_string(),
            triple: coerce(id)?,
            lts,
            end_of_maintenance,
            quarter: quarter.to_string(),
        })
    }
}

/// A tracked patch release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPatch {
    pub id: String,
    pub triple: Version,
    pub quarter: String,
}

impl VersionPatch {
    pub fn new(id: &str, quarter: &str) -> Option<Self> {
        Some(Self {
            id: id.to_string(),
            triple: coerce(id)?,
            quarter: quarter.to_string(),
        })
    }
}

/// Maintained lines (in upstream order) and available patches
///
/// The order of `versions` decides which line is picked as replacement, so it
/// is kept exactly as delivered by the overview.
pub struct VersionCatalog {
    versions: IndexMap<String, MaintainedVersion>,
    patches: HashMap<String, VersionPatch>,
    resolver: Arc<QuarterResolver>,
}

impl VersionCatalog {
    /// Creates an empty catalog
    pub fn new(resolver: Arc<QuarterResolver>) -> Self {
        Self {
            versions: IndexMap::new(),
            patches: HashMap::new(),
            resolver,
        }
    }

    pub fn with_version(mut self, version: MaintainedVersion) -> Self {
        self.versions.insert(version.id.clone(), version);
        self
    }

    pub fn with_patch(mut self, patch: VersionPatch) -> Self {
        self.patches.insert(patch.id.clone(), patch);
        self
    }

    /// Build the catalog from an overview document
    ///
    /// Removed and hidden patches are dropped. Entries whose version carries no
    /// numeric triple are skipped.
    pub fn from_overview(
        overview: VersionOverview,
        resolver: Arc<QuarterResolver>,
    ) -> Result<Self, CatalogError> {
        if overview.versions.is_empty() {
            return Err(CatalogError::NoVersions);
        }

        let mut catalog = Self::new(resolver);

        for patch in overview.patches {
            if patch.removed || patch.hidden {
                continue;
            }
            let quarter = patch.eocp.unwrap_or_default();
            match VersionPatch::new(&patch.version, &quarter) {
                Some(entry) => catalog = catalog.with_patch(entry),
                None => warn!("Skipping patch with invalid version: {}", patch.version),
            }
        }

        for version in overview.versions {
            let end_of_maintenance = version.support != SUPPORT_MAINTENANCE;
            let quarter = version.eocp.unwrap_or_default();
            match MaintainedVersion::new(&version.version, version.lts, end_of_maintenance, &quarter)
            {
                Some(entry) => catalog = catalog.with_version(entry),
                None => warn!("Skipping version with invalid version: {}", version.version),
            }
        }

        if catalog.versions.is_empty() {
            return Err(CatalogError::NoVersions);
        }

        info!(
            "Loaded {} UI5 versions and {} patches",
            catalog.versions.len(),
            catalog.patches.len()
        );

        Ok(catalog)
    }

    pub fn version(&self, id: &str) -> Option<&MaintainedVersion> {
        self.versions.get(id)
    }

    pub fn patch(&self, id: &str) -> Option<&VersionPatch> {
        self.patches.get(id)
    }

    /// Maintained lines in upstream order
    pub fn versions(&self) -> impl Iterator<Item = &MaintainedVersion> {
        self.versions.values()
    }

    /// End of cloud provisioning facts for a quarter descriptor
    pub fn eocp_facts(&self, quarter: &str) -> Option<EocpFacts> {
        self.resolver.resolve(quarter)
    }

    pub fn is_eocp_reached(&self, quarter: &str) -> bool {
        self.resolver.is_reached(quarter)
    }
}
