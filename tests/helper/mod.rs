//! Shared fixtures for the end-to-end tests

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use tempfile::TempDir;

use ui5_version_check::action::ActionEnvironment;
use ui5_version_check::version::catalog::VersionOverview;
use ui5_version_check::version::error::CatalogError;
use ui5_version_check::version::quarter::{FixedClock, QuarterResolver};
use ui5_version_check::version::source::CatalogSource;

/// Catalog source serving a fixed overview
pub struct StaticSource {
    overview: VersionOverview,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(overview: VersionOverview) -> Self {
        Self {
            overview,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_overview(&self) -> Result<VersionOverview, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.overview.clone())
    }
}

/// Resolver pinned to 2025-03-15 00:00 UTC
pub fn resolver() -> Arc<QuarterResolver> {
    Arc::new(QuarterResolver::new(Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap(),
    ))))
}

/// Overview as published upstream, newest line first
pub fn overview() -> VersionOverview {
    serde_json::from_value(json!({
        "versions": [
            { "version": "1.134.*", "support": "Maintenance", "lts": false, "eom": "", "eocp": "Q1/2026" },
            { "version": "1.133.*", "support": "Maintenance", "lts": false, "eom": "Q3/2025", "eocp": "Q3/2026" },
            { "version": "1.132.*", "support": "Out of maintenance", "lts": false, "eom": "", "eocp": "Q2/2026" },
            { "version": "1.120.*", "support": "Maintenance", "lts": true, "eom": "Q1/2025", "eocp": "Q1/2030" },
            { "version": "1.114.*", "support": "Out of maintenance", "lts": false, "eom": "Q4/2024", "eocp": "Q1/2025" }
        ],
        "patches": [
            { "version": "1.134.0", "eocp": "To Be Determined" },
            { "version": "1.120.1", "eocp": "Q2/2025" },
            { "version": "1.120.0", "eocp": "Q1/2025", "removed": true }
        ]
    }))
    .unwrap()
}

/// Repository checkout with manifests below a temporary directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn with_manifest(self, rel_dir: &str, version: &str) -> Self {
        let content = json!({
            "_version": "1.59.0",
            "sap.app": { "id": rel_dir.replace('/', ".") },
            "sap.platform.cf": { "ui5VersionNumber": version }
        });
        self.with_file(
            &format!("{}/manifest.json", rel_dir),
            &serde_json::to_string_pretty(&content).unwrap(),
        )
    }

    pub fn with_file(self, rel_path: &str, content: &str) -> Self {
        let path = self.dir.path().join(rel_path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, rel_path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel_path)).unwrap()
    }
}

/// Runner files placed outside of the checkout
pub fn runner_env(runner: &TempDir) -> ActionEnvironment {
    ActionEnvironment {
        output_file: Some(runner.path().join("output")),
        summary_file: Some(runner.path().join("summary.md")),
    }
}
