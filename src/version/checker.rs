//! Check of all manifests of a repository against the version catalog

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Policy;
use crate::manifest::app_manifest::AppManifest;
use crate::manifest::manifest_json::ManifestJsonParser;
use crate::report::ReportRow;
use crate::version::catalog::VersionCatalog;
use crate::version::error::CheckError;
use crate::version::quarter::QuarterResolver;
use crate::version::source::CatalogSource;
use crate::version::validator::{ValidationVerdict, VersionValidator};

/// First line in upstream order that can serve as replacement
///
/// Lines past end of cloud provisioning or end of maintenance never qualify;
/// with `prefer_lts` only LTS lines do.
pub fn resolve_replacement(
    catalog: &VersionCatalog,
    prefer_lts: bool,
) -> Result<String, CheckError> {
    catalog
        .versions()
        .filter(|v| !catalog.is_eocp_reached(&v.quarter) && !v.end_of_maintenance)
        .find(|v| !prefer_lts || v.lts)
        .map(|v| v.id.clone())
        .ok_or(if prefer_lts {
            CheckError::NoLtsReplacement
        } else {
            CheckError::NoReplacement
        })
}

/// Validates manifests and, depending on the policy, fixes or reports them
pub struct VersionChecker {
    repo_path: PathBuf,
    policy: Policy,
    parser: ManifestJsonParser,
    resolver: Arc<QuarterResolver>,
    error_count: usize,
    updated_files: Vec<String>,
    report: Vec<ReportRow>,
    new_version: Option<String>,
}

impl VersionChecker {
    pub fn new(
        repo_path: impl Into<PathBuf>,
        policy: Policy,
        resolver: Arc<QuarterResolver>,
    ) -> Self {
        Self {
            repo_path: repo_path.into(),
            policy,
            parser: ManifestJsonParser::new(),
            resolver,
            error_count: 0,
            updated_files: Vec::new(),
            report: Vec::new(),
            new_version: None,
        }
    }

    /// Load the catalog from `source` and check every manifest in `manifest_paths`
    ///
    /// Paths are relative to the repository root. Manifests without a version
    /// entry are skipped and do not appear in the report.
    pub async fn run<S: CatalogSource + ?Sized>(
        &mut self,
        source: &S,
        manifest_paths: &[String],
    ) -> Result<(), CheckError> {
        info!("Loading UI5 versions");
        let overview = source.fetch_overview().await?;
        let catalog = VersionCatalog::from_overview(overview, Arc::clone(&self.resolver))?;

        self.check_all(&catalog, manifest_paths)
    }

    /// Check every manifest against an already loaded catalog
    pub fn check_all(
        &mut self,
        catalog: &VersionCatalog,
        manifest_paths: &[String],
    ) -> Result<(), CheckError> {
        info!("Checking UI5 version in manifest.json files");
        // Read and parse everything before the first rewrite touches the disk
        let manifests = manifest_paths
            .iter()
            .map(|path| AppManifest::load(&self.repo_path, path, &self.parser))
            .collect::<Result<Vec<_>, _>>()?;

        for mut manifest in manifests {
            if !manifest.has_version_field() {
                debug!("{}: {}", manifest.rel_path, manifest.status_text);
                continue;
            }

            self.check_manifest(catalog, &mut manifest)?;
            self.report.push(manifest.report_row());
        }
        Ok(())
    }

    fn check_manifest(
        &mut self,
        catalog: &VersionCatalog,
        manifest: &mut AppManifest,
    ) -> Result<(), CheckError> {
        let verdict = match &manifest.version {
            Some(version) => VersionValidator::new(catalog, &self.policy).validate(version),
            None => {
                let raw = manifest.declared_value().unwrap_or_default();
                ValidationVerdict::unknown_version(&raw)
            }
        };

        if verdict.valid {
            manifest.set_no_change_status(&verdict.warnings());
            return Ok(());
        }

        if self.policy.auto_fix {
            let new_version = self.new_version(catalog)?;
            manifest.update_version(&new_version, self.policy.prefer_lts)?;
            info!("{}: updated UI5 version to {}", manifest.rel_path, new_version);
            self.updated_files.push(manifest.rel_path.clone());
        } else {
            warn!(
                "{}: invalid UI5 version {}",
                manifest.rel_path,
                manifest.declared_value().unwrap_or_default()
            );
            self.error_count += 1;
            manifest.set_error_status(&verdict.messages);
        }
        Ok(())
    }

    /// Replacement version, resolved once per run
    fn new_version(&mut self, catalog: &VersionCatalog) -> Result<String, CheckError> {
        if let Some(version) = &self.new_version {
            return Ok(version.clone());
        }

        let version = resolve_replacement(catalog, self.policy.prefer_lts)?;
        self.new_version = Some(version.clone());
        Ok(version)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Manifests rewritten during the run
    pub fn updated_files(&self) -> &[String] {
        &self.updated_files
    }

    /// Report rows in processing order
    pub fn report(&self) -> &[ReportRow] {
        &self.report
    }
}
