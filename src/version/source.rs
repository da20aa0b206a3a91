//! Source of the UI5 version overview

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::{info, warn};

use crate::config::FETCH_TIMEOUT_MS;
use crate::version::catalog::VersionOverview;
use crate::version::error::CatalogError;

/// Trait for fetching the version overview document
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the overview with all minor lines and patches
    async fn fetch_overview(&self) -> Result<VersionOverview, CatalogError>;
}

/// Catalog source reading `versionoverview.json` over HTTP
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Creates a source for a custom overview URL
    pub fn new(url: &str) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent("ui5-version-check")
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_overview(&self) -> Result<VersionOverview, CatalogError> {
        info!("Checking {} for available UI5 versions...", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("Version overview returned status {}: {}", status, self.url);
            return Err(CatalogError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let overview: VersionOverview = response.json().await.map_err(|e| {
            warn!("Failed to parse version overview: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        if overview.versions.is_empty() {
            return Err(CatalogError::NoVersions);
        }

        Ok(overview)
    }
}
