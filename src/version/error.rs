use thiserror::Error;

use crate::manifest::traits::ManifestError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No UI5 versions found in response")]
    NoVersions,
}

/// Errors that abort a check run
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("No valid LTS UI5 version found to update")]
    NoLtsReplacement,

    #[error("No valid UI5 version found to update")]
    NoReplacement,
}
