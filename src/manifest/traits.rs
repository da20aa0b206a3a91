//! Parser trait definition

use std::path::PathBuf;

use crate::manifest::types::VersionField;

/// Trait for locating the UI5 version field in a manifest
pub trait Parser {
    /// Parse the content and extract the version field, if the manifest declares one
    fn parse(&self, content: &str) -> Result<Option<VersionField>, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

/// Error type for reading and rewriting manifests
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("No 'sap.platform.cf/ui5VersionNumber' entry to rewrite in {0}")]
    NoVersionField(String),
}
