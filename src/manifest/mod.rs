//! manifest.json handling
//!
//! # Modules
//!
//! - [`app_manifest`]: A manifest file on disk with its check status
//! - [`manifest_json`]: Locates `sap.platform.cf/ui5VersionNumber` with tree-sitter
//! - [`traits`]: Parser trait and error types
//! - [`types`]: Declared version and status types

pub mod app_manifest;
pub mod manifest_json;
pub mod traits;
pub mod types;
