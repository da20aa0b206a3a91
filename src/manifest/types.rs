//! Common types for manifests

use semver::Version;

use crate::version::semver::{coerce, floating_key, is_floating};

/// Location and raw value of `sap.platform.cf/ui5VersionNumber`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionField {
    /// Value as written in the file
    pub value: String,
    /// Byte offset of the value in the source (start, inside the quotes)
    pub start_offset: usize,
    /// Byte offset of the value in the source (end, inside the quotes)
    pub end_offset: usize,
}

/// UI5 version declared by a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredVersion {
    /// Declared value with the wildcard token normalized to `*`
    pub raw: String,
    pub triple: Version,
    /// Any patch of the minor line is accepted (`1.120.*`)
    pub floating: bool,
    /// Minor line the version belongs to (`1.120.*`), also for pinned versions
    pub floating_key: String,
}

impl DeclaredVersion {
    /// Parse a declared value such as `1.120.x`, `1.120.*` or `1.120.4`
    ///
    /// Returns None if the value carries no numeric version.
    pub fn parse(value: &str) -> Option<Self> {
        let raw = value.replacen(['x', 'X'], "*", 1);
        let triple = coerce(&raw)?;

        Some(Self {
            floating: is_floating(&raw),
            floating_key: floating_key(&triple),
            triple,
            raw,
        })
    }
}

/// Outcome of the check for a single manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionStatus {
    #[default]
    Ok,
    Warn,
    Error,
}

impl VersionStatus {
    /// Symbol shown in the summary table
    pub fn symbol(&self) -> &'static str {
        match self {
            VersionStatus::Ok => "✅",
            VersionStatus::Warn => "⚠️",
            VersionStatus::Error => "❌",
        }
    }
}
