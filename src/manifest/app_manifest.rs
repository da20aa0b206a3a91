//! A manifest.json file of a UI5 application

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::manifest::traits::{ManifestError, Parser};
use crate::manifest::types::{DeclaredVersion, VersionField, VersionStatus};
use crate::report::ReportRow;
use crate::version::validator::ValidationMessage;

/// Placeholder for empty summary cells
pub const PLACEHOLDER: &str = "-";

/// Separator between messages in the summary description
pub const MESSAGE_SEPARATOR: &str = "<br/>";

/// manifest.json together with its declared version and check status
#[derive(Debug)]
pub struct AppManifest {
    /// Path relative to the repository root
    pub rel_path: String,
    full_path: PathBuf,
    content: String,
    /// Version field as found in the file
    pub field: Option<VersionField>,
    /// Parsed version of `field`, None if the value holds no numeric version
    pub version: Option<DeclaredVersion>,
    pub new_version: Option<String>,
    pub status: VersionStatus,
    pub status_text: String,
}

impl AppManifest {
    /// Read the manifest at `rel_path` below `repo_path` and locate its version
    pub fn load(
        repo_path: &Path,
        rel_path: &str,
        parser: &dyn Parser,
    ) -> Result<Self, ManifestError> {
        let full_path = repo_path.join(rel_path);
        let content = std::fs::read_to_string(&full_path).map_err(|source| ManifestError::Io {
            path: full_path.clone(),
            source,
        })?;

        Self::from_content(rel_path, full_path, content, parser)
    }

    fn from_content(
        rel_path: &str,
        full_path: PathBuf,
        content: String,
        parser: &dyn Parser,
    ) -> Result<Self, ManifestError> {
        let field = parser.parse(&content).map_err(|source| ManifestError::Parse {
            path: rel_path.to_string(),
            source,
        })?;
        let version = field.as_ref().and_then(|f| DeclaredVersion::parse(&f.value));

        let status_text = if field.is_none() {
            debug!("{}: no 'sap.platform.cf/ui5VersionNumber' entry", rel_path);
            "No section 'sap.platform.cf/ui5VersionNumber' found. Skipping check".to_string()
        } else {
            PLACEHOLDER.to_string()
        };

        Ok(Self {
            rel_path: rel_path.to_string(),
            full_path,
            content,
            field,
            version,
            new_version: None,
            status: VersionStatus::Ok,
            status_text,
        })
    }

    /// The manifest declares a version (parseable or not)
    pub fn has_version_field(&self) -> bool {
        self.field.is_some()
    }

    /// Declared value with the wildcard normalized, as shown in the summary
    pub fn declared_value(&self) -> Option<String> {
        match (&self.version, &self.field) {
            (Some(version), _) => Some(version.raw.clone()),
            (None, Some(field)) => Some(field.value.clone()),
            (None, None) => None,
        }
    }

    /// Replace the declared version with `version` and write the file
    ///
    /// The value is spliced in at the offsets found by the parser, so only the
    /// characters between the quotes change.
    pub fn update_version(&mut self, version: &str, is_lts: bool) -> Result<(), ManifestError> {
        let Some(field) = self.field.as_mut() else {
            return Err(ManifestError::NoVersionField(self.rel_path.clone()));
        };

        let mut updated = String::with_capacity(self.content.len() + version.len());
        updated.push_str(&self.content[..field.start_offset]);
        updated.push_str(version);
        updated.push_str(&self.content[field.end_offset..]);

        std::fs::write(&self.full_path, &updated).map_err(|source| ManifestError::Io {
            path: self.full_path.clone(),
            source,
        })?;

        debug!("{}: version updated to {}", self.rel_path, version);
        field.end_offset = field.start_offset + version.len();
        self.content = updated;
        self.new_version = Some(version.to_string());
        self.status = VersionStatus::Ok;
        self.status_text = if is_lts {
            "Version has been updated to latest LTS version".to_string()
        } else {
            "Version has been updated to latest version".to_string()
        };
        Ok(())
    }

    /// Keep the version; remaining messages are advisory
    pub fn set_no_change_status(&mut self, messages: &[ValidationMessage]) {
        if messages.is_empty() {
            self.status = VersionStatus::Ok;
            self.status_text = "No change required".to_string();
        } else {
            self.status = VersionStatus::Warn;
            self.status_text = join_messages(messages);
        }
    }

    pub fn set_error_status(&mut self, messages: &[ValidationMessage]) {
        self.status = VersionStatus::Error;
        self.status_text = join_messages(messages);
    }

    pub fn report_row(&self) -> ReportRow {
        ReportRow {
            manifest_path: self.rel_path.clone(),
            found_version: self
                .declared_value()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            updated_version: self
                .new_version
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            status: self.status,
            description: self.status_text.clone(),
        }
    }
}

fn join_messages(messages: &[ValidationMessage]) -> String {
    messages
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
}
