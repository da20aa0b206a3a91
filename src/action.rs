//! End-to-end run of the check as a GitHub Action step
//!
//! Resolves the manifest patterns, runs the [`VersionChecker`], publishes the
//! step outputs and writes the summary.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::CheckConfig;
use crate::discovery::{DiscoveryError, resolve_manifest_paths};
use crate::report::render_summary;
use crate::version::checker::VersionChecker;
use crate::version::error::CheckError;
use crate::version::quarter::QuarterResolver;
use crate::version::source::CatalogSource;

/// Output listing every manifest found by the patterns
pub const OUTPUT_FOUND_MANIFESTS: &str = "foundManifests";

/// Output listing the manifests rewritten by the run
pub const OUTPUT_MODIFIED_FILES: &str = "modifiedFiles";

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Some manifest.json files contain invalid/outdated versions")]
    InvalidVersions,
}

/// Files the runner reads step outputs and the job summary from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionEnvironment {
    /// `GITHUB_OUTPUT`
    pub output_file: Option<PathBuf>,
    /// `GITHUB_STEP_SUMMARY`
    pub summary_file: Option<PathBuf>,
}

impl ActionEnvironment {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("GITHUB_OUTPUT").ok(),
            std::env::var("GITHUB_STEP_SUMMARY").ok(),
        )
    }

    fn from_vars(output_file: Option<String>, summary_file: Option<String>) -> Self {
        Self {
            output_file: output_file.filter(|s| !s.is_empty()).map(PathBuf::from),
            summary_file: summary_file.filter(|s| !s.is_empty()).map(PathBuf::from),
        }
    }

    /// Set a step output; multiple values are joined by newlines
    pub fn set_output(&self, name: &str, values: &[String]) -> Result<(), ActionError> {
        let value = values.join("\n");
        let Some(path) = &self.output_file else {
            info!("Output {}: {}", name, value);
            return Ok(());
        };

        let delimiter = format!("ghadelimiter_{}", std::process::id());
        append(path, &format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
    }

    /// Append to the job summary, or print it when running outside of a runner
    pub fn write_summary(&self, markdown: &str) -> Result<(), ActionError> {
        match &self.summary_file {
            Some(path) => append(path, markdown),
            None => {
                println!("{}", markdown);
                Ok(())
            }
        }
    }
}

fn append(path: &Path, text: &str) -> Result<(), ActionError> {
    let io_error = |source| ActionError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    file.write_all(text.as_bytes()).map_err(io_error)
}

/// Result of a run that did not abort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub found_manifests: Vec<String>,
    pub modified_files: Vec<String>,
    pub has_errors: bool,
}

/// Run the check for `config` and publish outputs and summary to `env`
///
/// Returns [`ActionError::InvalidVersions`] after publishing everything when
/// some manifest failed the check without being fixed.
pub async fn run_action<S: CatalogSource + ?Sized>(
    config: &CheckConfig,
    source: &S,
    resolver: Arc<QuarterResolver>,
    env: &ActionEnvironment,
) -> Result<ActionOutcome, ActionError> {
    info!("Determine manifest.json file paths");
    let found_manifests = resolve_manifest_paths(&config.repo_path, &config.manifest_paths)?;
    info!(
        "Resolved the following manifest file paths: {}",
        found_manifests.join(", ")
    );
    env.set_output(OUTPUT_FOUND_MANIFESTS, &found_manifests)?;

    let mut checker = VersionChecker::new(&config.repo_path, config.policy.clone(), resolver);
    checker.run(source, &found_manifests).await?;

    let modified_files = checker.updated_files().to_vec();
    if !modified_files.is_empty() {
        env.set_output(OUTPUT_MODIFIED_FILES, &modified_files)?;
    }
    env.write_summary(&render_summary(checker.report()))?;

    if checker.has_errors() {
        return Err(ActionError::InvalidVersions);
    }

    Ok(ActionOutcome {
        found_manifests,
        modified_files,
        has_errors: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn from_vars_ignores_empty_values() {
        let env = ActionEnvironment::from_vars(Some(String::new()), Some("/tmp/summary".into()));

        assert_eq!(
            env,
            ActionEnvironment {
                output_file: None,
                summary_file: Some(PathBuf::from("/tmp/summary")),
            }
        );
    }

    #[test]
    #[serial]
    fn from_env_reads_runner_files() {
        // SAFETY: serialized with every other test touching the environment
        unsafe {
            std::env::set_var("GITHUB_OUTPUT", "/runner/output");
            std::env::remove_var("GITHUB_STEP_SUMMARY");
        }

        let env = ActionEnvironment::from_env();

        unsafe {
            std::env::remove_var("GITHUB_OUTPUT");
        }
        assert_eq!(env.output_file, Some(PathBuf::from("/runner/output")));
        assert_eq!(env.summary_file, None);
    }

    #[test]
    fn set_output_appends_delimited_block() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output");
        let env = ActionEnvironment {
            output_file: Some(output.clone()),
            summary_file: None,
        };

        env.set_output("modifiedFiles", &["a/manifest.json".into(), "b/manifest.json".into()])
            .unwrap();
        env.set_output("foundManifests", &["a/manifest.json".into()]).unwrap();

        let delimiter = format!("ghadelimiter_{}", std::process::id());
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            format!(
                "modifiedFiles<<{d}\na/manifest.json\nb/manifest.json\n{d}\n\
                 foundManifests<<{d}\na/manifest.json\n{d}\n",
                d = delimiter
            )
        );
    }

    #[test]
    fn write_summary_appends_to_summary_file() {
        let dir = TempDir::new().unwrap();
        let summary = dir.path().join("summary.md");
        std::fs::write(&summary, "# Previous step\n").unwrap();
        let env = ActionEnvironment {
            output_file: None,
            summary_file: Some(summary.clone()),
        };

        env.write_summary("## UI5 Version Check Result\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(summary).unwrap(),
            "# Previous step\n## UI5 Version Check Result\n"
        );
    }
}
