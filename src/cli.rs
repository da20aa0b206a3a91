//! Command line and action input handling
//!
//! Every option can be given as flag or through the `INPUT_*` variables the
//! Actions runner exports for the `with:` block of a step.

use std::path::PathBuf;

use clap::{ArgAction, Parser, builder::BoolishValueParser};

use crate::config::{CheckConfig, Policy, VERSION_OVERVIEW_URL, parse_allowed_days, split_input};

#[derive(Debug, Parser)]
#[command(name = "ui5-version-check")]
#[command(
    version,
    about = "Check the UI5 version of manifest.json files against the SAP version overview"
)]
pub struct Cli {
    /// Glob patterns for manifest.json files or their directories, separated by newlines or commas
    #[arg(long, env = "INPUT_MANIFESTPATHS", default_value = "")]
    pub manifest_paths: String,

    /// Rewrite invalid versions with the newest valid one
    #[arg(
        long,
        env = "INPUT_FIXOUTDATED",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub fix_outdated: bool,

    /// Only use LTS versions as replacement
    #[arg(
        long,
        env = "INPUT_USELTS",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub use_lts: bool,

    /// Accept versions past end of maintenance with a warning
    #[arg(
        long,
        env = "INPUT_EOMALLOWED",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub eom_allowed: bool,

    /// Days before end of cloud provisioning below which a version is rejected
    #[arg(
        long,
        env = "INPUT_ALLOWEDDAYSBEFOREEOCP",
        default_value = "30",
        value_parser = allowed_days
    )]
    pub allowed_days_before_eocp: i64,

    /// Repository root the manifest patterns are resolved against
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub repo_path: PathBuf,

    /// Location of the version overview document
    #[arg(long, default_value = VERSION_OVERVIEW_URL)]
    pub overview_url: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Additionally write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn allowed_days(input: &str) -> Result<i64, String> {
    Ok(parse_allowed_days(input))
}

impl Cli {
    pub fn to_config(&self) -> CheckConfig {
        CheckConfig {
            repo_path: self.repo_path.clone(),
            manifest_paths: split_input(&self.manifest_paths),
            policy: Policy {
                auto_fix: self.fix_outdated,
                prefer_lts: self.use_lts,
                allow_end_of_maintenance: self.eom_allowed,
                allowed_days_before_eocp: self.allowed_days_before_eocp,
            },
        }
    }
}
