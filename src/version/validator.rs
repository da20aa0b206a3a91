//! Lifecycle validation of a declared UI5 version
//!
//! The validator walks a short decision chain and stops at the first
//! disqualifying condition:
//!
//! 1. the minor line must exist and must not have reached end of cloud provisioning
//! 2. an end of maintenance line is an error unless the policy allows it
//! 3. pinned versions must reference an available patch
//! 4. the remaining days before end of cloud provisioning must exceed the policy limit

use crate::config::Policy;
use crate::manifest::types::DeclaredVersion;
use crate::version::catalog::{MaintainedVersion, VersionCatalog};
use crate::version::quarter::EocpFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub text: String,
    pub severity: Severity,
}

impl ValidationMessage {
    pub fn warn(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Warn,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub messages: Vec<ValidationMessage>,
}

impl ValidationVerdict {
    /// Verdict for a version value that does not name any known minor line
    pub fn unknown_version(raw: &str) -> Self {
        Self {
            valid: false,
            messages: vec![invalid_version_message(raw)],
        }
    }

    /// Advisory messages only
    pub fn warnings(&self) -> Vec<ValidationMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warn)
            .cloned()
            .collect()
    }
}

fn invalid_version_message(raw: &str) -> ValidationMessage {
    ValidationMessage::error(format!(
        "Version {} is invalid or reached end of cloud provisioning",
        raw
    ))
}

/// Validates declared versions against a catalog under a policy
pub struct VersionValidator<'a> {
    catalog: &'a VersionCatalog,
    policy: &'a Policy,
}

impl<'a> VersionValidator<'a> {
    pub fn new(catalog: &'a VersionCatalog, policy: &'a Policy) -> Self {
        Self { catalog, policy }
    }

    pub fn validate(&self, declared: &DeclaredVersion) -> ValidationVerdict {
        let mut messages = Vec::new();
        let valid = if declared.floating {
            self.validate_floating(declared, &mut messages)
        } else {
            self.validate_pinned(declared, &mut messages)
        };

        ValidationVerdict { valid, messages }
    }

    /// `1.120.*`: the minor line itself decides
    fn validate_floating(
        &self,
        declared: &DeclaredVersion,
        messages: &mut Vec<ValidationMessage>,
    ) -> bool {
        let Some(version) = self.provisioned_line(&declared.raw, declared, messages) else {
            return false;
        };
        if !self.check_end_of_maintenance(version, messages) {
            return false;
        }

        self.check_remaining_days(self.catalog.eocp_facts(&version.quarter), messages)
    }

    /// `1.120.4`: the minor line must be usable and the patch must still be provisioned
    fn validate_pinned(
        &self,
        declared: &DeclaredVersion,
        messages: &mut Vec<ValidationMessage>,
    ) -> bool {
        let Some(version) = self.provisioned_line(&declared.floating_key, declared, messages)
        else {
            return false;
        };
        if !self.check_end_of_maintenance(version, messages) {
            return false;
        }

        let Some(patch) = self.catalog.patch(&declared.raw) else {
            let triple = &declared.triple;
            messages.push(ValidationMessage::error(format!(
                "Patch {} of version {}.{} is not available",
                triple.patch, triple.major, triple.minor
            )));
            return false;
        };

        self.check_remaining_days(self.catalog.eocp_facts(&patch.quarter), messages)
    }

    /// Minor line `key`, unless it is unknown or already removed from the platform
    fn provisioned_line(
        &self,
        key: &str,
        declared: &DeclaredVersion,
        messages: &mut Vec<ValidationMessage>,
    ) -> Option<&'a MaintainedVersion> {
        match self.catalog.version(key) {
            Some(version) if !self.catalog.is_eocp_reached(&version.quarter) => Some(version),
            _ => {
                messages.push(invalid_version_message(&declared.raw));
                None
            }
        }
    }

    fn check_end_of_maintenance(
        &self,
        version: &MaintainedVersion,
        messages: &mut Vec<ValidationMessage>,
    ) -> bool {
        if !version.end_of_maintenance {
            return true;
        }

        let text = "Version reached end of maintenance";
        if self.policy.allow_end_of_maintenance {
            messages.push(ValidationMessage::warn(text));
            true
        } else {
            messages.push(ValidationMessage::error(text));
            false
        }
    }

    fn check_remaining_days(
        &self,
        facts: Option<EocpFacts>,
        messages: &mut Vec<ValidationMessage>,
    ) -> bool {
        let Some(facts) = facts else {
            return true;
        };
        // The last day of the window counts as no signal, like the sentinel
        if !facts.within_quarter || facts.remaining_days <= 0 {
            return true;
        }

        let remaining = facts.remaining_days;
        if remaining < self.policy.allowed_days_before_eocp {
            messages.push(ValidationMessage::error(format!(
                "End of cloud provisioning for version imminent. Remaining days {}",
                remaining
            )));
            false
        } else {
            messages.push(ValidationMessage::warn(format!(
                "Version nearing end of cloud provisioning. Remaining days {}",
                remaining
            )));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::catalog::VersionPatch;
    use crate::version::quarter::{FixedClock, QuarterResolver};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;
    use std::sync::Arc;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn validate(
        declared: &DeclaredVersion,
        catalog: &VersionCatalog,
        policy: &Policy,
    ) -> ValidationVerdict {
        VersionValidator::new(catalog, policy).validate(declared)
    }

    fn catalog_at(now: DateTime<Utc>) -> VersionCatalog {
        VersionCatalog::new(Arc::new(QuarterResolver::new(Arc::new(FixedClock(now)))))
    }

    fn line(id: &str, eom: bool) -> MaintainedVersion {
        MaintainedVersion::new(id, true, eom, "Q1/2026").unwrap()
    }

    fn patch(id: &str) -> VersionPatch {
        VersionPatch::new(id, "Q1/2026").unwrap()
    }

    fn policy(allowed_days_before_eocp: i64, allow_end_of_maintenance: bool) -> Policy {
        Policy {
            allowed_days_before_eocp,
            allow_end_of_maintenance,
            ..Policy::default()
        }
    }

    fn declared(value: &str) -> DeclaredVersion {
        DeclaredVersion::parse(value).unwrap()
    }

    #[rstest]
    #[case("1.117.*")]
    #[case("1.117.1")]
    fn validate_accepts_maintained_version_before_eocp_quarter(#[case] value: &str) {
        let catalog = catalog_at(at(2025, 3, 15))
            .with_version(line("1.117.*", false))
            .with_patch(patch("1.117.1"));

        let verdict = validate(&declared(value), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: true,
                messages: vec![],
            }
        );
    }

    #[rstest]
    #[case("1.117.*")]
    #[case("1.117.1")]
    fn validate_rejects_unknown_version(#[case] value: &str) {
        let catalog = catalog_at(at(2025, 3, 15));

        let verdict = validate(&declared(value), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: false,
                messages: vec![ValidationMessage::error(format!(
                    "Version {} is invalid or reached end of cloud provisioning",
                    value
                ))],
            }
        );
    }

    #[test]
    fn validate_rejects_version_after_eocp() {
        let catalog = catalog_at(at(2026, 5, 10)).with_version(line("1.117.*", false));

        let verdict = validate(&declared("1.117.*"), &catalog, &policy(30, true));

        assert!(!verdict.valid);
        assert_eq!(
            verdict.messages,
            vec![ValidationMessage::error(
                "Version 1.117.* is invalid or reached end of cloud provisioning"
            )]
        );
    }

    #[test]
    fn validate_rejects_missing_patch() {
        let catalog = catalog_at(at(2025, 3, 15)).with_version(line("1.117.*", false));

        let verdict = validate(&declared("1.117.1"), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: false,
                messages: vec![ValidationMessage::error(
                    "Patch 1 of version 1.117 is not available"
                )],
            }
        );
    }

    #[rstest]
    #[case("1.117.*")]
    #[case("1.117.1")]
    fn validate_stops_at_disallowed_end_of_maintenance(#[case] value: &str) {
        // No patch in the catalog: the patch check must not be reached
        let catalog = catalog_at(at(2026, 3, 15)).with_version(line("1.117.*", true));

        let verdict = validate(&declared(value), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: false,
                messages: vec![ValidationMessage::error("Version reached end of maintenance")],
            }
        );
    }

    #[test]
    fn validate_warns_about_allowed_end_of_maintenance() {
        let catalog = catalog_at(at(2025, 3, 15)).with_version(line("1.117.*", true));

        let verdict = validate(&declared("1.117.*"), &catalog, &policy(30, true));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: true,
                messages: vec![ValidationMessage::warn("Version reached end of maintenance")],
            }
        );
    }

    #[test]
    fn validate_pinned_with_allowed_end_of_maintenance_still_needs_patch() {
        let catalog = catalog_at(at(2025, 3, 15)).with_version(line("1.117.*", true));

        let verdict = validate(&declared("1.117.1"), &catalog, &policy(30, true));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: false,
                messages: vec![
                    ValidationMessage::warn("Version reached end of maintenance"),
                    ValidationMessage::error("Patch 1 of version 1.117 is not available"),
                ],
            }
        );
    }

    #[rstest]
    #[case("1.117.*")]
    #[case("1.117.1")]
    fn validate_warns_when_remaining_days_are_acceptable(#[case] value: &str) {
        let catalog = catalog_at(at(2026, 3, 15))
            .with_version(line("1.117.*", false))
            .with_patch(patch("1.117.1"));

        let verdict = validate(&declared(value), &catalog, &policy(10, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: true,
                messages: vec![ValidationMessage::warn(
                    "Version nearing end of cloud provisioning. Remaining days 16"
                )],
            }
        );
    }

    #[rstest]
    #[case("1.117.*")]
    #[case("1.117.1")]
    fn validate_rejects_imminent_eocp(#[case] value: &str) {
        let catalog = catalog_at(at(2026, 3, 15))
            .with_version(line("1.117.*", false))
            .with_patch(patch("1.117.1"));

        let verdict = validate(&declared(value), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: false,
                messages: vec![ValidationMessage::error(
                    "End of cloud provisioning for version imminent. Remaining days 16"
                )],
            }
        );
    }

    #[test]
    fn validate_pinned_uses_patch_quarter_for_remaining_days() {
        let catalog = catalog_at(at(2026, 3, 15))
            .with_version(MaintainedVersion::new("1.117.*", false, false, "Q4/2026").unwrap())
            .with_patch(VersionPatch::new("1.117.1", "Q1/2026").unwrap());

        assert!(validate(&declared("1.117.*"), &catalog, &policy(30, false)).valid);
        assert!(!validate(&declared("1.117.1"), &catalog, &policy(30, false)).valid);
    }

    #[test]
    fn validate_ignores_last_day_of_window() {
        // 23:00 on the day before the end date leaves zero whole days
        let now = Utc.with_ymd_and_hms(2026, 3, 30, 23, 0, 0).unwrap();
        let catalog = catalog_at(now).with_version(line("1.117.*", false));

        let verdict = validate(&declared("1.117.*"), &catalog, &policy(30, false));

        assert_eq!(
            verdict,
            ValidationVerdict {
                valid: true,
                messages: vec![],
            }
        );
    }

    #[test]
    fn unknown_version_reports_raw_value() {
        assert_eq!(
            ValidationVerdict::unknown_version("latest"),
            ValidationVerdict {
                valid: false,
                messages: vec![ValidationMessage::error(
                    "Version latest is invalid or reached end of cloud provisioning"
                )],
            }
        );
    }

    #[test]
    fn warnings_filters_errors() {
        let verdict = ValidationVerdict {
            valid: false,
            messages: vec![
                ValidationMessage::warn("Version reached end of maintenance"),
                ValidationMessage::error("Patch 1 of version 1.117 is not available"),
            ],
        };

        assert_eq!(
            verdict.warnings(),
            vec![ValidationMessage::warn("Version reached end of maintenance")]
        );
    }
}
